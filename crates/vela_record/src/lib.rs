//! Vela Record - Typed records for Vela.
//!
//! A record class is declared with a `RecordDef` and enforces its field
//! types on every assignment, either strictly (`RecordDef::strict`) or by
//! converting values (`RecordDef::coercing`). Classes get a generated
//! constructor, a readable repr and, on request, field-wise comparison and
//! hashing.
//!
//! # Example
//!
//! ```text
//! let point = RecordDef::coercing("Point")
//!     .field("x", Type::Int)
//!     .field_with_default("label", Type::Str, Value::None)
//!     .define()?;
//! let p = point.call(Args::new().arg("3"))?;
//! assert_eq!(p.get("x")?, Value::Int(3));
//! assert_eq!(p.repr(), "Point(x=3, label=None)");
//! ```

mod args;
mod class;
mod def;
mod record;

pub use args::Args;
pub use class::{FieldFlags, FieldSpec, Instancing, Policy, RecordClass};
pub use def::{Annotation, RecordDef};
pub use record::Record;
