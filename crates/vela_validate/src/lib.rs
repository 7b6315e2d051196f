//! Vela Validate - Constrained types for Vela.
//!
//! A constrained type pairs a base type with bounds or a predicate. Building
//! a value through it converts the value into the base type and then checks
//! it; the instance check verifies the same thing without converting.
//!
//! - `synthesize` is the engine; the factories `Bounded`, `Length`, `Valid`
//!   and `Str` (named `String` in type expressions) are the usual way in
//! - `path` holds ready-made filesystem path types
//! - `install` registers everything in a `Namespace`, after which type
//!   expressions such as `Bounded[int, 1:10]` resolve
//!
//! # Example
//!
//! ```text
//! let age = Bounded::new(Type::Int, 0..=150)?;
//! assert_eq!(age.construct(&Value::string("42"))?, Value::Int(42));
//! assert!(age.construct(&Value::Int(200)).is_err());
//! ```

mod factories;
pub mod path;
mod range;
mod synth;

pub use factories::{non_empty_string, Bounded, Length, Str, Valid};
pub use range::{KeyFn, Range};
pub use synth::{synthesize, BaseType, Constraint, Flavor, SynthesizedType};

use vela_types::Namespace;

/// Register the factories, `NonEmptyString` and the path types.
pub fn install(namespace: &mut Namespace) {
    namespace.define_factory(Bounded);
    namespace.define_factory(Length);
    namespace.define_factory(Valid);
    namespace.define_factory(Str);
    namespace.define_type("NonEmptyString", non_empty_string().to_type());
    for (name, ty) in path::all() {
        namespace.define_type(name, ty.to_type());
    }
}

/// `Namespace::new()` with `install` applied.
pub fn namespace() -> Namespace {
    let mut namespace = Namespace::new();
    install(&mut namespace);
    namespace
}
