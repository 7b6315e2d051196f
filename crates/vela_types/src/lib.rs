//! Vela Types - Type model and type introspection for Vela.
//!
//! This crate provides:
//! - The declared-type model (`Type`) and the `TypeObject` seam through
//!   which runtime-defined types plug in
//! - Structural instance checks (`is_instance`)
//! - Best-effort conversion (`coerce`)
//! - Textual type expression resolution against a `Namespace`
//! - Parameterizable factories (`TypeFactory`, `Param`)
//! - Configuration and validation errors shared by the higher layers
//!
//! # Example
//!
//! ```text
//! let ns = Namespace::new();
//! let ty = ns.resolve("Optional[List[int]]")?;
//! assert!(is_instance(&Value::None, &ty));
//! let cast = coerce(&ty, &Value::list(vec![Value::string("1")]))?;
//! ```

mod check;
mod coerce;
mod errors;
mod factory;
mod generics;
mod namespace;
mod resolve;
mod stack;
mod ty;

pub use check::is_instance;
pub use coerce::coerce;
pub use errors::{
    above_maximum, below_minimum, cannot_convert, element_count, invalid_bound, invalid_field,
    invalid_parameter, malformed_expression, missing_arguments, multiple_values, natural_list,
    not_comparable, not_subscriptable, predicate_failed, too_many_parameters, too_many_positional,
    unexpected_keyword, uninstantiable, unknown_attribute, unresolved_name, unset_attribute,
    unsupported_bound, wrong_arity, wrong_type,
    BoundSubject, ConfigError, ConfigErrorKind, Error, ValidationError, ValidationErrorKind,
};
pub use factory::{Param, TypeFactory};
pub use generics::Generic;
pub use namespace::{Namespace, Symbol};
pub use resolve::resolve;
pub use stack::ensure_sufficient_stack;
pub use ty::{Type, TypeObject};
