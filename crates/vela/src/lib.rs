//! Vela - Runtime type validation, coercion and typed records.
//!
//! This crate ties the workspace together:
//!
//! - [`value`]: the dynamic value model and named callables
//! - [`types`]: runtime types, instance checks, coercion and the namespace
//!   that resolves type expressions
//! - [`validate`]: bounded, length-limited and predicate-checked types,
//!   plus the filesystem path types
//! - [`record`]: record classes with strict or coercing fields
//!
//! The most used items are re-exported at the top level.
//!
//! # Debug Environment Variables
//!
//! - `RUST_LOG=vela_record=debug`: log record definitions stage by stage.
//! - `RUST_LOG=vela_validate=trace`: trace every conversion and check.
//!
//! Tracing output only appears after [`init_tracing`] has been called.

use std::sync::Once;

pub use vela_record as record;
pub use vela_types as types;
pub use vela_validate as validate;
pub use vela_value as value;

pub use vela_record::{Args, Instancing, Policy, Record, RecordClass, RecordDef};
pub use vela_types::{
    coerce, is_instance, ConfigError, Error, Namespace, Type, ValidationError,
};
pub use vela_validate::{non_empty_string, Bounded, Length, Range, Str, SynthesizedType, Valid};
pub use vela_value::{Callable, Value};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// A namespace with the builtin types and callables, the constrained type
/// factories and the path types.
pub fn namespace() -> Namespace {
    vela_validate::namespace()
}

/// Resolve a type expression against [`namespace`].
pub fn resolve(expression: &str) -> Result<Type, ConfigError> {
    namespace().resolve(expression)
}
