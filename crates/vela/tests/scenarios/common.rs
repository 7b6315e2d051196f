//! Shared fixtures.

use vela::{Callable, Namespace, Value};

/// `checks.even`: true for even integers.
pub fn even() -> Callable {
    Callable::new("checks", "even", |v| {
        let n = v.as_int().ok_or_else(|| format!("expected int, found {}", v.type_name()))?;
        Ok(Value::Bool(n % 2 == 0))
    })
}

/// The full namespace plus the `checks` callables.
pub fn namespace() -> Namespace {
    let mut ns = vela::namespace();
    ns.define_callable(even());
    ns
}
