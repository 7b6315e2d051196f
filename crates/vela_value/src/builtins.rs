//! Builtin native functions.
//!
//! These are pre-registered in every type namespace and are the usual key
//! functions for bounded types (`Bounded[str, 1:10, len]`).

use crate::callable::Callable;
use crate::value::Value;

/// `len(x)`: number of elements (characters for text).
pub fn len() -> Callable {
    Callable::builtin("len", |v| {
        let n = v.len().map_err(|e| e.message)?;
        i64::try_from(n)
            .map(Value::Int)
            .map_err(|_| "length does not fit in an integer".to_string())
    })
}

/// `bool(x)`: truthiness.
pub fn bool() -> Callable {
    Callable::builtin("bool", |v| Ok(Value::Bool(v.is_truthy())))
}

/// `str(x)`: host-style text conversion.
pub fn str() -> Callable {
    Callable::builtin("str", |v| Ok(Value::string(v.to_str())))
}

/// `repr(x)`.
pub fn repr() -> Callable {
    Callable::builtin("repr", |v| Ok(Value::string(v.repr())))
}

/// `abs(x)` for numbers.
pub fn abs() -> Callable {
    Callable::builtin("abs", |v| match v {
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::Int(n) => n
            .checked_abs()
            .map(Value::Int)
            .ok_or_else(|| "integer overflow".to_string()),
        Value::Float(f) => Ok(Value::Float(f.abs())),
        other => Err(format!(
            "bad operand type for abs(): '{}'",
            other.type_name()
        )),
    })
}

/// Every builtin, in registration order.
pub fn callables() -> Vec<Callable> {
    vec![len(), bool(), str(), repr(), abs()]
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn len_counts_characters() {
        assert_eq!(len().call(&Value::string("héllo")), Ok(Value::Int(5)));
        assert_eq!(
            len().call(&Value::list(vec![Value::None, Value::None])),
            Ok(Value::Int(2))
        );
    }

    #[test]
    fn len_of_unsized_value_fails_with_function_name() {
        let err = len().call(&Value::Int(3)).unwrap_err();
        assert_eq!(err.message, "len(): object of type 'int' has no len()");
    }

    #[test]
    fn builtins_render_unqualified() {
        let names: Vec<String> = callables().iter().map(Callable::full_name).collect();
        assert_eq!(names, vec!["len", "bool", "str", "repr", "abs"]);
    }

    #[test]
    fn abs_rejects_text() {
        let err = abs().call(&Value::string("x")).unwrap_err();
        assert_eq!(err.message, "abs(): bad operand type for abs(): 'str'");
    }

    #[test]
    fn str_and_repr_differ_on_text() {
        let v = Value::string("a");
        assert_eq!(str().call(&v), Ok(Value::string("a")));
        assert_eq!(repr().call(&v), Ok(Value::string("'a'")));
    }
}
