//! Structural instance checks.

use vela_value::Value;

use crate::stack::ensure_sufficient_stack;
use crate::ty::Type;

/// Check whether `value` is an instance of `ty`.
///
/// Containers are checked element-wise, fixed tuples positionally, unions
/// member by member. Booleans are not integers here, and integers are not
/// floats. Runtime type objects answer for themselves.
pub fn is_instance(value: &Value, ty: &Type) -> bool {
    ensure_sufficient_stack(|| match (ty, value) {
        (Type::Any, _)
        | (Type::NoneType, Value::None)
        | (Type::Bool, Value::Bool(_))
        | (Type::Int, Value::Int(_))
        | (Type::Float, Value::Float(_))
        | (Type::Str, Value::Str(_))
        | (Type::Bytes, Value::Bytes(_)) => true,
        (Type::List(elem), Value::List(items)) | (Type::TupleOf(elem), Value::Tuple(items)) => {
            items.iter().all(|item| is_instance(item, elem))
        }
        (Type::Tuple(types), Value::Tuple(items)) => {
            types.len() == items.len()
                && types.iter().zip(items.iter()).all(|(t, v)| is_instance(v, t))
        }
        (Type::Map(key, val), Value::Map(entries)) => entries
            .iter()
            .all(|(k, v)| is_instance(k, key) && is_instance(v, val)),
        (Type::Union(members), _) => members.iter().any(|m| is_instance(value, m)),
        (Type::Object(obj), _) => obj.is_instance(value),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives() {
        assert!(is_instance(&Value::Int(1), &Type::Int));
        assert!(!is_instance(&Value::Bool(true), &Type::Int));
        assert!(!is_instance(&Value::Int(1), &Type::Float));
        assert!(is_instance(&Value::string("a"), &Type::Any));
        assert!(is_instance(&Value::None, &Type::NoneType));
    }

    #[test]
    fn containers_are_checked_element_wise() {
        let ints = Value::list(vec![Value::Int(1), Value::Int(2)]);
        let mixed = Value::list(vec![Value::Int(1), Value::string("2")]);
        assert!(is_instance(&ints, &Type::list(Type::Int)));
        assert!(!is_instance(&mixed, &Type::list(Type::Int)));
        assert!(is_instance(&mixed, &Type::list(Type::Any)));
        assert!(!is_instance(&ints, &Type::tuple_of(Type::Int)));
    }

    #[test]
    fn fixed_tuples_are_positional() {
        let pair = Value::tuple(vec![Value::Int(1), Value::string("a")]);
        assert!(is_instance(&pair, &Type::Tuple(vec![Type::Int, Type::Str])));
        assert!(!is_instance(&pair, &Type::Tuple(vec![Type::Str, Type::Int])));
        assert!(!is_instance(&pair, &Type::Tuple(vec![Type::Int])));
    }

    #[test]
    fn maps_check_keys_and_values() {
        let m = Value::map(vec![(Value::string("a"), Value::Int(1))]);
        assert!(is_instance(&m, &Type::map(Type::Str, Type::Int)));
        assert!(!is_instance(&m, &Type::map(Type::Int, Type::Int)));
    }

    #[test]
    fn unions_accept_any_member() {
        let ty = Type::optional(Type::Int);
        assert!(is_instance(&Value::None, &ty));
        assert!(is_instance(&Value::Int(3), &ty));
        assert!(!is_instance(&Value::string("3"), &ty));
    }

    #[test]
    fn deep_nesting_does_not_overflow() {
        let mut value = Value::Int(0);
        let mut ty = Type::Int;
        for _ in 0..5_000 {
            value = Value::list(vec![value]);
            ty = Type::list(ty);
        }
        assert!(is_instance(&value, &ty));
    }
}
