use pretty_assertions::assert_eq;
use proptest::prelude::*;
use vela::validate::{synthesize, Constraint, KeyFn};
use vela::{Bounded, Length, Range, Str, Type, Valid, Value};

use crate::common::{even, namespace};

#[test]
fn bounded_accepts_convertible_input() {
    let port = Bounded::new(Type::Int, 1..=65535).unwrap();
    assert_eq!(port.construct(&Value::string(" 8080 ")).unwrap(), Value::Int(8080));
    assert_eq!(port.construct(&Value::Float(80.9)).unwrap(), Value::Int(80));
    assert!(!port.is_instance(&Value::string("8080")));
    assert_eq!(
        port.construct(&Value::Int(0)).unwrap_err().message,
        "The value 0 is below the minimum allowed value of 1."
    );
}

#[test]
fn keyed_bounds_report_the_intermediate_value() {
    let short = Length::new(Type::Str, ..=3).unwrap();
    assert_eq!(
        short.construct(&Value::string("abcd")).unwrap_err().message,
        "The value of len('abcd') [4] is above the maximum allowed value of 3."
    );
    let custom = Bounded::with_key(Type::Int, 0..=10, vela::value::builtins::abs()).unwrap();
    assert_eq!(custom.name(), "Bounded[int, 0:10, abs]");
    assert_eq!(custom.construct(&Value::Int(-7)).unwrap(), Value::Int(-7));
    assert_eq!(
        custom.construct(&Value::Int(-11)).unwrap_err().message,
        "The value of abs(-11) [11] is above the maximum allowed value of 10."
    );
}

#[test]
fn predicates() {
    let even_int = Valid::typed(Type::Int, even());
    assert_eq!(even_int.name(), "Valid[int, checks.even]");
    assert_eq!(even_int.construct(&Value::string("4")).unwrap(), Value::Int(4));
    assert_eq!(
        even_int.construct(&Value::Int(3)).unwrap_err().message,
        "checks.even(3) is False"
    );
    let any_even = Valid::new(even());
    assert!(any_even.is_predicate_only());
    assert_eq!(
        any_even.construct(&Value::string("x")).unwrap_err().message,
        "checks.even(): expected int, found str"
    );
}

#[test]
fn engine_and_factories_agree() {
    let engine = synthesize(Type::Str, Constraint::Bounds(Range::between(1, 3).with_key(KeyFn::Length)))
        .unwrap();
    let factory = Str::new(1..=3).unwrap();
    for text in ["", "a", "abc", "abcd"] {
        let value = Value::string(text);
        assert_eq!(engine.is_instance(&value), factory.is_instance(&value), "{text:?}");
    }
}

#[test]
fn unorderable_bounds_are_configuration_errors() {
    let err = Bounded::new(Type::Int, Range::at_most(Value::None)).unwrap_err();
    assert_eq!(err.message, "Bound None does not support ordering comparisons.");
}

#[test]
fn comparison_failures_are_validation_errors() {
    let ty = Bounded::new(Type::Any, 1..=5).unwrap();
    assert_eq!(
        ty.construct(&Value::string("3")).unwrap_err().message,
        "'<' not supported between instances of 'str' and 'int'"
    );
}

#[test]
fn resolved_types_behave_like_built_ones() {
    let ns = namespace();
    let resolved = ns.resolve("Bounded[int, 10:20]").unwrap();
    let object = resolved.as_object().unwrap();
    let built = Bounded::new(Type::Int, 10..=20).unwrap();
    for n in [9, 10, 15, 20, 21] {
        let value = Value::Int(n);
        assert_eq!(object.is_instance(&value), built.is_instance(&value));
        assert_eq!(object.construct(&value).is_ok(), built.construct(&value).is_ok());
    }
}

proptest! {
    #[test]
    fn bounded_accepts_exactly_the_range(lo in -100i64..100, span in 0i64..100, x in -300i64..300) {
        let hi = lo + span;
        let ty = namespace().resolve(&format!("Bounded[int, {lo}:{hi}]")).unwrap();
        let object = ty.as_object().unwrap();
        let inside = lo <= x && x <= hi;
        prop_assert_eq!(object.is_instance(&Value::Int(x)), inside);
        match object.construct(&Value::Int(x)) {
            Ok(value) => prop_assert_eq!(value, Value::Int(x)),
            Err(err) => prop_assert!(!inside && err.is_constraint_failure()),
        }
    }

    #[test]
    fn length_accepts_exactly_the_range(lo in 0i64..10, span in 0i64..10, text in "[a-z]{0,25}") {
        let ty = Length::new(Type::Str, lo..=lo + span).unwrap();
        let len = i64::try_from(text.chars().count()).unwrap();
        prop_assert_eq!(ty.is_instance(&Value::string(text.clone())), lo <= len && len <= lo + span);
    }

    #[test]
    fn instance_check_is_idempotent(n in any::<i64>()) {
        let ty = Valid::typed(Type::Int, even());
        let value = Value::Int(n);
        let first = ty.is_instance(&value);
        prop_assert_eq!(first, ty.is_instance(&value));
        if first {
            prop_assert_eq!(ty.construct(&value).unwrap(), value);
        }
    }
}
