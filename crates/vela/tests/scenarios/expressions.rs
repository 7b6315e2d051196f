use pretty_assertions::assert_eq;
use vela::{Type, Value};

use crate::common::namespace;

#[test]
fn display_names_resolve_to_equivalent_types() {
    let ns = namespace();
    for expr in [
        "Bounded[int, 10:20]",
        "Bounded[float, :0.5]",
        "Bounded[str, 1:5, len]",
        "Length[str, 1:5]",
        "Length[List[int], 1:]",
        "Valid[checks.even]",
        "Valid[int, checks.even]",
        "String[1:3]",
        "Optional[Bounded[int, 0:]]",
        "List[String[1:]]",
    ] {
        let first = ns.resolve(expr).unwrap();
        assert_eq!(first.to_string(), expr);
        let second = ns.resolve(&first.to_string()).unwrap();
        assert_eq!(second.to_string(), expr);
    }
}

#[test]
fn every_parameterization_is_a_new_type() {
    let ns = namespace();
    let a = ns.resolve("Bounded[int, 1:2]").unwrap();
    let b = ns.resolve("Bounded[int, 1:2]").unwrap();
    assert!(a != b);
    assert_eq!(a, a.clone());
}

#[test]
fn builtin_generics_are_structural() {
    let ns = namespace();
    assert_eq!(
        ns.resolve("Dict[str, List[int]]").unwrap(),
        Type::map(Type::Str, Type::list(Type::Int))
    );
    assert_eq!(ns.resolve("Optional[int]").unwrap(), Type::optional(Type::Int));
}

#[test]
fn configuration_errors() {
    let ns = namespace();
    let cases = [
        ("Bounded[int]", "Bounded[...] takes two or three arguments."),
        ("Length[str, 1:5, len]", "Length[...] takes exactly two arguments."),
        ("Valid[int, checks.even, len]", "Valid[...] takes one or two arguments."),
        ("String[1:2, 3:4]", "String[...] takes exactly one argument."),
        ("Bounded[Widget, 1:2]", "name 'Widget' is not defined"),
    ];
    for (expr, message) in cases {
        assert_eq!(ns.resolve(expr).unwrap_err().message, message, "{expr}");
    }
}

#[test]
fn unparameterized_factories() {
    let ns = namespace();
    for name in ["Bounded", "Length", "Valid"] {
        let err = ns.factory(name).unwrap().instantiate(&[Value::Int(1)]).unwrap_err();
        assert!(err.is_config());
        assert_eq!(err.message(), format!("Type {name} cannot be instantiated."));
    }
    let text = ns.factory("String").unwrap();
    assert_eq!(text.instantiate(&[Value::Int(5)]).unwrap(), Value::string("5"));
    assert_eq!(text.instantiate(&[]).unwrap(), Value::string(""));
}
