use super::*;
use crate::errors::{invalid_parameter, ConfigErrorKind};
use crate::factory::TypeFactory;

fn ns() -> Namespace {
    Namespace::new()
}

/// Always fails, reporting the parameters it received.
struct Echo;

impl TypeFactory for Echo {
    fn name(&self) -> &str {
        "Echo"
    }

    fn parameterize(&self, params: &[Param]) -> Result<Type, ConfigError> {
        let rendered: Vec<String> = params
            .iter()
            .map(|p| match p {
                Param::Slice { lower, upper } => format!(
                    "{}:{}",
                    lower.as_ref().map(Value::repr).unwrap_or_default(),
                    upper.as_ref().map(Value::repr).unwrap_or_default()
                ),
                Param::Value(v) => format!("={}", v.repr()),
                other => other.describe(),
            })
            .collect();
        Err(invalid_parameter("Echo", "nothing", &rendered.join(" | ")))
    }
}

fn echo(expression: &str) -> String {
    let mut ns = ns();
    ns.define_factory(Echo);
    match ns.resolve(expression).unwrap_err().kind {
        ConfigErrorKind::InvalidParameter { found, .. } => found,
        other => panic!("unexpected error {other:?}"),
    }
}

mod types {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_names() {
        assert_eq!(ns().resolve("int").unwrap(), Type::Int);
        assert_eq!(ns().resolve("None").unwrap(), Type::NoneType);
        assert_eq!(ns().resolve("list").unwrap(), Type::list(Type::Any));
    }

    #[test]
    fn nested_generics() {
        assert_eq!(
            ns().resolve("Optional[List[int]]").unwrap(),
            Type::optional(Type::list(Type::Int))
        );
        assert_eq!(
            ns().resolve("Dict[str, Tuple[int, ...]]").unwrap(),
            Type::map(Type::Str, Type::tuple_of(Type::Int))
        );
        assert_eq!(ns().resolve("Tuple[()]").unwrap(), Type::Tuple(vec![]));
        assert_eq!(
            ns().resolve(" Union[ int , str , ] ").unwrap(),
            Type::union([Type::Int, Type::Str])
        );
    }

    #[test]
    fn display_names_round_trip() {
        for expr in [
            "List[int]",
            "Optional[str]",
            "Union[int, str, None]",
            "Tuple[int, ...]",
            "Tuple[int, str]",
            "Dict[str, List[float]]",
        ] {
            assert_eq!(ns().resolve(expr).unwrap().to_string(), expr);
        }
    }

    #[test]
    fn bare_generic_means_any() {
        assert_eq!(ns().resolve("List").unwrap(), Type::list(Type::Any));
    }

    #[test]
    fn user_registered_types() {
        let mut ns = ns();
        ns.define_type("Age", Type::Int);
        assert_eq!(ns.resolve("List[Age]").unwrap(), Type::list(Type::Int));
    }
}

mod params {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn slices() {
        assert_eq!(echo("Echo[10:20]"), "10:20");
        assert_eq!(echo("Echo[:5]"), ":5");
        assert_eq!(echo("Echo[1:]"), "1:");
        assert_eq!(echo("Echo[:]"), ":");
        assert_eq!(echo("Echo[-3:-1.5]"), "-3:-1.5");
        assert_eq!(echo("Echo['a':'z']"), "'a':'z'");
    }

    #[test]
    fn full_integer_range() {
        assert_eq!(
            echo("Echo[-9223372036854775808:9223372036854775807]"),
            "-9223372036854775808:9223372036854775807"
        );
    }

    #[test]
    fn bare_values_types_and_callables() {
        assert_eq!(echo("Echo[20]"), "=20");
        assert_eq!(echo("Echo[True]"), "=True");
        assert_eq!(
            echo("Echo[int, 1:2, len]"),
            "type int | 1:2 | function len"
        );
    }
}

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_name() {
        let err = ns().resolve("List[Foo]").unwrap_err();
        assert_eq!(err.message, "name 'Foo' is not defined");
    }

    #[test]
    fn subscripting_a_plain_type() {
        let err = ns().resolve("int[3]").unwrap_err();
        assert_eq!(err.message, "'int' is not subscriptable");
    }

    #[test]
    fn callable_at_top_level() {
        let err = ns().resolve("len").unwrap_err();
        assert_eq!(
            err.message,
            "invalid type expression 'len' at offset 0: expected a type, found function len"
        );
    }

    #[test]
    fn integer_out_of_range() {
        let err = ns().resolve("Echo[9223372036854775808]").unwrap_err();
        assert_eq!(
            err.message,
            "invalid type expression 'Echo[9223372036854775808]' at offset 5: integer out of range"
        );
    }

    #[test]
    fn unclosed_bracket() {
        let err = ns().resolve("List[int").unwrap_err();
        assert_eq!(
            err.message,
            "invalid type expression 'List[int' at offset 8: expected ']'"
        );
    }

    #[test]
    fn trailing_input() {
        let err = ns().resolve("int str").unwrap_err();
        assert!(matches!(
            err.kind,
            ConfigErrorKind::MalformedExpression { position: 4, .. }
        ));
    }

    #[test]
    fn bad_character() {
        let err = ns().resolve("List[$]").unwrap_err();
        assert_eq!(
            err.message,
            "invalid type expression 'List[$]' at offset 5: unexpected '$'"
        );
    }

    #[test]
    fn factory_errors_pass_through() {
        let err = ns().resolve("Optional[int, str]").unwrap_err();
        assert_eq!(err.message, "Optional[...] takes exactly one argument.");
    }
}
