use super::*;
use crate::def::RecordDef;
use vela_types::{coerce, is_instance, Namespace, ValidationErrorKind};

fn point() -> RecordClass {
    RecordDef::coercing("Point")
        .module("geo")
        .field("x", Type::Int)
        .field_with_default("y", Type::Int, 0)
        .define()
        .unwrap()
}

mod identity {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn type_round_trip_keeps_identity() {
        let class = point();
        let ty = class.to_type();
        let back = RecordClass::from_type(&ty).unwrap();
        assert!(back.ptr_eq(&class));
        assert_eq!(ty, Type::from(class.clone()));
        assert!(RecordClass::from_type(&Type::Int).is_none());
    }

    #[test]
    fn separately_defined_classes_differ() {
        assert!(point().to_type() != point().to_type());
    }

    #[test]
    fn names() {
        let class = point();
        assert_eq!(class.name(), "Point");
        assert_eq!(class.qualified_name(), "geo.Point");
        assert_eq!(class.to_type().to_string(), "geo.Point");
        assert_eq!(format!("{class:?}"), "<record class geo.Point>");
    }

    #[test]
    fn resolvable_once_registered() {
        let mut ns = Namespace::new();
        let class = RecordDef::strict("Point").module("geo").define_in(&mut ns).unwrap();
        let ty = ns.resolve("Optional[geo.Point]").unwrap();
        assert_eq!(ty, Type::optional(class.to_type()));
    }
}

mod as_type {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn instances_of_subclasses_count() {
        let parent = point();
        let child = RecordDef::extending("Point3", &parent)
            .field_with_default("z", Type::Int, 0)
            .define()
            .unwrap();
        let p3 = child.call(Args::new().arg(1)).unwrap().to_value();
        assert!(is_instance(&p3, &parent.to_type()));
        assert!(is_instance(&p3, &child.to_type()));
        assert!(!is_instance(&Value::Int(1), &parent.to_type()));
    }

    #[test]
    fn builds_from_string_keyed_maps() {
        let class = point();
        let map = Value::map(vec![(Value::string("x"), Value::string("4"))]);
        let built = coerce(&class.to_type(), &map).unwrap();
        assert_eq!(built.repr(), "Point(x=4, y=0)");
        let instance = class.call(Args::new().arg(1)).unwrap().to_value();
        assert_eq!(coerce(&class.to_type(), &instance).unwrap(), instance);
    }

    #[test]
    fn field_failures_surface_from_map_construction() {
        let class = point();
        let map = Value::map(vec![(Value::string("x"), Value::string("four"))]);
        let err = coerce(&class.to_type(), &map).unwrap_err();
        assert_eq!(err.message, "Cannot convert 'four' to int.");
    }

    #[test]
    fn unusable_inputs_cannot_convert() {
        let class = point();
        let non_str_key = Value::map(vec![(Value::Int(1), Value::Int(2))]);
        let unknown = Value::map(vec![(Value::string("w"), Value::Int(2))]);
        for value in [Value::Int(3), non_str_key, unknown] {
            let err = coerce(&class.to_type(), &value).unwrap_err();
            assert!(matches!(err.kind, ValidationErrorKind::CannotConvert { .. }));
        }
    }
}

mod members {
    use super::*;
    use pretty_assertions::assert_eq;
    use vela_value::builtins;

    #[test]
    fn fields_in_order_with_flags() {
        let class = point();
        let x = class.field("x").unwrap();
        let y = class.field("y").unwrap();
        assert!(x.is_required() && !x.has_default());
        assert!(!y.is_required() && y.has_default());
        assert_eq!(class.field_names().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(class.field_index("y"), Some(1));
    }

    #[test]
    fn methods_and_attributes_are_inherited() {
        let parent = RecordDef::strict("Base")
            .attribute("VERSION", 2)
            .method("describe", builtins::repr())
            .define()
            .unwrap();
        let child = RecordDef::extending("Child", &parent).define().unwrap();
        assert_eq!(child.attribute("VERSION"), Some(&Value::Int(2)));
        assert!(child.method("describe").is_some());
        assert!(child.method("missing").is_none());
        assert!(child.parent().unwrap().ptr_eq(&parent));
    }
}

mod instancing {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings(instancing: Instancing) -> RecordClass {
        RecordDef::coercing("Settings")
            .field("level", Type::Int)
            .field_with_default("name", Type::Str, "main")
            .instancing(instancing)
            .define()
            .unwrap()
    }

    #[test]
    fn fresh_by_default() {
        let class = point();
        assert_eq!(class.instancing(), Instancing::Fresh);
        let a = class.call(Args::new().arg(1)).unwrap();
        let b = class.call(Args::new().arg(1)).unwrap();
        assert!(!a.ptr_eq(&b));
        assert!(class.instance().is_none());
    }

    #[test]
    fn singleton_ignores_later_arguments() {
        let class = settings(Instancing::Singleton);
        assert!(class.instance().is_none());
        let first = class.call(Args::new().arg("1")).unwrap();
        let second = class.call(Args::new().arg(2).kwarg("name", "other")).unwrap();
        assert!(first.ptr_eq(&second));
        assert!(class.instance().unwrap().ptr_eq(&first));
        assert_eq!(second.repr(), "Settings(level=1, name='main')");
    }

    #[test]
    fn singleton_is_not_cached_after_a_failed_first_call() {
        let class = settings(Instancing::Singleton);
        assert!(class.call(Args::new()).is_err());
        assert!(class.instance().is_none());
        let record = class.call(Args::new().arg(3)).unwrap();
        assert_eq!(record.get("level").unwrap(), Value::Int(3));
    }

    #[test]
    fn idempotent_singleton_rebinds_every_field() {
        let class = settings(Instancing::IdempotentSingleton);
        let first = class.call(Args::new().arg(1).kwarg("name", "edited")).unwrap();
        let second = class.call(Args::new().arg("2")).unwrap();
        assert!(first.ptr_eq(&second));
        assert_eq!(first.repr(), "Settings(level=2, name='main')");
    }

    #[test]
    fn failed_reinitialization_keeps_previous_values() {
        let class = settings(Instancing::IdempotentSingleton);
        let record = class.call(Args::new().arg(1).kwarg("name", "kept")).unwrap();
        let err = class
            .call(Args::new().arg("two").kwarg("name", "lost"))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(class.call(Args::new()).is_err());
        assert_eq!(record.repr(), "Settings(level=1, name='kept')");
    }

    #[test]
    fn subclasses_inherit_the_mode_with_their_own_instance() {
        let parent = settings(Instancing::Singleton);
        let child = RecordDef::extending("Local", &parent).define().unwrap();
        assert_eq!(child.instancing(), Instancing::Singleton);
        let p = parent.call(Args::new().arg(1)).unwrap();
        let c = child.call(Args::new().arg(2)).unwrap();
        assert!(!p.ptr_eq(&c));
        assert!(child.call(Args::new().arg(3)).unwrap().ptr_eq(&c));
        assert_eq!(c.get("level").unwrap(), Value::Int(2));
    }

    #[test]
    fn map_coercion_hands_out_the_singleton() {
        let class = settings(Instancing::Singleton);
        let record = class.call(Args::new().arg(5)).unwrap();
        let map = Value::map(vec![(Value::string("level"), Value::Int(9))]);
        let built = coerce(&class.to_type(), &map).unwrap();
        assert!(Record::from_value(&built).unwrap().ptr_eq(&record));
    }
}
