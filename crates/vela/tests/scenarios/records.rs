use pretty_assertions::assert_eq;
use vela::{Args, Policy, Record, RecordClass, RecordDef, Type, Value};

use crate::common::namespace;

fn service() -> RecordClass {
    RecordDef::coercing("Service")
        .module("deploy")
        .comparable()
        .field("name", "NonEmptyString")
        .field("port", "Bounded[int, 1:65535]")
        .field_with_default("tags", "List[String[1:8]]", Value::list(vec![]))
        .field_with_default("root", "Dir", Value::None)
        .attribute("DEFAULT_PORT", 8080)
        .define_with(&namespace())
        .unwrap()
}

#[test]
fn textual_field_types_are_enforced() {
    let class = service();
    assert_eq!(
        class.field_names().collect::<Vec<_>>(),
        vec!["name", "port", "tags", "root"]
    );
    assert_eq!(class.required_fields().collect::<Vec<_>>(), vec!["name", "port"]);
    assert_eq!(class.field("root").unwrap().declared.to_string(), "Optional[Dir]");

    let svc = class
        .call(Args::new().arg("api").kwarg("port", "443"))
        .unwrap();
    assert_eq!(svc.repr(), "Service(name='api', port=443, tags=[], root=None)");
    assert_eq!(svc.get("DEFAULT_PORT").unwrap(), Value::Int(8080));

    let err = svc.set("port", 70000).unwrap_err();
    assert_eq!(err.message, "The value 70000 is above the maximum allowed value of 65535.");
    let err = svc.set("name", "").unwrap_err();
    assert_eq!(
        err.message,
        "The value of len('') [0] is below the minimum allowed value of 1."
    );
    let err = svc
        .set("tags", Value::list(vec![Value::string("ok"), Value::string("much-too-long")]))
        .unwrap_err();
    assert_eq!(
        err.message,
        "The value of len('much-too-long') [13] is above the maximum allowed value of 8."
    );
    assert_eq!(svc.get("port").unwrap(), Value::Int(443));
}

#[test]
fn path_fields_are_canonicalized() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service()
        .call(Args::new().arg("api").arg(80).kwarg("root", Value::string(dir.path().to_string_lossy())))
        .unwrap();
    let canonical = std::fs::canonicalize(dir.path()).unwrap();
    assert_eq!(
        svc.get("root").unwrap(),
        Value::string(canonical.to_string_lossy())
    );
    let missing = dir.path().join("missing");
    assert!(svc.set("root", Value::string(missing.to_string_lossy())).is_err());
}

#[test]
fn strict_records_only_take_instances() {
    let class = RecordDef::strict("Slug")
        .field("text", "Length[str, 1:12]")
        .define_with(&namespace())
        .unwrap();
    let slug = class.call(Args::new().arg("hello")).unwrap();
    assert_eq!(
        slug.set("text", 5).unwrap_err().message,
        "Cannot assign value of type int to attribute of type Length[str, 1:12]."
    );
    assert!(slug.set("text", "").is_err());
    assert_eq!(slug.get("text").unwrap(), Value::string("hello"));
}

#[test]
fn records_nest_through_the_namespace() {
    let mut ns = namespace();
    let point = RecordDef::coercing("Point")
        .module("geo")
        .comparable()
        .field("x", Type::Float)
        .field("y", Type::Float)
        .define_in(&mut ns)
        .unwrap();
    let polygon = RecordDef::coercing("Polygon")
        .module("geo")
        .field("vertices", "Length[List[geo.Point], 3:]")
        .define_in(&mut ns)
        .unwrap();

    let corner = |x: i64, y: i64| {
        Value::map(vec![
            (Value::string("x"), Value::Int(x)),
            (Value::string("y"), Value::Int(y)),
        ])
    };
    let triangle = polygon
        .call(Args::new().arg(Value::list(vec![corner(0, 0), corner(1, 0), corner(0, 1)])))
        .unwrap();
    let vertices = triangle.get("vertices").unwrap();
    let first = Record::from_value(&vertices.as_sequence().unwrap()[0]).unwrap();
    assert!(first.class().ptr_eq(&point));
    assert_eq!(first.repr(), "Point(x=0.0, y=0.0)");

    let err = polygon
        .call(Args::new().arg(Value::list(vec![corner(0, 0)])))
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        ns.resolve("Optional[geo.Polygon]").unwrap().to_string(),
        "Optional[geo.Polygon]"
    );
}

#[test]
fn comparable_records_as_values() {
    let class = RecordDef::new("Version", Policy::Coercing)
        .comparable()
        .field("major", Type::Int)
        .field("minor", Type::Int)
        .define()
        .unwrap();
    let v = |major: &str, minor: &str| {
        class
            .call(Args::keywords([("major", Value::string(major)), ("minor", Value::string(minor))]))
            .unwrap()
            .to_value()
    };
    let mut versions = vec![v("1", "10"), v("1", "2"), v("0", "9")];
    versions.sort_by(|a, b| a.try_partial_cmp(b, "<").unwrap().unwrap());
    let reprs: Vec<String> = versions.iter().map(Value::repr).collect();
    assert_eq!(
        reprs,
        vec![
            "Version(major=0, minor=9)",
            "Version(major=1, minor=2)",
            "Version(major=1, minor=10)",
        ]
    );
    assert_eq!(v("2", "0"), v("2", "0"));
    let unique: std::collections::HashSet<Value> = [v("2", "0"), v("2", "0")].into_iter().collect();
    assert_eq!(unique.len(), 1);
}

#[test]
fn tracing_can_be_initialized_repeatedly() {
    vela::init_tracing();
    vela::init_tracing();
    let class = RecordDef::strict("Traced").field("n", Type::Int).define().unwrap();
    assert!(class.call(Args::new().arg(1)).is_ok());
}
