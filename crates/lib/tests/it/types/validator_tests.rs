//! TypeValidator integration tests

use typed_collections::{
    Object, TypeValidator, Value,
    types::{PrimitiveKind, TypeDescriptor, TypeError},
};

use crate::helpers::*;

// ===== PRIMITIVE TYPES =====

#[test]
fn test_untyped_accepts_everything() {
    let validator = TypeValidator::untyped();
    assert!(validator.is_untyped());

    for element in [
        Value::Null,
        Value::from(true),
        Value::from(1),
        Value::from(1.5),
        Value::from("text"),
        Value::from(vec![1, 2]),
        Value::from(Object::new()),
        instance("Foo", "x"),
    ] {
        assert!(validator.validate(&element).is_ok(), "rejected {element}");
    }
}

#[test]
fn test_primitive_kinds_match_exactly() {
    let cases = [
        ("bool", Value::from(false)),
        ("int", Value::from(7)),
        ("float", Value::from(7.0)),
        ("string", Value::from("7")),
        ("array", Value::from(vec!["a"])),
        ("object", Value::from(Object::new())),
    ];

    for (declared, _) in &cases {
        let validator = TypeValidator::new(Some(*declared)).unwrap();
        for (other, element) in &cases {
            assert_eq!(
                validator.accepts(element),
                declared == other,
                "{declared} vs {other}"
            );
        }
    }
}

#[test]
fn test_aliases_normalize() {
    for (alias, kind) in [
        ("boolean", PrimitiveKind::Bool),
        ("integer", PrimitiveKind::Int),
        ("double", PrimitiveKind::Float),
    ] {
        let validator = TypeValidator::new(Some(alias)).unwrap();
        assert_eq!(validator.declared_type(), Some(&TypeDescriptor::Primitive(kind)));
        assert_eq!(validator.type_name(), Some(kind.name()));
    }
}

#[test]
fn test_int_rejects_numeric_string() {
    let validator = TypeValidator::new(Some("int")).unwrap();
    assert!(validator.validate(&Value::from(1)).is_ok());

    let err = validator.validate(&Value::from("1")).unwrap_err();
    assert!(err.is_type_mismatch());
    match err {
        typed_collections::Error::Type(type_err) => {
            assert_eq!(type_err.expected(), Some("int"));
            assert_eq!(type_err.actual(), Some("string"));
        }
        other => panic!("Expected type error, got: {other:?}"),
    }
}

#[test]
fn test_null_never_satisfies_declared_type() {
    for declared in ["bool", "int", "float", "string", "array", "object"] {
        let validator = TypeValidator::new(Some(declared)).unwrap();
        assert!(!validator.accepts(&Value::Null), "{declared} accepted null");
    }
    assert!(validator("Foo").validate(&Value::Null).is_err());
}

#[test]
fn test_int_and_float_are_distinct() {
    let floats = TypeValidator::new(Some("float")).unwrap();
    assert!(!floats.accepts(&Value::from(1)));
    assert!(floats.accepts(&Value::from(1.0)));
}

// ===== CONSTRUCTION =====

#[test]
fn test_invalid_declared_type_fails_fast() {
    let err = TypeValidator::new(Some("nonsense")).unwrap_err();
    assert!(err.is_configuration_error());
    assert!(matches!(
        err,
        typed_collections::Error::Type(TypeError::InvalidDeclaredType { ref declared, .. })
            if declared == "nonsense"
    ));
    assert!(err.to_string().contains("bool, int, float, string, array, object"));
}

#[test]
fn test_class_names_need_a_registry() {
    assert!(TypeValidator::new(Some("Foo")).is_err());
    assert!(test_registry().validator(Some("Foo")).is_ok());
}

// ===== CLASSES AND INTERFACES =====

#[test]
fn test_class_accepts_subclasses() {
    let foos = validator("Foo");
    assert!(foos.validate(&instance("Foo", "a")).is_ok());
    assert!(foos.validate(&instance("Bar", "b")).is_ok());

    let err = foos.validate(&instance("Baz", "c")).unwrap_err();
    assert_eq!(err.to_string(), "Element must be of type Foo. Baz given");
}

#[test]
fn test_subclass_rejects_parent() {
    let bars = validator("Bar");
    assert!(!bars.accepts(&instance("Foo", "a")));
    assert!(bars.accepts(&instance("Bar", "b")));
}

#[test]
fn test_interface_accepts_implementers() {
    let named = validator("Named");
    assert!(named.accepts(&instance("Foo", "a")));
    assert!(named.accepts(&instance("Bar", "b")));
    assert!(!named.accepts(&instance("Baz", "c")));
}

#[test]
fn test_anonymous_objects_match_object_only() {
    let anonymous = tagged("a");
    assert!(TypeValidator::new(Some("object")).unwrap().accepts(&anonymous));
    assert!(!validator("Foo").accepts(&anonymous));

    let err = validator("Named").validate(&anonymous).unwrap_err();
    assert_eq!(err.to_string(), "Element must be of type Named. object given");
}

#[test]
fn test_class_instances_are_objects() {
    let objects = TypeValidator::new(Some("object")).unwrap();
    assert!(objects.accepts(&instance("Baz", "a")));
}
