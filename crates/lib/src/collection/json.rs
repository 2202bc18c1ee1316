//! JSON import shared by Map and Sequence.

use crate::{Result, collection::CollectionError, types::TypeValidator, value::Value};

/// Top-level JSON shapes a collection can be populated from.
#[derive(Debug)]
pub(crate) enum Document {
    /// A JSON object, fields in document order
    Entries(Vec<(String, Value)>),
    /// A JSON array
    Values(Vec<Value>),
}

/// Parses JSON text into entries or values.
///
/// Fails with [`CollectionError::UnexpectedJson`] when the top level is a scalar.
pub(crate) fn decode(json: &str, expected: &str) -> Result<Document> {
    match serde_json::from_str::<Value>(json)? {
        Value::Object(object) => Ok(Document::Entries(object.into_fields().into_iter().collect())),
        Value::List(values) => Ok(Document::Values(values)),
        other => Err(CollectionError::UnexpectedJson {
            expected: expected.to_string(),
            found: other.type_name().to_string(),
        }
        .into()),
    }
}

/// Instantiates anonymous objects as the validator's class, when it declares one.
///
/// Decoded JSON carries no class information. Every object becomes an instance of
/// exactly the declared class, so a class-typed collection reloads its own JSON only
/// when its elements are of that exact class: subclass instances come back as the
/// declared class, and interface-typed collections get no class at all and reject
/// every object.
pub(crate) fn hydrate(validator: &TypeValidator, element: Value) -> Value {
    let class = validator
        .declared_type()
        .and_then(|declared| declared.class());
    match (class, element) {
        (Some(class), Value::Object(object)) => Value::Object(object.into_class(class)),
        (_, element) => element,
    }
}
