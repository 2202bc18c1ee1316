//! Object values: named fields with an optional class.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{types::Class, value::Value};

/// An object element.
///
/// Fields keep their insertion order. An object with a class is an instance of that
/// class (and, polymorphically, of its ancestors and interfaces). An object without a
/// class is anonymous; it satisfies the primitive `object` type and nothing more.
///
/// Two objects are equal when their class names match and they hold the same fields
/// with equal values, regardless of field order.
///
/// ```
/// use typed_collections::Object;
///
/// let point = Object::new().with("x", 1).with("y", 2);
/// assert_eq!(point.get("x").and_then(|v| v.as_int()), Some(1));
/// assert!(point.class().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Object {
    class: Option<Arc<Class>>,
    fields: IndexMap<String, Value>,
}

impl Object {
    /// Create an anonymous object with no fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty instance of `class`
    pub fn of_class(class: Arc<Class>) -> Self {
        Self {
            class: Some(class),
            fields: IndexMap::new(),
        }
    }

    /// Create an anonymous object from fields, keeping their order
    pub fn from_fields(fields: IndexMap<String, Value>) -> Self {
        Self {
            class: None,
            fields,
        }
    }

    /// The object's class, if it has one
    pub fn class(&self) -> Option<&Arc<Class>> {
        self.class.as_ref()
    }

    /// The object's class name, if it has one
    pub fn class_name(&self) -> Option<&str> {
        self.class.as_deref().map(Class::name)
    }

    /// Returns true if this object is an instance of class or interface `name`
    pub fn is_instance_of(&self, name: &str) -> bool {
        self.class.as_ref().is_some_and(|class| class.is_a(name))
    }

    /// Makes an anonymous object an instance of `class`. Objects that already have a
    /// class keep it.
    pub fn into_class(mut self, class: &Arc<Class>) -> Self {
        if self.class.is_none() {
            self.class = Some(Arc::clone(class));
        }
        self
    }

    /// Gets a field value
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Gets a mutable field value
    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.fields.get_mut(field)
    }

    /// Sets a field, returning the previous value
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Builder-style field setter
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Removes a field, keeping the order of the remaining ones
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.shift_remove(field)
    }

    /// Returns true if the field is present
    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterates over fields in order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the object has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consumes the object, returning its fields
    pub fn into_fields(self) -> IndexMap<String, Value> {
        self.fields
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.class_name() == other.class_name() && self.fields == other.fields
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_fields(
            iter.into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}
