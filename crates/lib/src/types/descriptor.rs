//! Resolved declared types.

use std::fmt;
use std::sync::Arc;

use crate::{
    types::{Class, Interface, PrimitiveKind},
    value::Value,
};

/// A declared element type, resolved once when a collection is built.
///
/// The absence of a declared type (an untyped collection) is represented by
/// `Option::<TypeDescriptor>::None` at the validator level rather than as a variant.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// Exact primitive kind match
    Primitive(PrimitiveKind),
    /// Instance of the class or one of its subclasses
    Class(Arc<Class>),
    /// Instance of any class implementing the interface
    Interface(Arc<Interface>),
}

impl TypeDescriptor {
    /// Returns true if `value` satisfies this type.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            TypeDescriptor::Primitive(kind) => value.kind() == Some(*kind),
            TypeDescriptor::Class(class) => value
                .as_object()
                .and_then(|object| object.class())
                .is_some_and(|actual| actual.is_a(class.name())),
            TypeDescriptor::Interface(interface) => value
                .as_object()
                .and_then(|object| object.class())
                .is_some_and(|actual| actual.implements(interface.name())),
        }
    }

    /// The name this type is reported under
    pub fn name(&self) -> &str {
        match self {
            TypeDescriptor::Primitive(kind) => kind.name(),
            TypeDescriptor::Class(class) => class.name(),
            TypeDescriptor::Interface(interface) => interface.name(),
        }
    }

    /// The class to instantiate decoded JSON objects as, if this is a class type
    pub fn class(&self) -> Option<&Arc<Class>> {
        match self {
            TypeDescriptor::Class(class) => Some(class),
            _ => None,
        }
    }
}

impl From<PrimitiveKind> for TypeDescriptor {
    fn from(kind: PrimitiveKind) -> Self {
        TypeDescriptor::Primitive(kind)
    }
}

impl From<Arc<Class>> for TypeDescriptor {
    fn from(class: Arc<Class>) -> Self {
        TypeDescriptor::Class(class)
    }
}

impl From<Arc<Interface>> for TypeDescriptor {
    fn from(interface: Arc<Interface>) -> Self {
        TypeDescriptor::Interface(interface)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
