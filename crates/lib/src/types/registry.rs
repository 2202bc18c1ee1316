//! Class and interface registry.
//!
//! Collections may declare a class or interface name as their element type. Rust has no
//! runtime reflection, so the set of known classes and interfaces, along with their
//! inheritance relationships, is configured explicitly through a [`TypeRegistry`].
//! Parents must be registered before their children, which keeps the hierarchy acyclic.
//!
//! A registry can be built programmatically or loaded from a [`TypeDefinitions`]
//! document:
//!
//! ```
//! use typed_collections::types::{ClassDef, InterfaceDef, TypeRegistry};
//!
//! let mut registry = TypeRegistry::new();
//! registry.define_interface(InterfaceDef::new("Named")).unwrap();
//! registry
//!     .define_class(ClassDef::new("Animal").implements("Named"))
//!     .unwrap();
//! let dog = registry.define_class(ClassDef::new("Dog").extends("Animal")).unwrap();
//!
//! assert!(dog.is_a("Animal"));
//! assert!(dog.is_a("Named"));
//! assert!(!dog.is_a("Cat"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    types::{PrimitiveKind, TypeDescriptor, TypeError, TypeValidator},
    value::Object,
};

/// A registered interface.
#[derive(Debug)]
pub struct Interface {
    name: String,
    extends: Vec<Arc<Interface>>,
}

impl Interface {
    /// The interface name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Interfaces this interface directly extends
    pub fn parents(&self) -> &[Arc<Interface>] {
        &self.extends
    }

    /// Returns true if this interface is `name` or extends it, directly or transitively.
    pub fn is_a(&self, name: &str) -> bool {
        self.name == name || self.extends.iter().any(|parent| parent.is_a(name))
    }
}

impl PartialEq for Interface {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A registered class.
///
/// Objects carry an `Arc<Class>`, so instance-of checks walk the hierarchy stored here
/// without consulting the registry again.
#[derive(Debug)]
pub struct Class {
    name: String,
    parent: Option<Arc<Class>>,
    interfaces: Vec<Arc<Interface>>,
}

impl Class {
    /// The class name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The direct parent class, if any
    pub fn parent(&self) -> Option<&Arc<Class>> {
        self.parent.as_ref()
    }

    /// Interfaces this class declares directly
    pub fn interfaces(&self) -> &[Arc<Interface>] {
        &self.interfaces
    }

    /// Returns true if this class is `name`, descends from it, or implements it.
    ///
    /// This is the polymorphic instance-of check used by element validation.
    pub fn is_a(&self, name: &str) -> bool {
        self.name == name
            || self.interfaces.iter().any(|iface| iface.is_a(name))
            || self.parent.as_ref().is_some_and(|parent| parent.is_a(name))
    }

    /// Returns true if this class or one of its ancestors implements interface `name`.
    pub fn implements(&self, name: &str) -> bool {
        self.interfaces.iter().any(|iface| iface.is_a(name))
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.implements(name))
    }

    /// Returns true if `name` is a strict ancestor of this class.
    pub fn is_subclass_of(&self, name: &str) -> bool {
        let mut current = self.parent.as_ref();
        while let Some(class) = current {
            if class.name == name {
                return true;
            }
            current = class.parent.as_ref();
        }
        false
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Definition of an interface to register.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDef {
    pub name: String,
    #[serde(default)]
    pub extends: Vec<String>,
}

impl InterfaceDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: Vec::new(),
        }
    }

    /// Adds a parent interface
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends.push(parent.into());
        self
    }
}

/// Definition of a class to register.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    pub name: String,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub implements: Vec<String>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: None,
            implements: Vec::new(),
        }
    }

    /// Sets the parent class
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    /// Adds an implemented interface
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }
}

/// A serializable set of type definitions.
///
/// Interfaces are registered first, then classes, each in document order.
///
/// ```json
/// {
///   "interfaces": [{ "name": "Named" }],
///   "classes": [
///     { "name": "Animal", "implements": ["Named"] },
///     { "name": "Dog", "extends": "Animal" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinitions {
    #[serde(default)]
    pub interfaces: Vec<InterfaceDef>,
    #[serde(default)]
    pub classes: Vec<ClassDef>,
}

/// The set of classes and interfaces a declared type may name.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    classes: HashMap<String, Arc<Class>>,
    interfaces: HashMap<String, Arc<Interface>>,
}

impl TypeRegistry {
    /// Create an empty registry. Only primitive declared types resolve against it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a set of definitions.
    pub fn from_definitions(definitions: TypeDefinitions) -> Result<Self> {
        let mut registry = Self::new();
        for interface in definitions.interfaces {
            registry.define_interface(interface)?;
        }
        for class in definitions.classes {
            registry.define_class(class)?;
        }
        Ok(registry)
    }

    /// Build a registry from a JSON [`TypeDefinitions`] document.
    pub fn from_json(json: &str) -> Result<Self> {
        let definitions: TypeDefinitions = serde_json::from_str(json)?;
        Self::from_definitions(definitions)
    }

    /// Register an interface. Every parent must already be registered as an interface.
    pub fn define_interface(&mut self, def: InterfaceDef) -> Result<Arc<Interface>> {
        self.check_new_name(&def.name)?;

        let extends = def
            .extends
            .iter()
            .map(|parent| self.require_interface(parent))
            .collect::<Result<Vec<_>>>()?;

        let interface = Arc::new(Interface {
            name: def.name.clone(),
            extends,
        });
        tracing::debug!(interface = %def.name, "Registered interface");
        self.interfaces.insert(def.name, Arc::clone(&interface));
        Ok(interface)
    }

    /// Register a class. Its parent must already be registered as a class and every
    /// implemented name as an interface.
    pub fn define_class(&mut self, def: ClassDef) -> Result<Arc<Class>> {
        self.check_new_name(&def.name)?;

        let parent = def
            .extends
            .as_deref()
            .map(|parent| self.require_class(parent))
            .transpose()?;
        let interfaces = def
            .implements
            .iter()
            .map(|iface| self.require_interface(iface))
            .collect::<Result<Vec<_>>>()?;

        let class = Arc::new(Class {
            name: def.name.clone(),
            parent,
            interfaces,
        });
        tracing::debug!(class = %def.name, "Registered class");
        self.classes.insert(def.name, Arc::clone(&class));
        Ok(class)
    }

    /// Look up a class by name
    pub fn class(&self, name: &str) -> Option<&Arc<Class>> {
        self.classes.get(name)
    }

    /// Look up an interface by name
    pub fn interface(&self, name: &str) -> Option<&Arc<Interface>> {
        self.interfaces.get(name)
    }

    /// Registered class names, sorted
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered interface names, sorted
    pub fn interface_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.interfaces.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve a declared type name to a descriptor.
    ///
    /// Primitive aliases take precedence, then classes, then interfaces. Anything else
    /// fails with [`TypeError::InvalidDeclaredType`].
    pub fn resolve(&self, declared: &str) -> Result<TypeDescriptor> {
        if let Some(kind) = PrimitiveKind::from_alias(declared) {
            return Ok(TypeDescriptor::Primitive(kind));
        }
        if let Some(class) = self.classes.get(declared) {
            return Ok(TypeDescriptor::Class(Arc::clone(class)));
        }
        if let Some(interface) = self.interfaces.get(declared) {
            return Ok(TypeDescriptor::Interface(Arc::clone(interface)));
        }
        Err(TypeError::InvalidDeclaredType {
            declared: declared.to_string(),
            valid: PrimitiveKind::valid_names(),
        }
        .into())
    }

    /// Build a validator for an optional declared type resolved against this registry.
    pub fn validator(&self, declared: Option<&str>) -> Result<TypeValidator> {
        TypeValidator::with_registry(declared, self)
    }

    /// Create an empty object of a registered class.
    pub fn new_object(&self, class: &str) -> Result<Object> {
        Ok(Object::of_class(self.require_class(class)?))
    }

    fn check_new_name(&self, name: &str) -> Result<()> {
        if PrimitiveKind::is_reserved(name) {
            return Err(TypeError::ReservedName {
                name: name.to_string(),
            }
            .into());
        }
        if self.classes.contains_key(name) || self.interfaces.contains_key(name) {
            return Err(TypeError::DuplicateType {
                name: name.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn require_class(&self, name: &str) -> Result<Arc<Class>> {
        if let Some(class) = self.classes.get(name) {
            return Ok(Arc::clone(class));
        }
        if self.interfaces.contains_key(name) {
            return Err(TypeError::KindMismatch {
                name: name.to_string(),
                expected: "class".to_string(),
            }
            .into());
        }
        Err(TypeError::UnknownType {
            name: name.to_string(),
        }
        .into())
    }

    fn require_interface(&self, name: &str) -> Result<Arc<Interface>> {
        if let Some(interface) = self.interfaces.get(name) {
            return Ok(Arc::clone(interface));
        }
        if self.classes.contains_key(name) {
            return Err(TypeError::KindMismatch {
                name: name.to_string(),
                expected: "interface".to_string(),
            }
            .into());
        }
        Err(TypeError::UnknownType {
            name: name.to_string(),
        }
        .into())
    }
}
