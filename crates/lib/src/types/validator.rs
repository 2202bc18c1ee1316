//! Element type validation.

use crate::{
    Result,
    types::{TypeDescriptor, TypeError, TypeRegistry},
    value::Value,
};

/// Validates candidate elements against an optional declared type.
///
/// Every collection owns one validator, created alongside it. The declared type is
/// resolved at construction and never changes afterwards; a malformed declaration is
/// rejected there, before any element is stored.
///
/// ```
/// use typed_collections::{TypeValidator, Value};
///
/// let validator = TypeValidator::new(Some("int")).unwrap();
/// assert!(validator.validate(&Value::Int(1)).is_ok());
///
/// let err = validator.validate(&Value::from("1")).unwrap_err();
/// assert_eq!(err.to_string(), "Element must be of type int. string given");
///
/// assert!(TypeValidator::new(Some("nonsense")).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeValidator {
    declared: Option<TypeDescriptor>,
}

impl TypeValidator {
    /// A validator that accepts every element.
    pub fn untyped() -> Self {
        Self { declared: None }
    }

    /// Build a validator from an optional primitive type spelling.
    ///
    /// Class and interface names are not resolvable here; use
    /// [`TypeValidator::with_registry`] for those.
    pub fn new(declared: Option<&str>) -> Result<Self> {
        Self::with_registry(declared, &TypeRegistry::new())
    }

    /// Build a validator resolving the declared type against `registry`.
    pub fn with_registry(declared: Option<&str>, registry: &TypeRegistry) -> Result<Self> {
        let declared = declared.map(|name| registry.resolve(name)).transpose()?;
        Ok(Self { declared })
    }

    /// Build a validator from an already resolved type.
    pub fn from_descriptor(declared: Option<TypeDescriptor>) -> Self {
        Self { declared }
    }

    /// The declared type, or `None` for an untyped validator
    pub fn declared_type(&self) -> Option<&TypeDescriptor> {
        self.declared.as_ref()
    }

    /// The declared type's name, or `None` for an untyped validator
    pub fn type_name(&self) -> Option<&str> {
        self.declared.as_ref().map(TypeDescriptor::name)
    }

    /// Returns true if no type was declared
    pub fn is_untyped(&self) -> bool {
        self.declared.is_none()
    }

    /// Returns true if `element` satisfies the declared type.
    pub fn accepts(&self, element: &Value) -> bool {
        self.declared
            .as_ref()
            .is_none_or(|declared| declared.matches(element))
    }

    /// Check `element` against the declared type.
    ///
    /// # Errors
    /// Returns [`TypeError::Mismatch`] carrying the expected and actual type names when
    /// the element does not satisfy the declared type.
    pub fn validate(&self, element: &Value) -> Result<()> {
        let Some(declared) = &self.declared else {
            return Ok(());
        };
        if declared.matches(element) {
            return Ok(());
        }

        let actual = element.type_name();
        tracing::debug!(expected = %declared, actual = %actual, "Rejected element");
        Err(TypeError::Mismatch {
            expected: declared.name().to_string(),
            actual: actual.to_string(),
        }
        .into())
    }
}
