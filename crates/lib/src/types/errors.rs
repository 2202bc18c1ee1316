//! Error types for type declarations and element validation.
//!
//! Covers the two failure points of the type contract: a declared type that cannot be
//! resolved (rejected when the collection is built), and an element whose runtime type
//! does not satisfy the declared type (rejected when the element is inserted). Registry
//! configuration errors live here as well.

use thiserror::Error;

/// Structured error types for type resolution and validation.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TypeError {
    /// A declared type is neither a primitive alias nor a registered class or interface
    #[error(
        "Invalid type '{declared}'. Must be untyped, one of {valid}, or a registered class or interface"
    )]
    InvalidDeclaredType { declared: String, valid: String },

    /// An element does not satisfy the declared type
    #[error("Element must be of type {expected}. {actual} given")]
    Mismatch { expected: String, actual: String },

    /// A class or interface definition refers to a name that is not registered
    #[error("Unknown class or interface '{name}'")]
    UnknownType { name: String },

    /// A class or interface with this name is already registered
    #[error("Type '{name}' is already defined")]
    DuplicateType { name: String },

    /// A class or interface name collides with a primitive alias
    #[error("Type name '{name}' is reserved for a primitive type")]
    ReservedName { name: String },

    /// A name resolved to a class where an interface was required, or the reverse
    #[error("Type '{name}' is not a registered {expected}")]
    KindMismatch { name: String, expected: String },
}

impl TypeError {
    /// Check if this error rejected an element at insertion time
    pub fn is_mismatch(&self) -> bool {
        matches!(self, TypeError::Mismatch { .. })
    }

    /// Check if this error rejected a declared type at construction time
    pub fn is_invalid_declaration(&self) -> bool {
        matches!(self, TypeError::InvalidDeclaredType { .. })
    }

    /// Check if this error comes from registry configuration
    pub fn is_registry_error(&self) -> bool {
        matches!(
            self,
            TypeError::UnknownType { .. }
                | TypeError::DuplicateType { .. }
                | TypeError::ReservedName { .. }
                | TypeError::KindMismatch { .. }
        )
    }

    /// Get the expected type if this is a mismatch
    pub fn expected(&self) -> Option<&str> {
        match self {
            TypeError::Mismatch { expected, .. } => Some(expected),
            _ => None,
        }
    }

    /// Get the actual type if this is a mismatch
    pub fn actual(&self) -> Option<&str> {
        match self {
            TypeError::Mismatch { actual, .. } => Some(actual),
            _ => None,
        }
    }
}

impl From<TypeError> for crate::Error {
    fn from(err: TypeError) -> Self {
        crate::Error::Type(err)
    }
}
