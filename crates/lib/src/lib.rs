//!
//! Typed Collections: runtime-type-checked Map and Sequence containers.
//! This library provides ordered collections that enforce a declared element type on
//! every insertion and keep secondary lookup indexes consistent as they mutate.
//!
//! ## Core Concepts
//!
//! * **Values (`value::Value`)**: The dynamic element type: null, bool, int, float, string, array, or object. Objects may be instances of a registered class.
//! * **Validators (`types::TypeValidator`)**: Hold an optional declared type (a primitive kind, a class, or an interface) and check candidate elements against it.
//! * **Type registries (`types::TypeRegistry`)**: Make class and interface names resolvable, including parent classes and implemented interfaces.
//! * **Maps (`collection::Map`)**: Ordered string keys to elements. Numeric keys are stored in string form.
//! * **Sequences (`collection::Sequence`)**: Dense positions `0..len` to elements. Operations that move positions reindex.
//! * **Indexes (`collection::index::Index`)**: Derived lookup tables mapping a computed key to an element's key or position, queried with `get_by`.

pub mod collection;
pub mod constants;
pub mod types;
pub mod value;

pub use collection::{Collection, Map, OffsetAccess, Sequence};
pub use types::{TypeRegistry, TypeValidator};
pub use value::{Object, Value};

/// Result type used throughout the Typed Collections library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Typed Collections library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured type errors from the types module
    #[error(transparent)]
    Type(types::TypeError),

    /// Structured collection errors from the collection module
    #[error(transparent)]
    Collection(collection::CollectionError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Type(_) => "types",
            Error::Collection(_) => "collection",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a key, position, or index key was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Collection(collection_err) => collection_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is type-related.
    pub fn is_type_error(&self) -> bool {
        matches!(self, Error::Type(_))
    }

    /// Check if this error is an element rejected by a declared type.
    pub fn is_type_mismatch(&self) -> bool {
        match self {
            Error::Type(type_err) => type_err.is_mismatch(),
            _ => false,
        }
    }

    /// Check if this error is a malformed declared type or registry definition.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Error::Type(type_err) => {
                type_err.is_invalid_declaration() || type_err.is_registry_error()
            }
            _ => false,
        }
    }

    /// Check if this error references an index that was never registered.
    pub fn is_unknown_index(&self) -> bool {
        match self {
            Error::Collection(collection_err) => collection_err.is_unknown_index(),
            _ => false,
        }
    }

    /// Check if this error is a disallowed positional write.
    pub fn is_illegal_operation(&self) -> bool {
        match self {
            Error::Collection(collection_err) => collection_err.is_illegal_operation(),
            _ => false,
        }
    }

    /// Check if this error is a JSON decoding or shape problem.
    pub fn is_serialization_error(&self) -> bool {
        matches!(
            self,
            Error::Serialize(_)
                | Error::Collection(collection::CollectionError::UnexpectedJson { .. })
        )
    }
}
