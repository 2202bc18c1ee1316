//! Error types for collection operations.
//!
//! This module defines the structured errors raised by Map and Sequence lookups,
//! index queries, positional writes and JSON import. Type violations on insertion are
//! reported as [`crate::types::TypeError`] instead.

use thiserror::Error;

/// Structured error types for collection operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CollectionError {
    /// No element is stored under the key or position
    #[error("Element with key '{key}' does not exist")]
    KeyNotFound { key: String },

    /// A secondary index has no entry for the index key
    #[error("Key '{key}' does not exist within index '{index}'")]
    IndexKeyNotFound { index: String, key: String },

    /// No secondary index is registered under the id
    #[error("Index '{id}' not found")]
    UnknownIndex { id: String },

    /// A positional write on a Sequence named an explicit offset
    #[error("Cannot set element at offset {offset}. Sequences must be sequential")]
    NonSequentialWrite { offset: usize },

    /// A keyless write on a Map
    #[error("Cannot set a map element without a key")]
    MissingOffset,

    /// A field read over an element that is not an object
    #[error("Cannot read field '{field}' from element '{key}': {found} given")]
    NotAnObject {
        field: String,
        key: String,
        found: String,
    },

    /// JSON input whose top-level shape cannot populate the collection
    #[error("Expected a JSON {expected}, found {found}")]
    UnexpectedJson { expected: String, found: String },
}

impl CollectionError {
    /// Check if this error indicates a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CollectionError::KeyNotFound { .. } | CollectionError::IndexKeyNotFound { .. }
        )
    }

    /// Check if this error references an unregistered index
    pub fn is_unknown_index(&self) -> bool {
        matches!(self, CollectionError::UnknownIndex { .. })
    }

    /// Check if this error is an illegal write
    pub fn is_illegal_operation(&self) -> bool {
        matches!(
            self,
            CollectionError::NonSequentialWrite { .. } | CollectionError::MissingOffset
        )
    }

    /// Get the key if this is a key-related error
    pub fn key(&self) -> Option<&str> {
        match self {
            CollectionError::KeyNotFound { key }
            | CollectionError::IndexKeyNotFound { key, .. }
            | CollectionError::NotAnObject { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Get the index id if this is an index-related error
    pub fn index(&self) -> Option<&str> {
        match self {
            CollectionError::IndexKeyNotFound { index, .. } => Some(index),
            CollectionError::UnknownIndex { id } => Some(id),
            _ => None,
        }
    }
}

impl From<CollectionError> for crate::Error {
    fn from(err: CollectionError) -> Self {
        crate::Error::Collection(err)
    }
}
