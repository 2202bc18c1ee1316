//! Constants used throughout the typed-collections library.
//!
//! This module provides central definitions for the primitive type names that a
//! collection may declare, along with the aliases accepted for each of them.

use crate::types::PrimitiveKind;

/// Accepted spellings for each primitive kind.
///
/// The first column is what a caller may write as a declared type; the second is the
/// kind it normalizes to. The table is fixed at compile time and has no mutation API.
pub const PRIMITIVE_ALIASES: &[(&str, PrimitiveKind)] = &[
    ("bool", PrimitiveKind::Bool),
    ("boolean", PrimitiveKind::Bool),
    ("int", PrimitiveKind::Int),
    ("integer", PrimitiveKind::Int),
    ("float", PrimitiveKind::Float),
    ("double", PrimitiveKind::Float),
    ("string", PrimitiveKind::String),
    ("array", PrimitiveKind::Array),
    ("object", PrimitiveKind::Object),
];

/// Type name reported for [`crate::Value::Null`], which belongs to no primitive kind.
pub const NULL_TYPE_NAME: &str = "null";

/// Index key produced by [`crate::collection::index::by_field`] when the field is absent.
pub const MISSING_FIELD_KEY: &str = "";
