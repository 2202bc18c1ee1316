//! The fixed primitive kind table.

use std::fmt;

use crate::constants::PRIMITIVE_ALIASES;

/// Primitive kinds an element can be classified as.
///
/// Every non-null [`crate::Value`] maps to exactly one kind. A declared primitive type
/// matches an element only when the element's kind is equal to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Bool,
    Int,
    Float,
    String,
    Array,
    Object,
}

impl PrimitiveKind {
    /// All kinds, in table order.
    pub const ALL: [PrimitiveKind; 6] = [
        PrimitiveKind::Bool,
        PrimitiveKind::Int,
        PrimitiveKind::Float,
        PrimitiveKind::String,
        PrimitiveKind::Array,
        PrimitiveKind::Object,
    ];

    /// Normalizes a declared type spelling (`"integer"`, `"double"`, ...) to its kind.
    ///
    /// Returns `None` when the name is not a primitive alias. Matching is exact; no
    /// case folding is applied.
    pub fn from_alias(name: &str) -> Option<Self> {
        PRIMITIVE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, kind)| *kind)
    }

    /// Returns true if `name` is reserved by the alias table.
    pub fn is_reserved(name: &str) -> bool {
        Self::from_alias(name).is_some()
    }

    /// The canonical short name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Float => "float",
            PrimitiveKind::String => "string",
            PrimitiveKind::Array => "array",
            PrimitiveKind::Object => "object",
        }
    }

    /// Comma-separated list of canonical names, for configuration errors.
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
