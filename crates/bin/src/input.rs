//! Loading input documents and type definitions from disk.

use std::{error::Error, fs, path::Path};

use typed_collections::{Collection, Map, Sequence, TypeRegistry, TypeValidator};

use crate::cli::InputArgs;

/// A loaded document: JSON objects become maps, JSON arrays become sequences.
#[derive(Debug)]
pub enum Document {
    Map(Map),
    Sequence(Sequence),
}

impl Document {
    /// Parse `json` into a collection guarded by `validator`.
    pub fn parse(json: &str, validator: TypeValidator) -> typed_collections::Result<Self> {
        if json.trim_start().starts_with('{') {
            Ok(Document::Map(Map::from_json(json, validator)?))
        } else {
            Ok(Document::Sequence(Sequence::from_json(json, validator)?))
        }
    }

    /// "map" or "sequence"
    pub fn kind(&self) -> &'static str {
        match self {
            Document::Map(_) => "map",
            Document::Sequence(_) => "sequence",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Document::Map(map) => map.len(),
            Document::Sequence(sequence) => sequence.len(),
        }
    }

    /// Declared element type, or `None` for an untyped collection
    pub fn declared_type(&self) -> Option<&str> {
        match self {
            Document::Map(map) => Collection::validator(map).type_name(),
            Document::Sequence(sequence) => Collection::validator(sequence).type_name(),
        }
    }
}

/// Load class and interface definitions, or an empty registry when no file is given.
pub fn load_registry(path: Option<&Path>) -> Result<TypeRegistry, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(TypeRegistry::new());
    };

    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read type definitions {}: {e}", path.display()))?;
    let registry = TypeRegistry::from_json(&text)?;
    tracing::debug!(
        path = %path.display(),
        classes = registry.class_names().len(),
        interfaces = registry.interface_names().len(),
        "Loaded type definitions"
    );
    Ok(registry)
}

/// Load the document named by `args`, validating every element against its declared type.
pub fn load(args: &InputArgs, registry: &TypeRegistry) -> Result<Document, Box<dyn Error>> {
    let validator = registry.validator(args.declared.as_deref())?;
    let text = fs::read_to_string(&args.file)
        .map_err(|e| format!("Failed to read {}: {e}", args.file.display()))?;

    let document = Document::parse(&text, validator)?;
    tracing::debug!(
        path = %args.file.display(),
        kind = document.kind(),
        elements = document.len(),
        "Loaded document"
    );
    Ok(document)
}
