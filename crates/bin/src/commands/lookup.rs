//! Lookup command - finds an element through an index over one object field.

use typed_collections::{TypeRegistry, Value, collection::index::by_field};

use crate::cli::LookupArgs;
use crate::input::{self, Document};
use crate::output::OutputFormat;

const INDEX_ID: &str = "lookup";

/// Index the document on `field` and return the matching element with its key or position.
///
/// A miss is an error, so the process exits non-zero.
fn lookup(
    document: &mut Document,
    field: &str,
    key: &str,
) -> typed_collections::Result<(Value, Value)> {
    match document {
        Document::Map(map) => {
            map.add_index_fn(INDEX_ID, by_field(field));
            let element = map.get_by(INDEX_ID, key)?.clone();
            let primary = map
                .get_index(INDEX_ID)
                .and_then(|index| index.get(key))
                .map_or(Value::Null, Value::from);
            Ok((primary, element))
        }
        Document::Sequence(sequence) => {
            sequence.add_index_fn(INDEX_ID, by_field(field));
            let element = sequence.get_by(INDEX_ID, key)?.clone();
            let primary = sequence
                .get_index(INDEX_ID)
                .and_then(|index| index.get(key))
                .map_or(Value::Null, |position| Value::from(*position));
            Ok((primary, element))
        }
    }
}

/// Run the lookup command
pub fn run(
    args: &LookupArgs,
    registry: &TypeRegistry,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut document = input::load(&args.input, registry)?;
    let (primary, element) = lookup(&mut document, &args.field, &args.key)?;
    tracing::debug!(field = %args.field, key = %args.key, %primary, "Found element");

    match format {
        OutputFormat::Human => {
            println!("Key:      {primary}");
            println!("Element:  {}", serde_json::to_string_pretty(&element)?);
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "key": primary,
                "element": element,
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }

    Ok(())
}
