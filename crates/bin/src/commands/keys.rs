//! Keys command - lists map keys or sequence positions.

use typed_collections::{TypeRegistry, Value};

use crate::cli::KeysArgs;
use crate::input::{self, Document};
use crate::output::OutputFormat;

/// The document's keys in order: strings for maps, positions for sequences
fn keys(document: &Document) -> Vec<Value> {
    let keys = match document {
        Document::Map(map) => map.keys(),
        Document::Sequence(sequence) => sequence.keys(),
    };
    keys.into_vec()
}

/// Run the keys command
pub fn run(
    args: &KeysArgs,
    registry: &TypeRegistry,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = input::load(&args.input, registry)?;
    let keys = keys(&document);

    match format {
        OutputFormat::Human => {
            for key in &keys {
                println!("{key}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&keys)?);
        }
    }

    Ok(())
}
