//! Sort command - prints a document in natural element order.

use std::cmp::Ordering;

use typed_collections::{TypeRegistry, Value};

use crate::cli::SortArgs;
use crate::input::{self, Document};
use crate::output::OutputFormat;

/// Sort the document in place. Maps keep each element under its key.
fn sort(document: &mut Document, reverse: bool) {
    let comparator = |a: &Value, b: &Value| -> Ordering {
        if reverse {
            b.natural_cmp(a)
        } else {
            a.natural_cmp(b)
        }
    };

    match document {
        Document::Map(map) => {
            map.sort_by(comparator);
        }
        Document::Sequence(sequence) => {
            sequence.sort_by(comparator);
        }
    }
}

/// Render the document as JSON, pretty-printed when `pretty` is set
fn render(document: &Document, pretty: bool) -> serde_json::Result<String> {
    match (document, pretty) {
        (Document::Map(map), true) => serde_json::to_string_pretty(map),
        (Document::Map(map), false) => serde_json::to_string(map),
        (Document::Sequence(sequence), true) => serde_json::to_string_pretty(sequence),
        (Document::Sequence(sequence), false) => serde_json::to_string(sequence),
    }
}

/// Run the sort command
pub fn run(
    args: &SortArgs,
    registry: &TypeRegistry,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut document = input::load(&args.input, registry)?;
    sort(&mut document, args.reverse);
    tracing::debug!(
        kind = document.kind(),
        reverse = args.reverse,
        "Sorted document"
    );

    println!("{}", render(&document, format == OutputFormat::Human)?);
    Ok(())
}
