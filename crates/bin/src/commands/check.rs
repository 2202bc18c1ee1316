//! Check command - loads a document and reports its shape.

use typed_collections::TypeRegistry;

use crate::cli::CheckArgs;
use crate::input::{self, Document};
use crate::output::{OutputFormat, print_table};

/// Summary of a successfully validated document as JSON
fn summary(document: &Document) -> serde_json::Value {
    serde_json::json!({
        "kind": document.kind(),
        "type": document.declared_type(),
        "elements": document.len(),
    })
}

/// Run the check command
pub fn run(
    args: &CheckArgs,
    registry: &TypeRegistry,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = input::load(&args.input, registry)?;

    match format {
        OutputFormat::Human => {
            print_table(
                &["KIND", "TYPE", "ELEMENTS"],
                &[vec![
                    document.kind().to_string(),
                    document.declared_type().unwrap_or("(untyped)").to_string(),
                    document.len().to_string(),
                ]],
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&summary(&document))?);
        }
    }

    Ok(())
}
