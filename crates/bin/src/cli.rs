//! CLI argument definitions for the tcoll binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

/// Output format flag
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Format {
    /// Aligned text for terminals
    #[default]
    Human,
    /// One JSON document per invocation
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Human => OutputFormat::Human,
            Format::Json => OutputFormat::Json,
        }
    }
}

/// Inspect JSON documents as runtime-typed collections
#[derive(Parser, Debug)]
#[command(name = "tcoll")]
#[command(about = "Load, validate, sort and query typed collections stored as JSON")]
#[command(version)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human", env = "TCOLL_FORMAT")]
    pub format: Format,

    /// Class and interface definitions, as a JSON document
    #[arg(long, global = true, env = "TCOLL_TYPES")]
    pub types: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a document and validate every element against the declared type
    Check(CheckArgs),
    /// Print the document sorted by natural element order
    Sort(SortArgs),
    /// Print the keys of a map or the positions of a sequence
    Keys(KeysArgs),
    /// Find the element whose object field renders as the given key
    Lookup(LookupArgs),
}

/// Arguments shared by every command: the input document and its declared type
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// JSON document: an object loads as a map, an array as a sequence
    pub file: PathBuf,

    /// Declared element type (a primitive, class, or interface name)
    #[arg(short = 't', long = "type", env = "TCOLL_TYPE")]
    pub declared: Option<String>,
}

/// Arguments for the check command
#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the sort command
#[derive(clap::Args, Debug)]
pub struct SortArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Sort in descending order
    #[arg(short, long)]
    pub reverse: bool,
}

/// Arguments for the keys command
#[derive(clap::Args, Debug)]
pub struct KeysArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the lookup command
#[derive(clap::Args, Debug)]
pub struct LookupArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Object field to index on
    #[arg(short, long)]
    pub field: String,

    /// Index key to look up
    #[arg(short, long)]
    pub key: String,
}
