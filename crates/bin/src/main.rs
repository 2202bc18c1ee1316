mod cli;
mod commands;
mod input;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use output::OutputFormat;

fn main() {
    // Logs go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("typed_collections=info,tcoll=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        tracing::debug!(error = ?e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let format = OutputFormat::from(cli.format);
    let registry = input::load_registry(cli.types.as_deref())?;

    match &cli.command {
        Commands::Check(args) => commands::check::run(args, &registry, format),
        Commands::Sort(args) => commands::sort::run(args, &registry, format),
        Commands::Keys(args) => commands::keys::run(args, &registry, format),
        Commands::Lookup(args) => commands::lookup::run(args, &registry, format),
    }
}
