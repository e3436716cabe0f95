//! Kolosal Interpret - Main Entry Point
//!
//! Interprets fitted models and simulates scenarios from JSON request files.

use clap::Parser;
use kolosal_interpret::cli::{cmd_format, cmd_interpret, cmd_simulate, load_config, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kolosal_interpret=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.locale.as_deref())?;

    match cli.command {
        Commands::Interpret { request, json } => {
            cmd_interpret(&request, config, json)?;
        }
        Commands::Simulate { request, json } => {
            cmd_simulate(&request, config, json)?;
        }
        Commands::Format { value, kind, digits, unit } => {
            cmd_format(value, &kind, digits, unit.as_deref(), &config)?;
        }
    }

    Ok(())
}
