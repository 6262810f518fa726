//! hirecast CLI entry point

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod args;
mod commands;
mod config;
mod server;

use args::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging, the flag wins over the config file
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| {
            config::AppConfig::load(cli.config.as_deref())
                .ok()
                .map(|c| c.general.log_level)
        })
        .unwrap_or_else(|| "info".to_string());
    init_logging(&log_level)?;

    // Execute command
    match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, cli.config).await,
        Commands::Publish(args) => commands::publish::execute(args, cli.config).await,
        Commands::Config(args) => commands::config::execute(args).await,
        Commands::Doctor(args) => commands::doctor::execute(args, cli.config).await,
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}
