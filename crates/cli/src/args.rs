//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// hirecast: announce job postings on social platforms
#[derive(Parser, Debug)]
#[command(name = "hirecast")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the signed publish trigger endpoint
    Serve(ServeArgs),

    /// Publish one job from a trigger request document
    Publish(PublishArgs),

    /// Configuration management
    Config(ConfigArgs),

    /// Validate configuration and show status
    Doctor(DoctorArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides server.bind)
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// JSON request file (use - for stdin)
    #[arg(long)]
    pub file: PathBuf,

    /// Log what would be posted instead of calling platforms
    #[arg(long, conflicts_with = "outbox")]
    pub dry_run: bool,

    /// Write posts to this outbox file for review instead of publishing
    #[arg(long)]
    pub outbox: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./config.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
