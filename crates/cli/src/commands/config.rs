//! Config command - configuration management

use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use crate::args::{ConfigArgs, ConfigCommands};
use crate::config::AppConfig;

pub async fn execute(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init { path, force } => init_config(path, force).await,
    }
}

async fn init_config(path: PathBuf, force: bool) -> Result<()> {
    if tokio::fs::try_exists(&path).await.unwrap_or(false) && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    tokio::fs::write(&path, AppConfig::example_toml())
        .await
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    println!("Created config file: {}", path.display());
    println!();
    println!("Next steps:");
    println!("  1. Export the credential variables named in the config file");
    println!("  2. Export the queue signing key as HIRECAST_SIGNING_KEY");
    println!("  3. Run 'hirecast doctor' to check platform credentials");
    println!("  4. Run 'hirecast publish --dry-run --file request.json' to test");

    Ok(())
}
