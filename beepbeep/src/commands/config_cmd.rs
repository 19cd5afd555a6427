//! `beepbeep config`: inspect or create the config file.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{default_config_path, Config};

/// Print the effective configuration as TOML.
pub fn show(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write the default configuration to `path` or the default location.
pub fn init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => default_config_path().context("No config directory on this platform; pass --config")?,
    };

    Config::default().write_to(&path, force)?;
    println!("{} Wrote {}", "✓".green().bold(), path.display());
    Ok(())
}
