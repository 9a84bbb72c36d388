//! Config subcommands handler

use std::path::Path;

use anyhow::{Context, Result};

use ttyplay::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let toml_str = toml::to_string_pretty(&config).context("Failed to serialize config")?;
    print!("{}", toml_str);
    Ok(())
}

/// Print where the config file is looked up.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    let path = Config::config_path().context("No config directory on this platform")?;
    println!("{}", path.display());
    Ok(())
}
