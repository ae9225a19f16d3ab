use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the main intercut config directory. It is created on first save.
pub fn intercut_config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Unable to determine user config directory")?
        .join("intercut"))
}

/// Path of the TOML config file
pub fn intercut_config_path() -> Result<PathBuf> {
    Ok(intercut_config_dir()?.join("config.toml"))
}
