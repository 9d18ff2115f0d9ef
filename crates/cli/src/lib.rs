//! Command-line front end for the complexity classification pipeline

pub mod cli;
pub mod commands;
pub mod completions;

use std::path::Path;

use anyhow::Result;
use complexity_common::Config;
use tracing::warn;

/// Load `path`, or the built-in defaults when the file does not exist.
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Ok(Config::from_file(path)?)
    } else {
        warn!("Config file {} not found, using defaults", path.display());
        Ok(Config::default_config())
    }
}
