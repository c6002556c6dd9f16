// src/config/io.rs
use super::types::{Config, FdlToml};
use crate::error::ConfigError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

pub const CONFIG_FILE: &str = "fdlgraph.toml";

/// Reads `path` into `config`. A missing file leaves the defaults untouched;
/// any other read failure is an error.
pub fn load_toml_config(config: &mut Config, path: &Path) -> Result<(), ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(());
        }
        Err(e) => return Err(ConfigError::io(e, path)),
    };
    parse_toml(config, &content).map_err(|source| ConfigError::Toml {
        source,
        path: path.to_path_buf(),
    })?;
    debug!(path = %path.display(), "config loaded");
    Ok(())
}

pub fn parse_toml(config: &mut Config, content: &str) -> Result<(), toml::de::Error> {
    let parsed: FdlToml = toml::from_str(content)?;
    config.layout = parsed.layout;
    config.labelprop = parsed.labelprop;
    config.ranking = parsed.ranking;
    config.export = parsed.export;
    config.ingest = parsed.ingest;
    config.preferences = parsed.preferences;
    Ok(())
}

/// Writes `config` to `path` as TOML.
pub fn save_to_file(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let file = FdlToml {
        layout: config.layout.clone(),
        labelprop: config.labelprop.clone(),
        ranking: config.ranking.clone(),
        export: config.export.clone(),
        ingest: config.ingest.clone(),
        preferences: config.preferences.clone(),
    };
    let content = toml::to_string_pretty(&file)?;
    fs::write(path, content).map_err(|e| ConfigError::io(e, path))
}
