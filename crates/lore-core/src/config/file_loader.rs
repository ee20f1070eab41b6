//! File-based configuration loading

use super::model::MemoryConfig;
use crate::error::{LoreError, LoreResult};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
    Yaml,
}

fn format_of(path: &Path) -> Format {
    match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => Format::Toml,
        Some("yaml") | Some("yml") => Format::Yaml,
        _ => Format::Json,
    }
}

/// Load configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension.
/// Returns default config if file doesn't exist.
pub fn load_from_file(path: &Path) -> LoreResult<MemoryConfig> {
    if !path.exists() {
        return Ok(MemoryConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        LoreError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    let config = match format_of(path) {
        Format::Toml => toml::from_str(&content).map_err(|e| {
            LoreError::config_with_context(
                format!("Failed to parse TOML config: {}", e),
                format!("Deserializing TOML configuration from '{}'", path.display()),
            )
        })?,
        Format::Yaml => serde_yaml::from_str(&content).map_err(|e| {
            LoreError::config_with_context(
                format!("Failed to parse YAML config: {}", e),
                format!("Deserializing YAML configuration from '{}'", path.display()),
            )
        })?,
        Format::Json => serde_json::from_str(&content).map_err(|e| {
            LoreError::config_with_context(
                format!("Failed to parse JSON config: {}", e),
                format!("Deserializing JSON configuration from '{}'", path.display()),
            )
        })?,
    };

    Ok(config)
}

/// Write configuration to a file in the format implied by its extension
pub fn save_to_file(config: &MemoryConfig, path: &Path) -> LoreResult<()> {
    let content = match format_of(path) {
        Format::Toml => toml::to_string_pretty(config)
            .map_err(|e| LoreError::config(format!("Failed to serialize TOML config: {}", e)))?,
        Format::Yaml => serde_yaml::to_string(config)
            .map_err(|e| LoreError::config(format!("Failed to serialize YAML config: {}", e)))?,
        Format::Json => serde_json::to_string_pretty(config)
            .map_err(|e| LoreError::config(format!("Failed to serialize JSON config: {}", e)))?,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| LoreError::config(format!("Failed to create directory: {}", e)))?;
    }

    fs::write(path, content).map_err(|e| {
        LoreError::config_with_context(
            format!("Failed to write config file: {}", e),
            format!("Writing configuration to '{}'", path.display()),
        )
    })?;

    tracing::debug!("Saved configuration to {}", path.display());
    Ok(())
}
