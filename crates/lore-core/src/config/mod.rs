//! Configuration management for Lore
//!
//! A [`MemoryConfig`] is built once at startup (defaults, then an optional
//! config file, then environment overrides), validated, and handed to
//! [`crate::memory::MemoryService`] behind an `Arc`.

pub mod defaults;
pub mod env_loader;
pub mod file_loader;
pub mod logging_config;
pub mod model;
pub mod validation;

pub use env_loader::apply_env_overrides;
pub use file_loader::{load_from_file, save_to_file};
pub use logging_config::LoggingConfig;
pub use model::{AgentOverrides, MemoryConfig, MemoryLimits, SectionRule};

use crate::error::LoreResult;
use std::path::Path;

/// Load, override and validate configuration in one step
pub fn load_config(path: Option<&Path>) -> LoreResult<MemoryConfig> {
    let mut config = match path {
        Some(path) => load_from_file(path)?,
        None => MemoryConfig::default(),
    };
    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}
