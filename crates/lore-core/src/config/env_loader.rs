//! Environment variable overrides

use super::logging_config::LoggingConfig;
use super::model::MemoryConfig;
use crate::error::{LoreError, LoreResult};
use std::path::PathBuf;

pub const ENV_MEMORIES_DIR: &str = "LORE_MEMORIES_DIR";
pub const ENV_MEMORY_ENABLED: &str = "LORE_MEMORY_ENABLED";
pub const ENV_AUTO_LEARNING: &str = "LORE_AUTO_LEARNING";
pub const ENV_SIMILARITY_THRESHOLD: &str = "LORE_SIMILARITY_THRESHOLD";
pub const ENV_LOG_LEVEL: &str = "LORE_LOG_LEVEL";

/// Apply `LORE_*` environment variables on top of a loaded config
pub fn apply_env_overrides(config: &mut MemoryConfig) -> LoreResult<()> {
    apply_overrides_from(config, |key| std::env::var(key).ok())
}

/// Same as [`apply_env_overrides`] with an injectable lookup, for tests
pub(crate) fn apply_overrides_from(
    config: &mut MemoryConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> LoreResult<()> {
    if let Some(dir) = lookup(ENV_MEMORIES_DIR) {
        config.memories_dir = PathBuf::from(dir);
    }

    if let Some(value) = lookup(ENV_MEMORY_ENABLED) {
        config.enabled = parse_bool(ENV_MEMORY_ENABLED, &value)?;
    }

    if let Some(value) = lookup(ENV_AUTO_LEARNING) {
        config.auto_learning = parse_bool(ENV_AUTO_LEARNING, &value)?;
    }

    if let Some(value) = lookup(ENV_SIMILARITY_THRESHOLD) {
        config.similarity_threshold = value.trim().parse().map_err(|_| {
            LoreError::config(format!(
                "{} must be a number, got '{}'",
                ENV_SIMILARITY_THRESHOLD, value
            ))
        })?;
    }

    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.logging.merge(LoggingConfig {
            level,
            format: String::new(),
        });
    }

    Ok(())
}

fn parse_bool(key: &str, value: &str) -> LoreResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(LoreError::config(format!(
            "{} must be a boolean, got '{}'",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = MemoryConfig::default();
        apply_overrides_from(
            &mut config,
            lookup(&[
                (ENV_MEMORIES_DIR, "/data/memories"),
                (ENV_MEMORY_ENABLED, "off"),
                (ENV_SIMILARITY_THRESHOLD, "0.75"),
                (ENV_LOG_LEVEL, "debug"),
            ]),
        )
        .unwrap();

        assert_eq!(config.memories_dir, PathBuf::from("/data/memories"));
        assert!(!config.enabled);
        assert_eq!(config.similarity_threshold, 0.75);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_empty_log_level_keeps_existing() {
        let mut config = MemoryConfig::default();
        apply_overrides_from(&mut config, lookup(&[(ENV_LOG_LEVEL, "")])).unwrap();
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_bad_bool_rejected() {
        let mut config = MemoryConfig::default();
        let err = apply_overrides_from(&mut config, lookup(&[(ENV_AUTO_LEARNING, "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_AUTO_LEARNING));
    }
}
