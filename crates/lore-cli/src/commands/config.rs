//! Configuration management commands

use crate::console::CliConsole;
use colored::*;
use lore_core::config::{defaults, save_to_file};
use lore_core::{LoreError, LoreResult, MemoryConfig};
use std::path::{Path, PathBuf};

/// Show the effective configuration
pub fn show(console: &CliConsole, config: &MemoryConfig, source: Option<&Path>) {
    console.print_header("Configuration");
    match source {
        Some(path) => console.print_field("Loaded from", &path.display().to_string()),
        None => console.print_field("Loaded from", &"built-in defaults".dimmed().to_string()),
    }

    console.print_field("Enabled", &config.enabled.to_string());
    console.print_field("Auto learning", &config.auto_learning.to_string());
    console.print_field(
        "Memories dir",
        &config.memories_dir.display().to_string().cyan().to_string(),
    );
    console.print_field(
        "Similarity threshold",
        &config.similarity_threshold.to_string(),
    );
    console.print_field(
        "Items per section",
        &config.limits.max_items_per_section.to_string(),
    );
    console.print_field("Line length", &config.limits.max_line_length.to_string());
    console.print_field(
        "Document size",
        &format!("{} KB", config.limits.default_size_kb),
    );
    console.print_field("Lock timeout", &format!("{:?}", config.lock_timeout));
    console.print_field(
        "Logging",
        &format!("{} ({})", config.logging.level, config.logging.format),
    );

    console.print_header("Sections");
    for rule in &config.sections {
        console.print_field(&rule.name, &rule.keywords.join(", ").dimmed().to_string());
    }
    console.print_field(&config.default_section, &"(default)".dimmed().to_string());

    if !config.agents.is_empty() {
        console.print_header("Agent Overrides");
        let mut agents: Vec<_> = config.agents.iter().collect();
        agents.sort_by(|a, b| a.0.cmp(b.0));
        for (agent, overrides) in agents {
            let mut parts = Vec::new();
            if let Some(enabled) = overrides.enabled {
                parts.push(format!("enabled={enabled}"));
            }
            if let Some(auto) = overrides.auto_learning {
                parts.push(format!("auto_learning={auto}"));
            }
            if let Some(kb) = overrides.size_limit_kb {
                parts.push(format!("size={kb} KB"));
            }
            console.print_field(agent, &parts.join(", "));
        }
    }
}

/// Write a default configuration file
pub fn init(console: &CliConsole, path: Option<PathBuf>, force: bool) -> LoreResult<()> {
    let path = match path.or_else(defaults::config_path) {
        Some(path) => path,
        None => {
            return Err(LoreError::config(
                "no user config directory; pass a path to `lore config init`",
            ));
        }
    };

    if path.exists() && !force {
        console.info("Use --force to overwrite");
        return Err(LoreError::config(format!(
            "configuration file already exists: {}",
            path.display()
        )));
    }

    save_to_file(&MemoryConfig::default(), &path)?;
    console.success(&format!("Created configuration file: {}", path.display()));
    Ok(())
}
