//! Command routing logic for CLI

use crate::args::{Cli, Commands, ConfigAction};
use crate::commands;
use crate::console::CliConsole;
use lore_core::config::{defaults, load_config};
use lore_core::{LoreResult, MemoryConfig, MemoryService};
use std::path::PathBuf;

/// Configuration plus the file it came from, if any
pub struct LoadedConfig {
    pub config: MemoryConfig,
    pub source: Option<PathBuf>,
}

/// Resolve, load and validate configuration for this invocation.
///
/// An explicit `--config` wins; otherwise the user-level config file is used
/// when it exists. `--memories-dir` overrides whatever was loaded.
pub fn resolve_config(cli: &Cli) -> LoreResult<LoadedConfig> {
    let source = cli
        .config
        .clone()
        .or_else(|| defaults::config_path().filter(|path| path.exists()));

    let mut config = load_config(source.as_deref())?;
    if let Some(dir) = &cli.memories_dir {
        config.memories_dir = dir.clone();
    }

    Ok(LoadedConfig { config, source })
}

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli, loaded: LoadedConfig) -> LoreResult<()> {
    let console = CliConsole::new(cli.verbose);
    if let Some(source) = &loaded.source {
        console.info(&format!("Using configuration {}", source.display()));
    }

    match cli.command {
        Commands::Config { action } => route_config(&console, action, &loaded),
        Commands::Classify { text } => {
            commands::memory::classify_text(&loaded.config, &text);
            Ok(())
        }
        Commands::Add {
            agent,
            text,
            section,
        } => {
            let service = open_service(loaded.config)?;
            commands::memory::add(&service, &console, &agent, &text, section.as_deref()).await
        }
        Commands::Extract { agent, file } => {
            let service = open_service(loaded.config)?;
            commands::memory::extract(&service, &console, &agent, file.as_deref()).await
        }
        Commands::Show { agent } => {
            let service = open_service(loaded.config)?;
            commands::memory::show(&service, &agent).await
        }
        Commands::Stats { agent, json } => {
            let service = open_service(loaded.config)?;
            commands::memory::stats(&service, &console, &agent, json).await
        }
        Commands::List => {
            let service = open_service(loaded.config)?;
            commands::memory::list(&service, &console).await
        }
    }
}

fn open_service(config: MemoryConfig) -> LoreResult<MemoryService> {
    tracing::debug!(memories_dir = %config.memories_dir.display(), "opening memory store");
    MemoryService::with_file_storage(config)
}

fn route_config(
    console: &CliConsole,
    action: ConfigAction,
    loaded: &LoadedConfig,
) -> LoreResult<()> {
    match action {
        ConfigAction::Show => {
            commands::config::show(console, &loaded.config, loaded.source.as_deref());
            Ok(())
        }
        ConfigAction::Init { path, force } => commands::config::init(console, path, force),
    }
}
