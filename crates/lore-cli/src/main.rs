//! Lore CLI application
//!
//! Inspect and feed per-agent memory documents from the shell.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/lore-cli
//! ```
//!
//! Configuration is read from `--config`, `$LORE_CONFIG`, or the user config
//! directory (`lore/config.toml`), then `LORE_*` environment overrides apply.
//! See `lore --help` for the command list.

mod args;
mod commands;
mod console;
mod logging;
mod router;

use args::Cli;
use clap::Parser;
use lore_core::LoreResult;

#[tokio::main]
async fn main() -> LoreResult<()> {
    let cli = Cli::parse();

    let loaded = router::resolve_config(&cli)?;
    logging::init(&loaded.config.logging, cli.verbose);

    router::route(cli, loaded).await
}
