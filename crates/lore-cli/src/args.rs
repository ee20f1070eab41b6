//! CLI argument definitions using clap
//!
//! - lore add qa "text"            # store a learning
//! - lore extract qa < reply.md    # apply {"remember": [...]} from an agent reply
//! - lore show qa / stats qa       # inspect a document
//! - lore config init/show         # configuration utilities

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lore")]
#[command(about = "Lore - per-agent learned-knowledge store")]
#[command(
    long_about = r#"Lore - per-agent learned-knowledge store

USAGE:
  lore add <agent> "<learning>"          # Classify and store a learning
  lore add <agent> "<learning>" -s NAME  # Store into a specific section
  lore extract <agent> [--file F]        # Apply learnings from an agent reply
  lore show <agent>                      # Print the memory document
  lore stats <agent> [--json]            # Section counts and size budget
  lore list                              # Agents with stored memories

UTILITY COMMANDS:
  lore classify "<text>"                 # Show which section text maps to
  lore config show                       # Show effective configuration
  lore config init [path]                # Write a default config file"#
)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (JSON, TOML or YAML)
    #[arg(long, global = true, env = "LORE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding <agent>_memories.md files
    #[arg(long, global = true)]
    pub memories_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store a learning for an agent
    Add {
        /// Agent id
        agent: String,

        /// Learning text
        text: String,

        /// Target section; skips keyword classification
        #[arg(long, short)]
        section: Option<String>,
    },

    /// Apply {"remember": [...]} learnings found in an agent reply
    Extract {
        /// Agent id
        agent: String,

        /// Read the reply from a file instead of stdin
        #[arg(long, short)]
        file: Option<PathBuf>,
    },

    /// Print an agent's memory document
    Show {
        /// Agent id
        agent: String,
    },

    /// Show section counts and size budget for an agent
    Stats {
        /// Agent id
        agent: String,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List agents with stored memories
    List,

    /// Show the section a learning would be filed under
    Classify {
        /// Learning text
        text: String,
    },

    /// Manage configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Display the effective configuration
    Show,

    /// Create a new configuration file with defaults
    Init {
        /// Destination; defaults to the user config directory
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
