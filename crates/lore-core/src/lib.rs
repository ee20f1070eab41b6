//! Lore Core Library
//!
//! Per-agent learned-knowledge store. Agents submit short natural-language
//! learnings; the store classifies them into sections, rejects near-duplicates,
//! enforces size budgets and persists one Markdown document per agent.
//!
//! # Example
//!
//! ```rust,ignore
//! use lore_core::{MemoryConfig, MemoryService};
//!
//! let service = MemoryService::with_file_storage(MemoryConfig::default())?;
//! let outcome = service.add_learning("qa", "Always assert exit codes in shell tests").await?;
//! println!("{}", service.load_for_display("qa").await?);
//! ```

pub mod config;
pub mod error;
pub mod memory;

pub use config::{AgentOverrides, LoggingConfig, MemoryConfig, MemoryLimits, SectionRule};
pub use error::{LoreError, LoreResult};
pub use memory::{
    AgentId, ExtractResult, InsertOutcome, Item, MemoryDocument, MemoryService, MemoryStats,
    RejectReason, Section,
};
