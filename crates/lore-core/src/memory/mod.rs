//! Agent memory store
//!
//! One Markdown document per agent, split into `## ` sections of `- ` items.
//!
//! ```text
//! MemoryService ── classifier ── sections (parse / insert / serialize)
//!       │                              │
//!       └──── MemoryRepository ────────┘ (per-agent lock, atomic replace)
//! ```

pub mod classifier;
pub mod manager;
pub mod sections;
pub mod similarity;
pub mod storage;
pub mod types;

pub use classifier::classify;
pub use manager::{ExtractResult, MemoryService, MemoryStats, SectionStats, extract_learnings};
pub use sections::{InsertLimits, ParseError};
pub use similarity::similarity;
pub use storage::{
    AgentLock, FileMemoryRepository, InMemoryRepository, MemoryRepository, MemoryStorageError,
};
pub use types::{AgentId, InsertOutcome, Item, MemoryDocument, RejectReason, Section};
