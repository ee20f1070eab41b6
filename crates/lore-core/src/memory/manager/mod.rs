//! Memory service module

mod extract;
mod operations;
mod service;
mod stats;


pub use extract::{ExtractResult, extract_learnings};
pub use service::MemoryService;
pub use stats::{MemoryStats, SectionStats};
