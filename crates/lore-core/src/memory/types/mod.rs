//! Memory types and data structures

mod base;
mod document;
mod outcome;

pub use base::AgentId;
pub use document::{Item, MemoryDocument, Section};
pub use outcome::{InsertOutcome, RejectReason};
