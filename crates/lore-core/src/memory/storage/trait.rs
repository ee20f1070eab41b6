//! Memory repository trait definition

use super::error::MemoryStorageError;
use super::locks::AgentLock;
use crate::memory::types::{AgentId, MemoryDocument};
use async_trait::async_trait;
use std::path::PathBuf;

/// Durable storage of one memory document per agent
///
/// Writers call [`lock`](Self::lock), then [`load`](Self::load), mutate the
/// returned copy and hand it back to [`save`](Self::save) before dropping the
/// lock. Loads never share a document instance between calls.
#[async_trait]
pub trait MemoryRepository: Send + Sync {
    /// Acquire the per-agent write lock
    async fn lock(&self, agent_id: &AgentId) -> Result<AgentLock, MemoryStorageError>;

    /// Load a private copy of the agent's document, or a fresh template
    async fn load(&self, agent_id: &AgentId) -> Result<MemoryDocument, MemoryStorageError>;

    /// Replace the locked agent's document
    async fn save(&self, lock: &AgentLock, doc: &MemoryDocument)
    -> Result<(), MemoryStorageError>;

    /// Agents with a stored document, sorted
    async fn list_agents(&self) -> Result<Vec<AgentId>, MemoryStorageError>;

    /// Where the agent's document lives, if it is file-backed
    fn backing_path(&self, agent_id: &AgentId) -> Option<PathBuf>;
}
