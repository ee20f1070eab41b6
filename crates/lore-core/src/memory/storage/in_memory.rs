//! In-memory repository implementation

use super::error::MemoryStorageError;
use super::locks::{AgentLock, AgentLocks};
use super::r#trait::MemoryRepository;
use crate::config::defaults;
use crate::memory::types::{AgentId, MemoryDocument};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// In-memory repository (for testing and ephemeral agents)
#[derive(Debug)]
pub struct InMemoryRepository {
    documents: Arc<RwLock<HashMap<AgentId, MemoryDocument>>>,
    template_sections: Vec<String>,
    locks: AgentLocks,
}

impl InMemoryRepository {
    /// Create an empty repository seeding new documents with `template_sections`
    pub fn new(template_sections: Vec<String>) -> Self {
        Self::with_lock_timeout(template_sections, defaults::LOCK_TIMEOUT)
    }

    pub fn with_lock_timeout(template_sections: Vec<String>, lock_timeout: Duration) -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
            template_sections,
            locks: AgentLocks::new(lock_timeout),
        }
    }

    /// Number of stored documents
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl MemoryRepository for InMemoryRepository {
    async fn lock(&self, agent_id: &AgentId) -> Result<AgentLock, MemoryStorageError> {
        self.locks.acquire(agent_id).await
    }

    async fn load(&self, agent_id: &AgentId) -> Result<MemoryDocument, MemoryStorageError> {
        let stored = self.documents.read().await.get(agent_id).cloned();
        Ok(stored.unwrap_or_else(|| {
            MemoryDocument::from_template(agent_id.clone(), &self.template_sections)
        }))
    }

    async fn save(
        &self,
        lock: &AgentLock,
        doc: &MemoryDocument,
    ) -> Result<(), MemoryStorageError> {
        debug_assert_eq!(lock.agent_id(), &doc.agent_id);
        self.documents
            .write()
            .await
            .insert(lock.agent_id().clone(), doc.clone());
        Ok(())
    }

    async fn list_agents(&self) -> Result<Vec<AgentId>, MemoryStorageError> {
        let mut agents: Vec<AgentId> = self.documents.read().await.keys().cloned().collect();
        agents.sort();
        Ok(agents)
    }

    fn backing_path(&self, _agent_id: &AgentId) -> Option<PathBuf> {
        None
    }
}
