//! Per-agent write locks

use super::error::MemoryStorageError;
use crate::memory::types::AgentId;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::timeout;

/// Keyed mutex map: one mutex per agent, so different agents never contend
#[derive(Debug)]
pub struct AgentLocks {
    locks: DashMap<AgentId, Arc<Mutex<()>>>,
    timeout: Duration,
}

impl AgentLocks {
    pub fn new(timeout: Duration) -> Self {
        Self {
            locks: DashMap::new(),
            timeout,
        }
    }

    /// Wait up to the configured timeout for exclusive access to `agent_id`
    pub async fn acquire(&self, agent_id: &AgentId) -> Result<AgentLock, MemoryStorageError> {
        let mutex = self
            .locks
            .entry(agent_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        match timeout(self.timeout, mutex.lock_owned()).await {
            Ok(guard) => Ok(AgentLock {
                agent_id: agent_id.clone(),
                _guard: guard,
            }),
            Err(_) => {
                tracing::warn!(
                    agent_id = %agent_id,
                    waited = ?self.timeout,
                    "timed out waiting for memory lock"
                );
                Err(MemoryStorageError::LockTimeout {
                    agent_id: agent_id.to_string(),
                    waited: self.timeout,
                })
            }
        }
    }

    /// Configured wait bound
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Proof of exclusive access to one agent's document.
///
/// Released on drop. Saves require it, so a write always happens inside
/// the caller's load-modify-save critical section.
#[derive(Debug)]
pub struct AgentLock {
    agent_id: AgentId,
    _guard: OwnedMutexGuard<()>,
}

impl AgentLock {
    /// Agent this lock guards
    pub fn agent_id(&self) -> &AgentId {
        &self.agent_id
    }
}
