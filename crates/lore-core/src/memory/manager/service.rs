//! Memory service construction

use crate::config::MemoryConfig;
use crate::error::LoreResult;
use crate::memory::storage::{FileMemoryRepository, InMemoryRepository, MemoryRepository};
use std::sync::Arc;

/// Public entry point to agent memory
///
/// Cheap to clone; clones share the configuration and the repository, and
/// therefore the per-agent locks.
#[derive(Clone)]
pub struct MemoryService {
    pub(crate) config: Arc<MemoryConfig>,
    pub(crate) repository: Arc<dyn MemoryRepository>,
}

impl MemoryService {
    /// Create a service over an existing repository
    pub fn new(config: Arc<MemoryConfig>, repository: Arc<dyn MemoryRepository>) -> Self {
        Self { config, repository }
    }

    /// Validate `config` and store documents under `config.memories_dir`
    pub fn with_file_storage(config: MemoryConfig) -> LoreResult<Self> {
        config.validate()?;
        let repository = FileMemoryRepository::from_config(&config);
        tracing::debug!(dir = %config.memories_dir.display(), "using file memory storage");
        Ok(Self::new(Arc::new(config), Arc::new(repository)))
    }

    /// Validate `config` and keep documents in process memory only
    pub fn in_memory(config: MemoryConfig) -> LoreResult<Self> {
        config.validate()?;
        let repository =
            InMemoryRepository::with_lock_timeout(config.template_sections(), config.lock_timeout);
        Ok(Self::new(Arc::new(config), Arc::new(repository)))
    }

    /// Get configuration
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Get the underlying repository
    pub fn repository(&self) -> &Arc<dyn MemoryRepository> {
        &self.repository
    }
}

impl std::fmt::Debug for MemoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryService")
            .field("memories_dir", &self.config.memories_dir)
            .field("enabled", &self.config.enabled)
            .finish_non_exhaustive()
    }
}
