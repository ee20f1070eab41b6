//! File-based repository implementation

use super::error::MemoryStorageError;
use super::locks::{AgentLock, AgentLocks};
use super::r#trait::MemoryRepository;
use crate::config::MemoryConfig;
use crate::memory::sections::{parse_bytes, serialize};
use crate::memory::types::{AgentId, MemoryDocument};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// One `<agent>_memories.md` file per agent under a directory
///
/// Writers are serialized per agent within this process only. Separate
/// processes sharing a directory are not excluded from each other, so two
/// concurrent `lore add` runs on one agent can still lose an update.
#[derive(Debug)]
pub struct FileMemoryRepository {
    dir: PathBuf,
    template_sections: Vec<String>,
    locks: AgentLocks,
}

impl FileMemoryRepository {
    /// Create a repository rooted at `dir`; the directory is created on first save
    pub fn new(
        dir: impl Into<PathBuf>,
        template_sections: Vec<String>,
        lock_timeout: Duration,
    ) -> Self {
        Self {
            dir: dir.into(),
            template_sections,
            locks: AgentLocks::new(lock_timeout),
        }
    }

    /// Repository using the configured directory, sections and lock timeout
    pub fn from_config(config: &MemoryConfig) -> Self {
        Self::new(
            config.memories_dir.clone(),
            config.template_sections(),
            config.lock_timeout,
        )
    }

    /// Get storage directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Backing file for an agent
    pub fn path_for(&self, agent_id: &AgentId) -> PathBuf {
        self.dir.join(agent_id.file_name())
    }

    fn template(&self, agent_id: &AgentId, path: PathBuf) -> MemoryDocument {
        MemoryDocument::from_template(agent_id.clone(), &self.template_sections)
            .with_source_path(path)
    }

    /// Copy an unreadable file aside so the next save cannot destroy it.
    ///
    /// Reuses an earlier backup holding the same bytes, so repeated reads of
    /// one corrupt file leave a single copy.
    async fn backup_corrupt(path: &Path, raw: &[u8]) -> Option<PathBuf> {
        let mut prefix = path.file_name()?.to_os_string();
        prefix.push(".corrupt-");

        if let Some(existing) = find_backup(path, &prefix.to_string_lossy(), raw).await {
            return Some(existing);
        }

        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
        let mut name = prefix;
        name.push(stamp.to_string());
        let backup = path.with_file_name(name);

        match tokio::fs::write(&backup, raw).await {
            Ok(()) => Some(backup),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to back up corrupt memory file"
                );
                None
            }
        }
    }
}

async fn find_backup(path: &Path, prefix: &str, raw: &[u8]) -> Option<PathBuf> {
    let dir = path.parent()?;
    let mut entries = tokio::fs::read_dir(dir).await.ok()?;

    while let Ok(Some(entry)) = entries.next_entry().await {
        if !entry.file_name().to_string_lossy().starts_with(prefix) {
            continue;
        }
        if let Ok(existing) = tokio::fs::read(entry.path()).await {
            if existing == raw {
                return Some(entry.path());
            }
        }
    }
    None
}

async fn write_synced(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(content).await?;
    file.sync_all().await
}

/// Write `content` to `temp_path`, then rename it over `path`.
///
/// `path` is only touched by the final rename, so any failure leaves the
/// previous file as it was. The temp file is removed on error.
pub(super) async fn replace_file(
    path: &Path,
    temp_path: &Path,
    content: &[u8],
) -> Result<(), MemoryStorageError> {
    if let Err(err) = write_synced(temp_path, content).await {
        let _ = tokio::fs::remove_file(temp_path).await;
        return Err(MemoryStorageError::io(temp_path, err));
    }

    if let Err(err) = tokio::fs::rename(temp_path, path).await {
        let _ = tokio::fs::remove_file(temp_path).await;
        return Err(MemoryStorageError::io(path, err));
    }

    sync_parent(path).await
}

#[cfg(unix)]
async fn sync_parent(path: &Path) -> Result<(), MemoryStorageError> {
    let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) else {
        return Ok(());
    };
    let handle = tokio::fs::File::open(dir)
        .await
        .map_err(|err| MemoryStorageError::io(dir, err))?;
    handle
        .sync_all()
        .await
        .map_err(|err| MemoryStorageError::io(dir, err))
}

#[cfg(not(unix))]
async fn sync_parent(_path: &Path) -> Result<(), MemoryStorageError> {
    Ok(())
}

#[async_trait]
impl MemoryRepository for FileMemoryRepository {
    async fn lock(&self, agent_id: &AgentId) -> Result<AgentLock, MemoryStorageError> {
        self.locks.acquire(agent_id).await
    }

    async fn load(&self, agent_id: &AgentId) -> Result<MemoryDocument, MemoryStorageError> {
        let path = self.path_for(agent_id);

        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(agent_id = %agent_id, "no memory file yet, using template");
                return Ok(self.template(agent_id, path));
            }
            Err(err) => return Err(MemoryStorageError::io(&path, err)),
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(self.template(agent_id, path));
        }

        match parse_bytes(agent_id, &raw) {
            Ok(doc) => Ok(doc.with_source_path(path)),
            Err(err) => {
                let backup = Self::backup_corrupt(&path, &raw).await;
                tracing::warn!(
                    agent_id = %agent_id,
                    path = %path.display(),
                    backup = ?backup,
                    error = %err,
                    "memory file is unreadable, starting from a fresh template"
                );
                Ok(self.template(agent_id, path))
            }
        }
    }

    async fn save(
        &self,
        lock: &AgentLock,
        doc: &MemoryDocument,
    ) -> Result<(), MemoryStorageError> {
        debug_assert_eq!(lock.agent_id(), &doc.agent_id);

        let path = self.path_for(lock.agent_id());
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| MemoryStorageError::io(&self.dir, err))?;

        let temp_path = self.dir.join(format!(
            ".{}.{}.tmp",
            lock.agent_id().file_name(),
            uuid::Uuid::new_v4()
        ));
        let content = serialize(doc);

        replace_file(&path, &temp_path, content.as_bytes()).await?;

        tracing::debug!(
            agent_id = %lock.agent_id(),
            path = %path.display(),
            bytes = content.len(),
            "memory document saved"
        );
        Ok(())
    }

    async fn list_agents(&self) -> Result<Vec<AgentId>, MemoryStorageError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(MemoryStorageError::io(&self.dir, err)),
        };

        let mut agents = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| MemoryStorageError::io(&self.dir, err))?
        {
            if let Some(agent) = entry.file_name().to_str().and_then(AgentId::from_file_name) {
                agents.push(agent);
            }
        }

        agents.sort();
        Ok(agents)
    }

    fn backing_path(&self, agent_id: &AgentId) -> Option<PathBuf> {
        Some(self.path_for(agent_id))
    }
}
