//! Memory storage errors

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Memory storage error
#[derive(Debug, Error)]
pub enum MemoryStorageError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Timed out after {waited:?} waiting for the memory lock of agent '{agent_id}'")]
    LockTimeout { agent_id: String, waited: Duration },

    #[error("Invalid agent id: {0:?}")]
    InvalidAgentId(String),
}

impl MemoryStorageError {
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
