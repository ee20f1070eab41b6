//! Core error type for Lore

use crate::memory::storage::MemoryStorageError;
use thiserror::Error;

/// Result type alias for Lore operations
pub type LoreResult<T> = Result<T, LoreError>;

/// Main error type for Lore
#[derive(Error, Debug)]
pub enum LoreError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// Caller supplied something unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Repository failure (I/O, lock timeout, bad agent id)
    #[error(transparent)]
    Storage(#[from] MemoryStorageError),
}

impl LoreError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "CONFIG_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Storage(MemoryStorageError::LockTimeout { .. }) => "LOCK_TIMEOUT",
            Self::Storage(MemoryStorageError::InvalidAgentId(_)) => "INVALID_AGENT_ID",
            Self::Storage(MemoryStorageError::Io { .. }) => "IO_ERROR",
        }
    }

    /// Whether retrying the same call may succeed (lock timeouts only)
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(MemoryStorageError::LockTimeout { .. }))
    }

    /// Additional context, if any was attached
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. } => context.as_deref(),
            _ => None,
        }
    }
}
