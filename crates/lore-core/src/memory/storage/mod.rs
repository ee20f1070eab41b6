//! Memory repository backends

mod error;
mod file_storage;
mod in_memory;
mod locks;
#[cfg(test)]
mod tests;
#[allow(clippy::module_inception)]
mod r#trait;

pub use error::MemoryStorageError;
pub use file_storage::FileMemoryRepository;
pub use in_memory::InMemoryRepository;
pub use locks::{AgentLock, AgentLocks};
pub use r#trait::MemoryRepository;
