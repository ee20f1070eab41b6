//! Error types for Lore
//!
//! Only repository-level I/O and configuration can fail. Classification and
//! similarity are infallible, and non-insert outcomes (duplicate, disabled,
//! rejected) are reported through [`crate::memory::InsertOutcome`], not here.

mod constructors;
mod types;

pub use types::{LoreError, LoreResult};
