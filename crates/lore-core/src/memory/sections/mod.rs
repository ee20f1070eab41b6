//! Section store: parse, serialize and insert into memory documents
//!
//! Pure transformations over [`MemoryDocument`](crate::memory::MemoryDocument);
//! no I/O happens here.
//!
//! Document format:
//!
//! ```text
//! # Qa Agent Memory          <- header, kept verbatim
//!
//! ## Implementation Guidelines
//! - Always assert exit codes in shell tests
//!
//! ## Recent Learnings
//! ```

mod insert;
mod parser;
mod serializer;


pub use insert::{InsertLimits, TRUNCATION_MARKER, insert, normalize_text};
pub use parser::{ParseError, parse, parse_bytes};
pub use serializer::{serialize, serialized_len};
