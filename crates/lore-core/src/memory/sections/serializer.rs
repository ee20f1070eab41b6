//! Markdown memory document serializer

use super::parser::{ITEM_PREFIX, SECTION_PREFIX};
use crate::memory::types::MemoryDocument;

/// Render a document; inverse of [`super::parse`]
pub fn serialize(doc: &MemoryDocument) -> String {
    let mut out = String::new();

    for line in &doc.header {
        out.push_str(line);
        out.push('\n');
    }

    for section in &doc.sections {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(SECTION_PREFIX);
        out.push_str(&section.name);
        out.push('\n');

        for note in &section.notes {
            out.push_str(note);
            out.push('\n');
        }

        for item in &section.items {
            out.push_str(ITEM_PREFIX);
            out.push_str(&item.text);
            out.push('\n');
        }
    }

    out
}

/// Size in bytes of the serialized document
pub fn serialized_len(doc: &MemoryDocument) -> usize {
    serialize(doc).len()
}
