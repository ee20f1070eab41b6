//! Markdown memory document parser

use crate::memory::types::{AgentId, Item, MemoryDocument, Section};
use thiserror::Error;

pub(super) const SECTION_PREFIX: &str = "## ";
pub(super) const ITEM_PREFIX: &str = "- ";

/// Reasons a backing file cannot be read as a memory document
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("memory document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("memory document has no '## ' sections and no '- ' items")]
    NoStructure,
}

/// Parse raw bytes, rejecting invalid UTF-8
pub fn parse_bytes(agent_id: &AgentId, raw: &[u8]) -> Result<MemoryDocument, ParseError> {
    let text = std::str::from_utf8(raw)?;
    parse(agent_id, text)
}

/// Parse a memory document.
///
/// Lines before the first `## ` heading form the header. Under a heading,
/// `- ` lines (indentation allowed) are items, blank lines are dropped and
/// any other line is kept as a section note. A repeated heading merges into
/// the first section with that name.
pub fn parse(agent_id: &AgentId, raw: &str) -> Result<MemoryDocument, ParseError> {
    let mut doc = MemoryDocument::new(agent_id.clone());
    let mut current: Option<usize> = None;
    let mut has_markers = false;

    for line in raw.lines() {
        if let Some(name) = line.strip_prefix(SECTION_PREFIX) {
            has_markers = true;
            let name = name.trim();
            let index = match doc.sections.iter().position(|s| s.name == name) {
                Some(index) => index,
                None => {
                    doc.sections.push(Section::new(name));
                    doc.sections.len() - 1
                }
            };
            current = Some(index);
            continue;
        }

        let item = item_text(line);
        has_markers |= item.is_some();

        match (current, item) {
            (None, _) => doc.header.push(line.to_string()),
            (Some(index), Some(text)) => {
                if !text.is_empty() {
                    doc.sections[index].items.push(Item::new(text));
                }
            }
            (Some(index), None) => {
                if !line.trim().is_empty() {
                    doc.sections[index].notes.push(line.to_string());
                }
            }
        }
    }

    if !has_markers {
        return Err(ParseError::NoStructure);
    }

    while doc.header.last().is_some_and(|line| line.trim().is_empty()) {
        doc.header.pop();
    }

    Ok(doc)
}

fn item_text(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if trimmed == "-" {
        return Some("");
    }
    trimmed.strip_prefix(ITEM_PREFIX).map(str::trim)
}
