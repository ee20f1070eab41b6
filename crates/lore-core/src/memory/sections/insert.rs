//! Insert with deduplication and capacity enforcement
//!
//! ```text
//! normalize/truncate ─► duplicate check ─┬─► Duplicate
//!                                        └─► append ─► section cap ─► size budget ─┬─► Inserted
//!                                                                                  ├─► InsertedWithEviction
//!                                                                                  └─► Rejected(OverCapacity)
//! ```

use super::serializer::serialized_len;
use crate::config::MemoryConfig;
use crate::memory::similarity::similarity;
use crate::memory::types::{AgentId, InsertOutcome, Item, MemoryDocument, RejectReason};

/// Appended to text cut at the line budget
pub const TRUNCATION_MARKER: &str = "...";

/// Budgets applied by [`insert`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsertLimits {
    pub similarity_threshold: f32,
    pub max_items: usize,
    pub max_line_length: usize,
    /// Serialized document budget; `None` disables the check
    pub max_bytes: Option<usize>,
}

impl InsertLimits {
    /// Limits in effect for one agent
    pub fn for_agent(config: &MemoryConfig, agent_id: &AgentId) -> Self {
        Self {
            similarity_threshold: config.similarity_threshold,
            max_items: config.limits.max_items_per_section,
            max_line_length: config.limits.max_line_length,
            max_bytes: Some(config.size_limit_bytes(agent_id.as_str())),
        }
    }
}

/// Collapse whitespace to single spaces and cut to `max_len` characters
pub fn normalize_text(raw: &str, max_len: usize) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_len {
        return collapsed;
    }

    let keep = max_len.saturating_sub(TRUNCATION_MARKER.chars().count());
    let mut truncated: String = collapsed.chars().take(keep).collect();
    truncated.truncate(truncated.trim_end().len());
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

/// Insert `text` into `section`, leaving `doc` untouched unless it is stored
pub fn insert(
    doc: &mut MemoryDocument,
    section: &str,
    text: &str,
    limits: &InsertLimits,
) -> InsertOutcome {
    let text = normalize_text(text, limits.max_line_length);
    if text.is_empty() {
        return InsertOutcome::Rejected {
            reason: RejectReason::Empty,
        };
    }

    if let Some(existing) = doc.section(section) {
        let duplicate = existing
            .texts()
            .map(|item| (item, similarity(item, &text)))
            .find(|(_, score)| *score >= limits.similarity_threshold);

        if let Some((item, score)) = duplicate {
            tracing::debug!(section, similarity = score, "learning already present");
            return InsertOutcome::Duplicate {
                section: section.to_string(),
                existing: item.to_string(),
                similarity: score,
            };
        }
    }

    let mut candidate = doc.clone();
    let target = candidate.section_mut_or_insert(section);
    target.items.push(Item::new(text));

    let mut evicted = Vec::new();
    while target.items.len() > limits.max_items.max(1) {
        evicted.push(target.items.remove(0).text);
    }

    if let Some(max_bytes) = limits.max_bytes {
        match enforce_size_budget(&mut candidate, section, max_bytes) {
            Some(mut trimmed) => evicted.append(&mut trimmed),
            None => {
                tracing::warn!(
                    agent_id = %doc.agent_id,
                    section,
                    max_bytes,
                    "learning does not fit the document budget"
                );
                return InsertOutcome::Rejected {
                    reason: RejectReason::OverCapacity,
                };
            }
        }
    }

    *doc = candidate;

    if evicted.is_empty() {
        tracing::info!(agent_id = %doc.agent_id, section, "learning inserted");
        InsertOutcome::Inserted {
            section: section.to_string(),
        }
    } else {
        tracing::info!(
            agent_id = %doc.agent_id,
            section,
            evicted = evicted.len(),
            "learning inserted with eviction"
        );
        InsertOutcome::InsertedWithEviction {
            section: section.to_string(),
            evicted,
        }
    }
}

/// Evict oldest items until the document fits in `max_bytes`.
///
/// Victims come from the section with the most evictable items, earliest
/// section on ties. The newest item of `protected` is never evicted.
/// Returns `None` when the budget cannot be met.
fn enforce_size_budget(
    doc: &mut MemoryDocument,
    protected: &str,
    max_bytes: usize,
) -> Option<Vec<String>> {
    let mut evicted = Vec::new();

    while serialized_len(doc) > max_bytes {
        let victim = doc
            .sections
            .iter()
            .enumerate()
            .map(|(index, s)| {
                let evictable = if s.name == protected {
                    s.items.len().saturating_sub(1)
                } else {
                    s.items.len()
                };
                (index, evictable)
            })
            .filter(|(_, evictable)| *evictable > 0)
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)));

        let (index, _) = victim?;
        evicted.push(doc.sections[index].items.remove(0).text);
    }

    Some(evicted)
}
