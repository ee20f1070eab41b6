//! Memory document statistics

use crate::config::MemoryConfig;
use crate::memory::sections::serialized_len;
use crate::memory::types::MemoryDocument;
use serde::Serialize;
use std::path::PathBuf;

/// Item count of one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionStats {
    pub name: String,
    pub items: usize,
}

/// Summary of one agent's memory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryStats {
    pub agent_id: String,
    pub enabled: bool,
    pub auto_learning: bool,
    pub sections: Vec<SectionStats>,
    pub total_items: usize,
    /// Serialized size in bytes
    pub bytes: usize,
    pub byte_limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl MemoryStats {
    pub(crate) fn from_document(doc: &MemoryDocument, config: &MemoryConfig) -> Self {
        let agent_id = doc.agent_id.as_str();
        Self {
            agent_id: agent_id.to_string(),
            enabled: config.is_enabled_for(agent_id),
            auto_learning: config.auto_learning_for(agent_id),
            sections: doc
                .sections
                .iter()
                .map(|s| SectionStats {
                    name: s.name.clone(),
                    items: s.items.len(),
                })
                .collect(),
            total_items: doc.item_count(),
            bytes: serialized_len(doc),
            byte_limit: config.size_limit_bytes(agent_id),
            path: doc.source_path.clone(),
        }
    }

    /// Fraction of the byte budget in use
    pub fn usage(&self) -> f64 {
        if self.byte_limit == 0 {
            return 0.0;
        }
        self.bytes as f64 / self.byte_limit as f64
    }
}
