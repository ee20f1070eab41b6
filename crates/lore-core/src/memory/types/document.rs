//! In-memory form of an agent's memory document

use super::base::AgentId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single stored learning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Single-line, trimmed text
    pub text: String,
}

impl Item {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A `## ` section and its items, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    /// Non-item lines found under the heading, re-emitted verbatim after it
    pub notes: Vec<String>,
    pub items: Vec<Item>,
}

impl Section {
    /// Create an empty section
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            notes: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Iterate over item texts
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.text.as_str())
    }
}

/// One agent's memory document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryDocument {
    pub agent_id: AgentId,
    /// Leading lines before the first section (title, comments), verbatim
    pub header: Vec<String>,
    /// Sections in document order; names are unique
    pub sections: Vec<Section>,
    /// Backing file, when loaded from or destined for disk
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl MemoryDocument {
    /// Empty document with no header and no sections
    pub fn new(agent_id: AgentId) -> Self {
        Self {
            agent_id,
            header: Vec::new(),
            sections: Vec::new(),
            source_path: None,
        }
    }

    /// Fresh document seeded with a title and empty section headers
    pub fn from_template<S: AsRef<str>>(agent_id: AgentId, section_names: &[S]) -> Self {
        let header = vec![format!("# {} Agent Memory", agent_id.title())];
        let sections = section_names
            .iter()
            .map(|name| Section::new(name.as_ref()))
            .collect();
        Self {
            agent_id,
            header,
            sections,
            source_path: None,
        }
    }

    /// Attach the backing file path
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    /// Look up a section by name
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Get a section, appending an empty one if it does not exist yet
    pub fn section_mut_or_insert(&mut self, name: &str) -> &mut Section {
        let index = match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    /// Total items across all sections
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    /// Whether any section contains exactly this text
    pub fn contains(&self, text: &str) -> bool {
        self.sections.iter().any(|s| s.texts().any(|t| t == text))
    }
}
