//! Agent identifiers

use crate::memory::storage::MemoryStorageError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const MAX_AGENT_ID_LEN: usize = 64;

static AGENT_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("valid agent id regex"));

/// Validated agent identifier
///
/// Agent ids become file names (`<id>_memories.md`), so they are restricted
/// to ASCII letters, digits, `_` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentId(String);

impl AgentId {
    /// Validate and wrap an agent id
    pub fn parse(id: impl Into<String>) -> Result<Self, MemoryStorageError> {
        let id = id.into();
        if id.len() > MAX_AGENT_ID_LEN || !AGENT_ID_PATTERN.is_match(&id) {
            return Err(MemoryStorageError::InvalidAgentId(id));
        }
        Ok(Self(id))
    }

    /// Get the ID string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Backing file name for this agent
    pub fn file_name(&self) -> String {
        format!("{}_memories.md", self.0)
    }

    /// Recover the agent id from a backing file name
    pub fn from_file_name(name: &str) -> Option<Self> {
        name.strip_suffix("_memories.md")
            .and_then(|id| Self::parse(id).ok())
    }

    /// Human title: `code_reviewer` → `Code Reviewer`
    pub fn title(&self) -> String {
        self.0
            .split(['_', '-'])
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AgentId {
    type Error = MemoryStorageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<AgentId> for String {
    fn from(id: AgentId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        for id in ["qa", "research", "code_reviewer", "web-ui2"] {
            assert!(AgentId::parse(id).is_ok(), "{id} should be valid");
        }
    }

    #[test]
    fn test_rejects_path_like_ids() {
        for id in ["", "../etc", "a/b", "_hidden", "qa agent", "qa.md"] {
            assert!(
                matches!(AgentId::parse(id), Err(MemoryStorageError::InvalidAgentId(_))),
                "{id:?} should be rejected"
            );
        }
        assert!(AgentId::parse("a".repeat(65)).is_err());
    }

    #[test]
    fn test_file_name_round_trip() {
        let id = AgentId::parse("code_reviewer").unwrap();
        assert_eq!(id.file_name(), "code_reviewer_memories.md");
        assert_eq!(AgentId::from_file_name(&id.file_name()), Some(id));
        assert_eq!(AgentId::from_file_name("notes.md"), None);
    }

    #[test]
    fn test_title() {
        assert_eq!(AgentId::parse("qa").unwrap().title(), "Qa");
        assert_eq!(AgentId::parse("code_reviewer").unwrap().title(), "Code Reviewer");
        assert_eq!(AgentId::parse("web-ui").unwrap().title(), "Web Ui");
    }
}
