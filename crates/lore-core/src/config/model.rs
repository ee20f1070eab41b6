//! Configuration data model

use super::defaults;
use super::logging_config::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Keyword rule for one section
///
/// The position of a rule in [`MemoryConfig::sections`] decides classifier
/// tie-breaks and the order of section headers in a fresh document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRule {
    /// Section heading, without the `## ` prefix
    pub name: String,
    /// Lowercase keywords matched as substrings of the learning text
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl SectionRule {
    /// Create a rule from a name and keyword list
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Size budgets applied to every document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryLimits {
    /// Items kept per section before the oldest is evicted
    pub max_items_per_section: usize,
    /// Characters per item, including the truncation marker
    pub max_line_length: usize,
    /// Serialized document budget in KB when no agent override exists
    pub default_size_kb: usize,
}

impl Default for MemoryLimits {
    fn default() -> Self {
        Self {
            max_items_per_section: defaults::MAX_ITEMS_PER_SECTION,
            max_line_length: defaults::MAX_LINE_LENGTH,
            default_size_kb: defaults::DEFAULT_SIZE_KB,
        }
    }
}

/// Per-agent overrides; unset fields fall back to the global value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentOverrides {
    pub enabled: Option<bool>,
    pub auto_learning: Option<bool>,
    pub size_limit_kb: Option<usize>,
}

/// Process-wide memory configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Master switch for storing learnings
    pub enabled: bool,
    /// Whether learnings are extracted automatically from agent responses
    pub auto_learning: bool,
    /// Directory holding `<agent>_memories.md` files
    pub memories_dir: PathBuf,
    /// Similarity at or above which a learning counts as a duplicate
    pub similarity_threshold: f32,
    /// Section used when no keyword rule matches
    pub default_section: String,
    /// Upper bound on waiting for an agent's write lock
    #[serde(with = "humantime_serde")]
    pub lock_timeout: Duration,
    /// Size budgets
    pub limits: MemoryLimits,
    /// Ordered keyword rules
    pub sections: Vec<SectionRule>,
    /// Per-agent overrides keyed by agent id
    pub agents: HashMap<String, AgentOverrides>,
    /// Logging settings for the binary
    pub logging: LoggingConfig,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auto_learning: true,
            memories_dir: defaults::memories_dir(),
            similarity_threshold: defaults::SIMILARITY_THRESHOLD,
            default_section: defaults::DEFAULT_SECTION.to_string(),
            lock_timeout: defaults::LOCK_TIMEOUT,
            limits: MemoryLimits::default(),
            sections: defaults::section_rules(),
            agents: defaults::agent_overrides(),
            logging: LoggingConfig::default(),
        }
    }
}

impl MemoryConfig {
    /// Config rooted at a specific memories directory
    pub fn with_memories_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            memories_dir: dir.into(),
            ..Default::default()
        }
    }

    /// Set the per-section item cap
    pub fn max_items_per_section(mut self, max: usize) -> Self {
        self.limits.max_items_per_section = max;
        self
    }

    /// Set the per-item character cap
    pub fn max_line_length(mut self, max: usize) -> Self {
        self.limits.max_line_length = max;
        self
    }

    /// Set the duplicate threshold
    pub fn similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Set the lock wait bound
    pub fn lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Register overrides for one agent
    pub fn with_agent(mut self, agent_id: impl Into<String>, overrides: AgentOverrides) -> Self {
        self.agents.insert(agent_id.into(), overrides);
        self
    }

    /// Whether memory is enabled for this agent
    pub fn is_enabled_for(&self, agent_id: &str) -> bool {
        self.agents
            .get(agent_id)
            .and_then(|o| o.enabled)
            .unwrap_or(self.enabled)
    }

    /// Whether automatic extraction is enabled for this agent
    pub fn auto_learning_for(&self, agent_id: &str) -> bool {
        self.is_enabled_for(agent_id)
            && self
                .agents
                .get(agent_id)
                .and_then(|o| o.auto_learning)
                .unwrap_or(self.auto_learning)
    }

    /// Serialized document budget for this agent, in bytes
    pub fn size_limit_bytes(&self, agent_id: &str) -> usize {
        let kb = self
            .agents
            .get(agent_id)
            .and_then(|o| o.size_limit_kb)
            .unwrap_or(self.limits.default_size_kb);
        kb.saturating_mul(1024)
    }

    /// Section names in template order, default section last
    pub fn template_sections(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sections.iter().map(|r| r.name.clone()).collect();
        if !names.iter().any(|n| n == &self.default_section) {
            names.push(self.default_section.clone());
        }
        names
    }
}
