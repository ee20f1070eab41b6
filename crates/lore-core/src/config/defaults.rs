//! Default values for memory configuration

use super::model::{AgentOverrides, SectionRule};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

pub const MAX_ITEMS_PER_SECTION: usize = 15;
pub const MAX_LINE_LENGTH: usize = 120;
pub const DEFAULT_SIZE_KB: usize = 8;
pub const SIMILARITY_THRESHOLD: f32 = 0.8;
pub const DEFAULT_SECTION: &str = "Recent Learnings";
pub const LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Directory name under the working directory used when nothing is configured
pub const RUNTIME_DIR: &str = ".lore";

/// Default memories directory: `./.lore/memories`
pub fn memories_dir() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(RUNTIME_DIR)
        .join("memories")
}

/// Default user-level config file: `<config dir>/lore/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lore").join("config.toml"))
}

/// Built-in keyword table, in tie-break order
pub fn section_rules() -> Vec<SectionRule> {
    vec![
        SectionRule::new(
            "Project Architecture",
            &["architecture", "structure", "design", "layer", "module", "component"],
        ),
        SectionRule::new(
            "Coding Patterns Learned",
            &["pattern", "idiom", "convention", "naming", "style", "refactor"],
        ),
        SectionRule::new(
            "Implementation Guidelines",
            &["always", "should", "must", "prefer", "guideline", "ensure"],
        ),
        SectionRule::new(
            "Domain-Specific Knowledge",
            &["domain", "business", "requirement", "customer", "workflow"],
        ),
        SectionRule::new(
            "Effective Strategies",
            &["strategy", "approach", "technique", "effective", "works well"],
        ),
        SectionRule::new(
            "Common Mistakes to Avoid",
            &["mistake", "avoid", "never", "don't", "pitfall", "bug"],
        ),
        SectionRule::new(
            "Integration Points",
            &["integration", "interface", "api", "connection", "database", "pooling"],
        ),
        SectionRule::new(
            "Performance Considerations",
            &["performance", "optimiz", "latency", "cache", "throughput", "memory usage"],
        ),
        SectionRule::new(
            "Current Technical Context",
            &["version", "framework", "library", "dependency", "toolchain"],
        ),
    ]
}

/// Agents that ship with a larger budget
pub fn agent_overrides() -> HashMap<String, AgentOverrides> {
    let mut agents = HashMap::new();
    agents.insert(
        "research".to_string(),
        AgentOverrides {
            size_limit_kb: Some(16),
            ..Default::default()
        },
    );
    agents
}
