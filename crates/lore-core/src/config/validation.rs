//! Configuration validation

use super::model::MemoryConfig;
use crate::error::{LoreError, LoreResult};
use std::collections::HashSet;

/// Smallest line budget that still leaves room for text plus the truncation marker
pub const MIN_LINE_LENGTH: usize = 8;

impl MemoryConfig {
    /// Check invariants the memory store relies on
    pub fn validate(&self) -> LoreResult<()> {
        if !(self.similarity_threshold > 0.0 && self.similarity_threshold <= 1.0) {
            return Err(LoreError::config(format!(
                "similarity_threshold must be in (0, 1], got {}",
                self.similarity_threshold
            )));
        }

        if self.limits.max_items_per_section == 0 {
            return Err(LoreError::config("max_items_per_section must be at least 1"));
        }

        if self.limits.max_line_length < MIN_LINE_LENGTH {
            return Err(LoreError::config(format!(
                "max_line_length must be at least {}, got {}",
                MIN_LINE_LENGTH, self.limits.max_line_length
            )));
        }

        if self.limits.default_size_kb == 0 {
            return Err(LoreError::config("default_size_kb must be at least 1"));
        }

        if let Some((agent, _)) = self
            .agents
            .iter()
            .find(|(_, o)| o.size_limit_kb == Some(0))
        {
            return Err(LoreError::config(format!(
                "size_limit_kb for agent '{}' must be at least 1",
                agent
            )));
        }

        check_section_name("default_section", &self.default_section)?;

        let mut seen = HashSet::new();
        for rule in &self.sections {
            check_section_name("section", &rule.name)?;
            if !seen.insert(rule.name.as_str()) {
                return Err(LoreError::config(format!(
                    "duplicate section '{}'",
                    rule.name
                )));
            }
            if let Some(keyword) = rule
                .keywords
                .iter()
                .find(|k| k.is_empty() || k.to_lowercase() != **k)
            {
                return Err(LoreError::config(format!(
                    "keyword '{}' in section '{}' must be non-empty lowercase",
                    keyword, rule.name
                )));
            }
        }

        Ok(())
    }
}

/// Section names must survive a write and re-parse as the same `## ` heading
fn check_section_name(field: &str, name: &str) -> LoreResult<()> {
    if name.trim().is_empty() {
        return Err(LoreError::config(format!("{field} name must not be empty")));
    }
    if name != name.trim()
        || name.contains(|c| c == '\n' || c == '\r')
        || name.starts_with('#')
    {
        return Err(LoreError::config(format!(
            "{field} name {name:?} must be a single line without surrounding whitespace or a leading '#'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AgentOverrides, SectionRule};

    #[test]
    fn test_default_config_is_valid() {
        assert!(MemoryConfig::default().validate().is_ok());
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(MemoryConfig::default().similarity_threshold(0.0).validate().is_err());
        assert!(MemoryConfig::default().similarity_threshold(1.5).validate().is_err());
        assert!(MemoryConfig::default().similarity_threshold(1.0).validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(MemoryConfig::default().max_items_per_section(0).validate().is_err());
        assert!(MemoryConfig::default().max_line_length(3).validate().is_err());
    }

    #[test]
    fn test_zero_agent_budget_rejected() {
        let config = MemoryConfig::default().with_agent(
            "qa",
            AgentOverrides {
                size_limit_kb: Some(0),
                ..Default::default()
            },
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_and_uppercase_rules_rejected() {
        let mut config = MemoryConfig::default();
        config.sections.push(SectionRule::new("Integration Points", &["api"]));
        assert!(config.validate().is_err());

        let mut config = MemoryConfig::default();
        config.sections = vec![SectionRule::new("Testing", &["Assert"])];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_section_names_must_round_trip_as_headings() {
        for name in ["Testing ", " Testing", "Test\ning", "Testing\r", "# Testing", "   "] {
            let mut config = MemoryConfig::default();
            config.sections = vec![SectionRule::new(name, &["assert"])];
            assert!(config.validate().is_err(), "accepted {name:?}");
        }

        let mut config = MemoryConfig::default();
        config.default_section = "Recent Learnings ".to_string();
        assert!(config.validate().is_err());

        let mut config = MemoryConfig::default();
        config.sections = vec![SectionRule::new("C# Tooling", &["dotnet"])];
        assert!(config.validate().is_ok());
    }
}
