//! Keyword-driven section classification

use crate::config::SectionRule;

/// Pick the target section for a learning.
///
/// Each rule scores one point per keyword found as a case-insensitive
/// substring of the text. The highest non-zero score wins; ties go to the
/// rule declared first. With no match the learning goes to `default_section`.
pub fn classify<'a>(text: &str, rules: &'a [SectionRule], default_section: &'a str) -> &'a str {
    let normalized = normalize(text);

    let mut best: Option<(&'a str, usize)> = None;
    for rule in rules {
        let score = rule
            .keywords
            .iter()
            .filter(|keyword| normalized.contains(keyword.as_str()))
            .count();

        // strict > keeps the earliest rule on ties
        if score > 0 && best.is_none_or(|(_, top)| score > top) {
            best = Some((rule.name.as_str(), score));
        }
    }

    match best {
        Some((section, score)) => {
            tracing::debug!(section, score, "classified learning");
            section
        }
        None => default_section,
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults;

    fn table() -> Vec<SectionRule> {
        vec![
            SectionRule::new("Project Architecture", &["architecture", "layer"]),
            SectionRule::new(
                "Integration Points",
                &["integration", "interface", "api", "connection", "database", "pooling"],
            ),
            SectionRule::new("Performance Considerations", &["cache", "latency"]),
        ]
    }

    #[test]
    fn test_integration_points() {
        let rules = table();
        let section = classify(
            "Database connections use connection pooling via SQLAlchemy",
            &rules,
            "Recent Learnings",
        );
        assert_eq!(section, "Integration Points");
    }

    #[test]
    fn test_default_when_nothing_matches() {
        let rules = table();
        assert_eq!(
            classify("Tabs are four spaces wide", &rules, "Recent Learnings"),
            "Recent Learnings"
        );
    }

    #[test]
    fn test_tie_goes_to_first_declared() {
        let rules = table();
        // one hit each for architecture and performance
        assert_eq!(
            classify("The cache layer is shared", &rules, "Recent Learnings"),
            "Project Architecture"
        );
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let rules = table();
        assert_eq!(
            classify("LATENCY   spikes\nwhen the CACHE is cold", &rules, "Recent Learnings"),
            "Performance Considerations"
        );
    }

    #[test]
    fn test_deterministic_with_default_table() {
        let rules = defaults::section_rules();
        let text = "Database connections use connection pooling via SQLAlchemy";
        let first = classify(text, &rules, defaults::DEFAULT_SECTION);
        for _ in 0..10 {
            assert_eq!(classify(text, &rules, defaults::DEFAULT_SECTION), first);
        }
        assert_eq!(first, "Integration Points");
    }
}
