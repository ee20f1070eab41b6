//! Learning insert, extraction and inspection operations

use super::extract::{ExtractResult, extract_learnings};
use super::service::MemoryService;
use super::stats::MemoryStats;
use crate::error::{LoreError, LoreResult};
use crate::memory::classifier::classify;
use crate::memory::sections::{InsertLimits, insert, serialize};
use crate::memory::types::{AgentId, InsertOutcome, MemoryDocument};

/// Where a pending learning should go
enum Target<'a> {
    Classify,
    Section(&'a str),
}

impl MemoryService {
    /// Classify `text` and store it in the matching section
    pub async fn add_learning(&self, agent_id: &str, text: &str) -> LoreResult<InsertOutcome> {
        let agent = AgentId::parse(agent_id)?;
        let mut outcomes = self.apply(&agent, &[(Target::Classify, text)]).await?;
        Ok(outcomes.pop().unwrap_or(InsertOutcome::Disabled))
    }

    /// Store `text` in `section`, bypassing the classifier
    pub async fn add_learning_to_section(
        &self,
        agent_id: &str,
        section: &str,
        text: &str,
    ) -> LoreResult<InsertOutcome> {
        let agent = AgentId::parse(agent_id)?;
        let section = section.trim();
        if section.is_empty() || section.contains(['\n', '\r']) {
            return Err(LoreError::invalid_input(format!(
                "section name must be a single non-empty line, got {section:?}"
            )));
        }

        let mut outcomes = self
            .apply(&agent, &[(Target::Section(section), text)])
            .await?;
        Ok(outcomes.pop().unwrap_or(InsertOutcome::Disabled))
    }

    /// Store several learnings in order under one lock and one save
    pub async fn add_learnings<S: AsRef<str>>(
        &self,
        agent_id: &str,
        texts: &[S],
    ) -> LoreResult<Vec<InsertOutcome>> {
        let agent = AgentId::parse(agent_id)?;
        let entries: Vec<(Target<'_>, &str)> = texts
            .iter()
            .map(|text| (Target::Classify, text.as_ref()))
            .collect();
        self.apply(&agent, &entries).await
    }

    /// Apply any `{"remember": [...]}` learnings found in an agent response.
    ///
    /// Returns how many learnings were stored. A response without usable
    /// learnings is not an error.
    pub async fn extract_and_apply(&self, agent_id: &str, response: &str) -> LoreResult<usize> {
        let agent = AgentId::parse(agent_id)?;
        if !self.config.auto_learning_for(agent.as_str()) {
            tracing::debug!(agent_id = %agent, "auto learning disabled, skipping extraction");
            return Ok(0);
        }

        let learnings = match extract_learnings(response) {
            ExtractResult::Found(learnings) => learnings,
            ExtractResult::NotFound => return Ok(0),
            ExtractResult::Malformed(reason) => {
                tracing::debug!(agent_id = %agent, %reason, "ignoring malformed learnings block");
                return Ok(0);
            }
        };

        let outcomes = self.add_learnings(agent.as_str(), &learnings).await?;
        let applied = outcomes.iter().filter(|o| o.is_inserted()).count();
        tracing::info!(
            agent_id = %agent,
            found = learnings.len(),
            applied,
            "applied extracted learnings"
        );
        Ok(applied)
    }

    /// Load a private copy of the agent's document
    pub async fn load(&self, agent_id: &str) -> LoreResult<MemoryDocument> {
        let agent = AgentId::parse(agent_id)?;
        Ok(self.repository.load(&agent).await?)
    }

    /// Serialized document text, as it is (or would be) stored
    pub async fn load_for_display(&self, agent_id: &str) -> LoreResult<String> {
        let doc = self.load(agent_id).await?;
        Ok(serialize(&doc))
    }

    /// Per-section counts and size against the agent's budget
    pub async fn stats(&self, agent_id: &str) -> LoreResult<MemoryStats> {
        let doc = self.load(agent_id).await?;
        Ok(MemoryStats::from_document(&doc, &self.config))
    }

    /// Agents that have a stored document
    pub async fn list_agents(&self) -> LoreResult<Vec<AgentId>> {
        Ok(self.repository.list_agents().await?)
    }

    /// Lock, load, insert every entry, and save once if anything changed
    async fn apply(
        &self,
        agent: &AgentId,
        entries: &[(Target<'_>, &str)],
    ) -> LoreResult<Vec<InsertOutcome>> {
        if !self.config.is_enabled_for(agent.as_str()) {
            tracing::debug!(agent_id = %agent, "memory disabled for agent");
            return Ok(entries.iter().map(|_| InsertOutcome::Disabled).collect());
        }

        let limits = InsertLimits::for_agent(&self.config, agent);
        let lock = self.repository.lock(agent).await?;
        let mut doc = self.repository.load(agent).await?;

        let outcomes: Vec<InsertOutcome> = entries
            .iter()
            .map(|(target, text)| {
                let section = match target {
                    Target::Classify => {
                        classify(text, &self.config.sections, &self.config.default_section)
                    }
                    Target::Section(name) => *name,
                };
                insert(&mut doc, section, text, &limits)
            })
            .collect();

        if outcomes.iter().any(InsertOutcome::is_inserted) {
            self.repository.save(&lock, &doc).await?;
        }

        Ok(outcomes)
    }
}
