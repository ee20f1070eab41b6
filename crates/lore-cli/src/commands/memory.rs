//! Memory commands: add, extract, show, stats, list, classify

use crate::console::CliConsole;
use colored::*;
use lore_core::memory::classify;
use lore_core::{LoreError, LoreResult, MemoryConfig, MemoryService};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Store one learning, classified or into an explicit section
pub async fn add(
    service: &MemoryService,
    console: &CliConsole,
    agent: &str,
    text: &str,
    section: Option<&str>,
) -> LoreResult<()> {
    let outcome = match section {
        Some(section) => service.add_learning_to_section(agent, section, text).await?,
        None => service.add_learning(agent, text).await?,
    };
    console.print_outcome(text, &outcome);
    Ok(())
}

/// Apply learnings from an agent reply read from `file` or stdin
pub async fn extract(
    service: &MemoryService,
    console: &CliConsole,
    agent: &str,
    file: Option<&Path>,
) -> LoreResult<()> {
    let response = match file {
        Some(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
            LoreError::invalid_input(format!("failed to read {}: {e}", path.display()))
        })?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .map_err(|e| LoreError::invalid_input(format!("failed to read stdin: {e}")))?;
            buf
        }
    };

    let applied = service.extract_and_apply(agent, &response).await?;
    if applied == 0 {
        console.info("No new learnings applied");
    } else {
        console.success(&format!("Applied {applied} learning(s) for '{agent}'"));
    }
    Ok(())
}

/// Print the serialized document
pub async fn show(service: &MemoryService, agent: &str) -> LoreResult<()> {
    let text = service.load_for_display(agent).await?;
    print!("{text}");
    Ok(())
}

/// Print per-section counts and budget usage
pub async fn stats(
    service: &MemoryService,
    console: &CliConsole,
    agent: &str,
    json: bool,
) -> LoreResult<()> {
    let stats = service.stats(agent).await?;

    if json {
        let rendered = serde_json::to_string_pretty(&stats)
            .map_err(|e| LoreError::invalid_input(format!("failed to render stats: {e}")))?;
        println!("{rendered}");
        return Ok(());
    }

    console.print_header(&format!("Memory: {agent}"));
    console.print_field("Enabled", &yes_no(stats.enabled));
    console.print_field("Auto learning", &yes_no(stats.auto_learning));
    if let Some(path) = &stats.path {
        console.print_field("File", &path.display().to_string());
    }

    let usage = format!(
        "{} / {} bytes ({:.0}%)",
        stats.bytes,
        stats.byte_limit,
        stats.usage() * 100.0
    );
    let usage = if stats.usage() > 0.9 {
        usage.yellow().to_string()
    } else {
        usage
    };
    console.print_field("Size", &usage);
    console.print_field("Items", &stats.total_items.to_string());

    console.print_header("Sections");
    for section in &stats.sections {
        let count = section.items.to_string();
        let count = if section.items == 0 {
            count.dimmed().to_string()
        } else {
            count.cyan().to_string()
        };
        console.print_field(&section.name, &count);
    }
    Ok(())
}

/// List agents with a stored document
pub async fn list(service: &MemoryService, console: &CliConsole) -> LoreResult<()> {
    let agents = service.list_agents().await?;
    if agents.is_empty() {
        console.warn(&format!(
            "No memories found in {}",
            service.config().memories_dir.display()
        ));
        return Ok(());
    }

    for agent in agents {
        println!("{agent}");
    }
    Ok(())
}

/// Print the section `text` would be classified into
pub fn classify_text(config: &MemoryConfig, text: &str) {
    let section = classify(text, &config.sections, &config.default_section);
    println!("{section}");
}

fn yes_no(value: bool) -> String {
    if value {
        "yes".green().to_string()
    } else {
        "no".red().to_string()
    }
}
