//! CLI console utilities

use colored::*;
use lore_core::InsertOutcome;

/// CLI console for formatted output
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    /// Create a new CLI console
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message (verbose only)
    pub fn info(&self, message: &str) {
        if self.verbose {
            println!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message.green());
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        println!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    /// Print a header
    pub fn print_header(&self, title: &str) {
        println!();
        println!("{}", title.bold().underline());
        println!("{}", "=".repeat(title.chars().count()).dimmed());
    }

    /// Print a label/value row
    pub fn print_field(&self, label: &str, value: &str) {
        println!("  {:<22} {}", format!("{label}:").dimmed(), value);
    }

    /// Report the result of one insert
    pub fn print_outcome(&self, text: &str, outcome: &InsertOutcome) {
        match outcome {
            InsertOutcome::Inserted { section } => {
                self.success(&format!("Stored in '{section}'"));
            }
            InsertOutcome::InsertedWithEviction { section, evicted } => {
                self.success(&format!("Stored in '{section}'"));
                for item in evicted {
                    println!("  {} {}", "evicted".yellow(), item.dimmed());
                }
            }
            InsertOutcome::Duplicate {
                section,
                existing,
                similarity,
            } => {
                self.warn(&format!(
                    "Already known in '{section}' (similarity {similarity:.2})"
                ));
                self.info(&format!("existing: {existing}"));
            }
            InsertOutcome::Disabled => self.warn("Memory is disabled for this agent"),
            InsertOutcome::Rejected { .. } => {
                self.warn(&format!("Not stored ({}): {text}", outcome.label()));
            }
        }
    }
}
