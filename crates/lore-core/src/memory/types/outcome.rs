//! Result of submitting a learning

use serde::{Deserialize, Serialize};

/// Why a learning was not stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Nothing left after trimming
    Empty,
    /// The document cannot fit the item even after evicting everything else
    OverCapacity,
}

/// Outcome of one insert attempt
///
/// None of these are errors: callers should not retry a `Duplicate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InsertOutcome {
    /// Memory is turned off for this agent
    Disabled,
    /// An item at or above the similarity threshold already exists
    Duplicate {
        section: String,
        existing: String,
        similarity: f32,
    },
    /// Appended without evicting anything
    Inserted { section: String },
    /// Appended; older items were evicted to respect a budget
    InsertedWithEviction {
        section: String,
        evicted: Vec<String>,
    },
    /// Not stored
    Rejected { reason: RejectReason },
}

impl InsertOutcome {
    /// Whether the document gained a new item
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted { .. } | Self::InsertedWithEviction { .. })
    }

    /// Target section, when one was chosen
    pub fn section(&self) -> Option<&str> {
        match self {
            Self::Duplicate { section, .. }
            | Self::Inserted { section }
            | Self::InsertedWithEviction { section, .. } => Some(section),
            Self::Disabled | Self::Rejected { .. } => None,
        }
    }

    /// Short label for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Duplicate { .. } => "duplicate",
            Self::Inserted { .. } => "inserted",
            Self::InsertedWithEviction { .. } => "inserted (with eviction)",
            Self::Rejected {
                reason: RejectReason::Empty,
            } => "rejected (empty)",
            Self::Rejected {
                reason: RejectReason::OverCapacity,
            } => "rejected (over capacity)",
        }
    }
}
