//! Enumerations and small field types shared by tasks and boards.
//!
//! These are the closed vocabularies of the data model: task priority, sprint
//! status, attachment kinds and the two board flavours.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Task priority. Drives Scrum ordering hints; in Kanban it is a free activity marker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
pub enum Priority {
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
}

/// Lifecycle of a sprint.
///
/// `planned -> active -> completed`, with `completed -> active` as the only
/// backwards edge (reopen).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SprintStatus {
    #[default]
    Planned,
    Active,
    Completed,
}

impl fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SprintStatus::Planned => "planned",
            SprintStatus::Active => "active",
            SprintStatus::Completed => "completed",
        })
    }
}

/// What an attachment points at.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    #[default]
    File,
    Image,
    Link,
    Document,
}

/// The two board flavours a project can carry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BoardKind {
    Kanban,
    Scrum,
}

/// Format a priority for display.
pub fn format_priority(p: Option<Priority>) -> &'static str {
    match p {
        Some(Priority::Low) => "Low",
        Some(Priority::Medium) => "Medium",
        Some(Priority::High) => "High",
        None => "-",
    }
}
