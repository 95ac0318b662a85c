//! Project records: a named board plus metadata.
//!
//! Project ids are slugs derived from the display name, so "My Project" is
//! addressed as `my_project` on the command line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{require_text, BoardError, Result};
use crate::fields::BoardKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub board: Board,
}

/// One line of a project listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub kind: BoardKind,
    pub task_count: usize,
}

impl Project {
    /// Create a project whose id is derived from `name`.
    pub fn new(name: &str, description: Option<String>, board: Board, now: DateTime<Utc>) -> Result<Self> {
        let name = require_text("project name", name)?;
        let id = project_slug(&name);
        if id.is_empty() {
            return Err(BoardError::validation(
                "project name",
                "must contain at least one letter or digit",
            ));
        }
        Ok(Project {
            id,
            name,
            description: description.filter(|d| !d.trim().is_empty()),
            created_at: now,
            board,
        })
    }

    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            kind: self.board.kind(),
            task_count: self.board.task_count(),
        }
    }
}

/// Lowercase the name and collapse every run of non-alphanumerics into one underscore.
pub fn project_slug(display_name: &str) -> String {
    display_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .split('_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
