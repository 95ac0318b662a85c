//! Starter layouts for new Kanban boards.

use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::kanban::{KanbanBoard, KanbanColumn};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BoardTemplate {
    Blank,
    #[default]
    Basic,
    Software,
    Personal,
}

impl BoardTemplate {
    /// (title, colour) of each column, left to right.
    pub fn columns(self) -> &'static [(&'static str, &'static str)] {
        match self {
            BoardTemplate::Blank => &[],
            BoardTemplate::Basic => &[
                ("To Do", "#64748b"),
                ("In Progress", "#3b82f6"),
                ("Done", "#22c55e"),
            ],
            BoardTemplate::Software => &[
                ("Backlog", "#94a3b8"),
                ("To Do", "#64748b"),
                ("In Progress", "#3b82f6"),
                ("Review", "#f59e0b"),
                ("Done", "#22c55e"),
            ],
            BoardTemplate::Personal => &[
                ("Ideas", "#a855f7"),
                ("Doing", "#3b82f6"),
                ("Done", "#22c55e"),
            ],
        }
    }
}

impl FromStr for BoardTemplate {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        <BoardTemplate as ValueEnum>::from_str(s, true)
            .map_err(|_| BoardError::config(format!("unknown board template '{s}'")))
    }
}

impl KanbanBoard {
    /// Build a board from a template; `next_id` supplies one id per column.
    pub fn from_template(template: BoardTemplate, mut next_id: impl FnMut() -> String) -> Result<Self> {
        let columns = template
            .columns()
            .iter()
            .map(|&(title, color)| KanbanColumn::new(next_id(), title, Some(color)))
            .collect::<Result<Vec<_>>>()?;
        KanbanBoard::with_columns(columns)
    }
}
