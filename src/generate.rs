//! Boundary with the external board generator.
//!
//! The generator is an opaque service that returns board-shaped JSON. Nothing
//! it returns is trusted: output is decoded into typed fragments and checked
//! against the same invariants as any other board (non-empty, unique ids and
//! non-empty content) before the engine sees it.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::board::Board;
use crate::container;
use crate::error::{BoardError, Result};
use crate::kanban::{KanbanBoard, KanbanColumn};
use crate::task::Task;

/// Produces board-shaped JSON from free-text project context.
pub trait BoardGenerator {
    fn generate(&self, context: &str) -> Result<String>;
}

/// Reads generator output that was saved to disk.
#[derive(Debug, Clone)]
pub struct FileGenerator {
    pub path: PathBuf,
}

impl FileGenerator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileGenerator { path: path.into() }
    }
}

impl BoardGenerator for FileGenerator {
    fn generate(&self, context: &str) -> Result<String> {
        debug!(path = %self.path.display(), context_len = context.len(), "reading generated board");
        Ok(fs::read_to_string(&self.path)?)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColumnsPayload {
    Wrapped { columns: Vec<KanbanColumn> },
    Bare(Vec<KanbanColumn>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TasksPayload {
    Tasks { tasks: Vec<Task> },
    Backlog { backlog: Vec<Task> },
    Bare(Vec<Task>),
}

fn check_tasks(tasks: &[Task]) -> Result<()> {
    for task in tasks {
        if task.id.trim().is_empty() {
            return Err(BoardError::decode("generated task with empty id"));
        }
        if task.content.trim().is_empty() {
            return Err(BoardError::decode(format!("generated task '{}' has empty content", task.id)));
        }
    }
    if let Some(dup) = container::first_duplicate(tasks.iter().map(|t| t.id.as_str())) {
        return Err(BoardError::decode(format!("duplicate generated task id '{dup}'")));
    }
    Ok(())
}

/// Decode a full set of Kanban columns (`{"columns": [...]}` or a bare array).
pub fn decode_columns(raw: &str) -> Result<Vec<KanbanColumn>> {
    let payload: ColumnsPayload = serde_json::from_str(raw)
        .map_err(|e| BoardError::decode(format!("generated columns: {e}")))?;
    let columns = match payload {
        ColumnsPayload::Wrapped { columns } | ColumnsPayload::Bare(columns) => columns,
    };
    for column in &columns {
        if column.title.trim().is_empty() {
            return Err(BoardError::decode(format!("generated column '{}' has empty title", column.id)));
        }
        check_tasks(&column.tasks)?;
    }
    KanbanBoard::with_columns(columns.clone())?;
    Ok(columns)
}

/// Decode a list of tasks (`{"tasks": [...]}`, `{"backlog": [...]}` or a bare array).
pub fn decode_tasks(raw: &str) -> Result<Vec<Task>> {
    let payload: TasksPayload = serde_json::from_str(raw)
        .map_err(|e| BoardError::decode(format!("generated tasks: {e}")))?;
    let tasks = match payload {
        TasksPayload::Tasks { tasks } | TasksPayload::Backlog { backlog: tasks } | TasksPayload::Bare(tasks) => tasks,
    };
    check_tasks(&tasks)?;
    Ok(tasks)
}

/// How generated content is folded into an existing board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedMerge {
    /// Kanban only: replace every column.
    ReplaceColumns,
    /// Append tasks to a Kanban column.
    AppendToColumn(String),
    /// Scrum only: append tasks to the backlog.
    AppendToBacklog,
}

/// Run `generator` and merge its output into `board`.
pub fn apply_generated(
    board: &Board,
    generator: &dyn BoardGenerator,
    context: &str,
    merge: &GeneratedMerge,
) -> Result<Board> {
    let raw = generator.generate(context)?;
    match (board, merge) {
        (Board::Kanban(b), GeneratedMerge::ReplaceColumns) => {
            b.replace_columns(decode_columns(&raw)?).map(Board::Kanban)
        }
        (Board::Kanban(b), GeneratedMerge::AppendToColumn(column)) => {
            b.append_generated(column, decode_tasks(&raw)?).map(Board::Kanban)
        }
        (Board::Scrum(b), GeneratedMerge::AppendToBacklog) => {
            b.append_backlog(decode_tasks(&raw)?).map(Board::Scrum)
        }
        (board, merge) => Err(BoardError::validation(
            "merge",
            format!("{merge:?} does not apply to a {:?} board", board.kind()),
        )),
    }
}
