//! Kanban board: an ordered list of columns, each an ordered list of tasks.
//!
//! Every operation takes `&self` and returns a fresh board. Validation happens
//! before the copy is touched, so an `Err` always leaves the caller's board as
//! it was.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::container::{self, Identified};
use crate::error::{require_text, BoardError, Result};
use crate::task::{Task, TaskPatch};

/// Colour given to columns created without one.
pub const DEFAULT_COLUMN_COLOR: &str = "#64748b";

/// A column of tasks. `color` is a display hint only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KanbanColumn {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Identified for KanbanColumn {
    fn id(&self) -> &str {
        &self.id
    }
}

impl KanbanColumn {
    /// Create an empty column.
    pub fn new(id: impl Into<String>, title: &str, color: Option<&str>) -> Result<Self> {
        Ok(KanbanColumn {
            id: require_text("column id", &id.into())?,
            title: require_text("column title", title)?,
            color: Some(color.unwrap_or(DEFAULT_COLUMN_COLOR).to_string()),
            tasks: Vec::new(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KanbanBoard {
    #[serde(default)]
    pub columns: Vec<KanbanColumn>,
}

impl KanbanBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from already-constructed columns, checking invariants.
    pub fn with_columns(columns: Vec<KanbanColumn>) -> Result<Self> {
        let board = KanbanBoard { columns };
        board.validate()?;
        Ok(board)
    }

    /// Check id invariants: non-empty, column ids unique, task ids unique across the board.
    pub fn validate(&self) -> Result<()> {
        for column in &self.columns {
            if column.id.trim().is_empty() {
                return Err(BoardError::decode("column with empty id"));
            }
            for task in &column.tasks {
                if task.id.trim().is_empty() {
                    return Err(BoardError::decode(format!(
                        "task with empty id in column '{}'",
                        column.id
                    )));
                }
            }
        }
        if let Some(dup) = container::first_duplicate(self.columns.iter().map(|c| c.id.as_str())) {
            return Err(BoardError::decode(format!("duplicate column id '{dup}'")));
        }
        if let Some(dup) = container::first_duplicate(self.all_tasks().map(|t| t.id.as_str())) {
            return Err(BoardError::decode(format!("duplicate task id '{dup}'")));
        }
        Ok(())
    }

    pub fn column(&self, column_id: &str) -> Option<&KanbanColumn> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    fn column_index(&self, column_id: &str) -> Result<usize> {
        container::index_of(&self.columns, column_id)
            .ok_or_else(|| BoardError::not_found("column", column_id))
    }

    /// Every task on the board, column by column.
    pub fn all_tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.iter().flat_map(|c| c.tasks.iter())
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    /// Locate a task and the column that holds it.
    pub fn find_task(&self, task_id: &str) -> Option<(&KanbanColumn, &Task)> {
        self.columns.iter().find_map(|c| {
            c.tasks.iter().find(|t| t.id == task_id).map(|t| (c, t))
        })
    }

    fn contains_task(&self, task_id: &str) -> bool {
        self.find_task(task_id).is_some()
    }

    /// Append a new empty column.
    pub fn add_column(&self, column_id: &str, title: &str, color: Option<&str>) -> Result<Self> {
        let column = KanbanColumn::new(column_id, title, color)?;
        if self.column(&column.id).is_some() {
            return Err(BoardError::validation("column id", format!("'{}' already exists", column.id)));
        }
        let mut next = self.clone();
        next.columns.push(column);
        Ok(next)
    }

    pub fn rename_column(&self, column_id: &str, title: &str) -> Result<Self> {
        let idx = self.column_index(column_id)?;
        let title = require_text("column title", title)?;
        let mut next = self.clone();
        next.columns[idx].title = title;
        Ok(next)
    }

    /// Remove a column together with every task in it.
    pub fn delete_column(&self, column_id: &str) -> Result<Self> {
        let idx = self.column_index(column_id)?;
        let mut next = self.clone();
        let removed = next.columns.remove(idx);
        debug!(column = column_id, tasks = removed.tasks.len(), "deleted column");
        Ok(next)
    }

    /// Move a column so it sits before `before`, or at the end when `before` is `None`.
    pub fn reorder_column(&self, column_id: &str, before: Option<&str>) -> Result<Self> {
        self.column_index(column_id)?;
        if let Some(anchor) = before {
            self.column_index(anchor)?;
        }
        let mut next = self.clone();
        container::reorder(&mut next.columns, column_id, before);
        Ok(next)
    }

    pub fn set_column_color(&self, column_id: &str, color: Option<&str>) -> Result<Self> {
        let idx = self.column_index(column_id)?;
        let mut next = self.clone();
        next.columns[idx].color = color.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
        Ok(next)
    }

    /// Append a new task to the end of a column.
    pub fn add_task(
        &self,
        column_id: &str,
        task_id: &str,
        content: &str,
        assignee: Option<String>,
    ) -> Result<Self> {
        let task = Task::new(task_id, content)?.with_assignee(assignee);
        self.insert_task(column_id, task)
    }

    /// Append an already-built task (e.g. one produced by a generator) to a column.
    pub fn insert_task(&self, column_id: &str, task: Task) -> Result<Self> {
        let idx = self.column_index(column_id)?;
        require_text("task id", &task.id)?;
        require_text("task content", &task.content)?;
        if self.contains_task(&task.id) {
            return Err(BoardError::validation("task id", format!("'{}' already exists", task.id)));
        }
        let mut next = self.clone();
        next.columns[idx].tasks.push(task);
        Ok(next)
    }

    /// Merge `patch` into the task wherever it lives.
    pub fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<Self> {
        patch.validate()?;
        let (col, pos) = self.locate(task_id)?;
        let mut next = self.clone();
        patch.apply(&mut next.columns[col].tasks[pos]);
        Ok(next)
    }

    pub fn delete_task(&self, column_id: &str, task_id: &str) -> Result<Self> {
        let col = self.column_index(column_id)?;
        let pos = container::index_of(&self.columns[col].tasks, task_id)
            .ok_or_else(|| BoardError::not_found("task", task_id))?;
        let mut next = self.clone();
        next.columns[col].tasks.remove(pos);
        Ok(next)
    }

    /// Move a task out of `source` and into `target`, before `before` when it
    /// is still present there, otherwise at the end.
    ///
    /// With `source == target` this is an in-place reorder: the task is removed
    /// first and `before` is resolved against the remaining tasks.
    pub fn move_task(
        &self,
        task_id: &str,
        source: &str,
        target: &str,
        before: Option<&str>,
    ) -> Result<Self> {
        let src = self.column_index(source)?;
        let dst = self.column_index(target)?;
        let from = container::index_of(&self.columns[src].tasks, task_id).ok_or_else(|| {
            BoardError::not_found("task", format!("{task_id} in column {source}"))
        })?;

        let mut next = self.clone();
        if src == dst && before == Some(task_id) {
            return Ok(next);
        }
        let task = next.columns[src].tasks.remove(from);
        let placed = container::insert_before(&mut next.columns[dst].tasks, task, before);
        debug!(task = task_id, source, target, ?placed, "moved task");
        Ok(next)
    }

    /// Swap in a wholesale set of columns (e.g. from a board generator).
    pub fn replace_columns(&self, columns: Vec<KanbanColumn>) -> Result<Self> {
        Self::with_columns(columns)
    }

    /// Append generated tasks to a column, rejecting ids already on the board.
    pub fn append_generated(&self, column_id: &str, tasks: Vec<Task>) -> Result<Self> {
        let idx = self.column_index(column_id)?;
        for task in &tasks {
            if self.contains_task(&task.id) {
                return Err(BoardError::decode(format!("generated task id '{}' already on board", task.id)));
            }
        }
        let mut next = self.clone();
        next.columns[idx].tasks.extend(tasks);
        next.validate()?;
        Ok(next)
    }

    fn locate(&self, task_id: &str) -> Result<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(ci, c)| container::index_of(&c.tasks, task_id).map(|ti| (ci, ti)))
            .ok_or_else(|| BoardError::not_found("task", task_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> KanbanBoard {
        KanbanBoard::new()
            .add_column("todo", "To Do", None)
            .and_then(|b| b.add_column("doing", "Doing", None))
            .and_then(|b| b.add_column("done", "Done", None))
            .and_then(|b| b.add_task("todo", "t1", "Write", None))
            .and_then(|b| b.add_task("todo", "t2", "Review", Some("Ana".into())))
            .and_then(|b| b.add_task("todo", "t3", "Ship", None))
            .unwrap()
    }

    fn ids(board: &KanbanBoard, column: &str) -> Vec<String> {
        board.column(column).unwrap().tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_add_column_defaults() {
        let b = KanbanBoard::new().add_column("c1", "  Backlog ", None).unwrap();
        assert_eq!(b.columns[0].title, "Backlog");
        assert_eq!(b.columns[0].color.as_deref(), Some(DEFAULT_COLUMN_COLOR));
        assert!(b.columns[0].tasks.is_empty());

        assert!(b.add_column("c2", "   ", None).unwrap_err().is_validation());
        assert!(b.add_column("c1", "Again", None).unwrap_err().is_validation());
    }

    #[test]
    fn test_rename_column() {
        let b = board();
        let renamed = b.rename_column("doing", "In Progress").unwrap();
        assert_eq!(renamed.column("doing").unwrap().title, "In Progress");
        assert!(b.rename_column("nope", "x").unwrap_err().is_not_found());
        assert!(b.rename_column("doing", "").unwrap_err().is_validation());
    }

    #[test]
    fn test_delete_column_removes_its_tasks() {
        let b = board();
        let before = b.task_count();
        let after = b.delete_column("todo").unwrap();
        assert_eq!(after.task_count(), before - 3);
        assert!(after.find_task("t1").is_none());
        assert_eq!(after.columns.len(), 2);
        assert!(b.delete_column("todo-x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_reorder_column() {
        let b = board();
        let moved = b.reorder_column("done", Some("todo")).unwrap();
        let order: Vec<_> = moved.columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, ["done", "todo", "doing"]);

        let moved = b.reorder_column("todo", None).unwrap();
        let order: Vec<_> = moved.columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, ["doing", "done", "todo"]);

        assert_eq!(b.reorder_column("doing", Some("doing")).unwrap(), b);
        assert!(b.reorder_column("doing", Some("ghost")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_set_column_color() {
        let b = board().set_column_color("done", Some("#22c55e")).unwrap();
        assert_eq!(b.column("done").unwrap().color.as_deref(), Some("#22c55e"));
    }

    #[test]
    fn test_add_task_errors() {
        let b = board();
        assert!(b.add_task("todo", "t9", "  ", None).unwrap_err().is_validation());
        assert!(b.add_task("ghost", "t9", "x", None).unwrap_err().is_not_found());
        assert!(b.add_task("done", "t1", "dup", None).unwrap_err().is_validation());
        assert_eq!(ids(&b.add_task("done", "t9", "x", None).unwrap(), "done"), ["t9"]);
    }

    #[test]
    fn test_insert_task_rejects_blank_id() {
        let b = board();
        let task = Task { id: "  ".into(), ..Task::new("t9", "Built by hand").unwrap() };
        assert!(b.insert_task("done", task).unwrap_err().is_validation());
        assert_eq!(b.task_count(), 3);
    }

    #[test]
    fn test_update_task_anywhere() {
        let b = board().move_task("t2", "todo", "doing", None).unwrap();
        let patch = TaskPatch {
            content: Some("Review PR".into()),
            ..Default::default()
        };
        let updated = b.update_task("t2", &patch).unwrap();
        let (column, task) = updated.find_task("t2").unwrap();
        assert_eq!(column.id, "doing");
        assert_eq!(task.content, "Review PR");
        assert!(b.update_task("ghost", &patch).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_task() {
        let b = board().delete_task("todo", "t2").unwrap();
        assert_eq!(ids(&b, "todo"), ["t1", "t3"]);
        assert!(b.delete_task("done", "t1").unwrap_err().is_not_found());
    }

    #[test]
    fn test_move_between_columns() {
        let b = KanbanBoard::new()
            .add_column("todo", "To Do", None)
            .and_then(|b| b.add_column("done", "Done", None))
            .and_then(|b| b.add_task("todo", "t1", "Task", None))
            .unwrap();
        let moved = b.move_task("t1", "todo", "done", None).unwrap();
        assert!(ids(&moved, "todo").is_empty());
        assert_eq!(ids(&moved, "done"), ["t1"]);
    }

    #[test]
    fn test_move_preserves_counts_and_fields() {
        let b = board();
        let original = b.find_task("t2").unwrap().1.clone();
        let moved = b.move_task("t2", "todo", "doing", None).unwrap();
        assert_eq!(moved.task_count(), b.task_count());
        assert_eq!(moved.column("todo").unwrap().tasks.len(), 2);
        assert_eq!(moved.column("doing").unwrap().tasks.len(), 1);
        assert_eq!(moved.find_task("t2").unwrap().1, &original);
    }

    #[test]
    fn test_move_before_anchor_in_target() {
        let b = board()
            .move_task("t1", "todo", "done", None)
            .and_then(|b| b.move_task("t3", "todo", "done", Some("t1")))
            .unwrap();
        assert_eq!(ids(&b, "done"), ["t3", "t1"]);
    }

    #[test]
    fn test_reorder_within_column_is_permutation() {
        let b = board();
        let moved = b.move_task("t1", "todo", "todo", Some("t3")).unwrap();
        assert_eq!(ids(&moved, "todo"), ["t2", "t1", "t3"]);

        let moved = b.move_task("t3", "todo", "todo", Some("t1")).unwrap();
        assert_eq!(ids(&moved, "todo"), ["t3", "t1", "t2"]);

        assert_eq!(b.move_task("t2", "todo", "todo", Some("t2")).unwrap(), b);
    }

    #[test]
    fn test_move_missing_anchor_appends() {
        let b = board()
            .move_task("t1", "todo", "done", None)
            .and_then(|b| b.move_task("t2", "todo", "done", Some("vanished")))
            .unwrap();
        assert_eq!(ids(&b, "done"), ["t1", "t2"]);
    }

    #[test]
    fn test_move_errors_leave_board_untouched() {
        let b = board();
        assert!(b.move_task("t1", "doing", "done", None).unwrap_err().is_not_found());
        assert!(b.move_task("t1", "todo", "ghost", None).unwrap_err().is_not_found());
        assert!(b.move_task("t1", "ghost", "done", None).unwrap_err().is_not_found());
        assert_eq!(ids(&b, "todo"), ["t1", "t2", "t3"]);
    }

    #[test]
    fn test_validate_rejects_duplicate_task_ids() {
        let mut col_a = KanbanColumn::new("a", "A", None).unwrap();
        let mut col_b = KanbanColumn::new("b", "B", None).unwrap();
        col_a.tasks.push(Task::new("t1", "x").unwrap());
        col_b.tasks.push(Task::new("t1", "y").unwrap());
        let err = KanbanBoard::with_columns(vec![col_a, col_b]).unwrap_err();
        assert!(matches!(err, BoardError::Decode { .. }));
    }

    #[test]
    fn test_append_generated_rejects_collisions() {
        let b = board();
        let fresh = vec![Task::new("g1", "Generated").unwrap()];
        let next = b.append_generated("doing", fresh).unwrap();
        assert_eq!(ids(&next, "doing"), ["g1"]);

        let clash = vec![Task::new("t1", "Clash").unwrap()];
        assert!(b.append_generated("doing", clash).is_err());
    }
}
