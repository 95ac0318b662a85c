//! Kind-agnostic wrapper over the two board flavours.
//!
//! Callers that only need "containers of tasks" (the store, the TUI, stats
//! printing) work through `Board`; Kanban- or Scrum-only operations are reached
//! by matching on the variant.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fields::{BoardKind, SprintStatus};
use crate::kanban::KanbanBoard;
use crate::scrum::{ContainerRef, ScrumBoard};
use crate::task::{Task, TaskPatch};

/// A project's board, tagged by kind in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Board {
    Kanban(KanbanBoard),
    Scrum(ScrumBoard),
}

/// Read-only view of one container, in display order.
#[derive(Debug, Clone)]
pub struct ContainerView<'a> {
    pub id: String,
    pub title: String,
    pub color: Option<&'a str>,
    /// Present for sprints only.
    pub status: Option<SprintStatus>,
    pub tasks: &'a [Task],
}

impl Board {
    pub fn empty(kind: BoardKind) -> Self {
        match kind {
            BoardKind::Kanban => Board::Kanban(KanbanBoard::new()),
            BoardKind::Scrum => Board::Scrum(ScrumBoard::new()),
        }
    }

    pub fn kind(&self) -> BoardKind {
        match self {
            Board::Kanban(_) => BoardKind::Kanban,
            Board::Scrum(_) => BoardKind::Scrum,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Board::Kanban(b) => b.validate(),
            Board::Scrum(b) => b.validate(),
        }
    }

    pub fn task_count(&self) -> usize {
        match self {
            Board::Kanban(b) => b.task_count(),
            Board::Scrum(b) => b.task_count(),
        }
    }

    /// Every task, in container display order.
    pub fn all_tasks(&self) -> Vec<&Task> {
        match self {
            Board::Kanban(b) => b.all_tasks().collect(),
            Board::Scrum(b) => b.all_tasks().collect(),
        }
    }

    /// Containers in display order: columns, or backlog followed by sprints.
    pub fn containers(&self) -> Vec<ContainerView<'_>> {
        match self {
            Board::Kanban(b) => b
                .columns
                .iter()
                .map(|c| ContainerView {
                    id: c.id.clone(),
                    title: c.title.clone(),
                    color: c.color.as_deref(),
                    status: None,
                    tasks: &c.tasks,
                })
                .collect(),
            Board::Scrum(b) => std::iter::once(ContainerView {
                id: ContainerRef::Backlog.to_string(),
                title: "Backlog".to_string(),
                color: None,
                status: None,
                tasks: &b.backlog,
            })
            .chain(b.sprints.iter().map(|s| ContainerView {
                id: s.id.clone(),
                title: s.title.clone(),
                color: None,
                status: Some(s.status),
                tasks: &s.tasks,
            }))
            .collect(),
        }
    }

    /// Locate a task, returning the id of its container.
    pub fn find_task(&self, task_id: &str) -> Option<(String, &Task)> {
        match self {
            Board::Kanban(b) => b.find_task(task_id).map(|(c, t)| (c.id.clone(), t)),
            Board::Scrum(b) => b.find_task(task_id).map(|(c, t)| (c.to_string(), t)),
        }
    }

    /// Append a new task to the named container.
    pub fn add_task(
        &self,
        container: &str,
        task_id: &str,
        content: &str,
        assignee: Option<String>,
    ) -> Result<Self> {
        match self {
            Board::Kanban(b) => b.add_task(container, task_id, content, assignee).map(Board::Kanban),
            Board::Scrum(b) => {
                let task = Task::new(task_id, content)?.with_assignee(assignee);
                b.insert_task(&container.parse()?, task).map(Board::Scrum)
            }
        }
    }

    pub fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<Self> {
        match self {
            Board::Kanban(b) => b.update_task(task_id, patch).map(Board::Kanban),
            Board::Scrum(b) => b.update_task(task_id, patch).map(Board::Scrum),
        }
    }

    pub fn delete_task(&self, container: &str, task_id: &str) -> Result<Self> {
        match self {
            Board::Kanban(b) => b.delete_task(container, task_id).map(Board::Kanban),
            Board::Scrum(b) => b.delete_task(&container.parse()?, task_id).map(Board::Scrum),
        }
    }

    /// Move a task between containers named by id (`"backlog"` for the Scrum backlog).
    pub fn move_task(
        &self,
        task_id: &str,
        source: &str,
        target: &str,
        before: Option<&str>,
    ) -> Result<Self> {
        match self {
            Board::Kanban(b) => b.move_task(task_id, source, target, before).map(Board::Kanban),
            Board::Scrum(b) => {
                let (source, target): (ContainerRef, ContainerRef) = (source.parse()?, target.parse()?);
                b.move_task(task_id, &source, &target, before).map(Board::Scrum)
            }
        }
    }
}
