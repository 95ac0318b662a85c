//! Scrum board: an unsprinted backlog plus an ordered list of sprints.
//!
//! Sprints follow a strict lifecycle (`planned -> active -> completed`, with
//! reopen as the only way back). Like the Kanban board, every operation
//! returns a new board and leaves `self` alone.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::container::{self, Identified};
use crate::error::{require_text, BoardError, Result};
use crate::fields::SprintStatus;
use crate::task::{checked_story_points, Task, TaskPatch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: SprintStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Identified for Sprint {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A task holder on a Scrum board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContainerRef {
    Backlog,
    Sprint(String),
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerRef::Backlog => f.write_str("backlog"),
            ContainerRef::Sprint(id) => f.write_str(id),
        }
    }
}

impl FromStr for ContainerRef {
    type Err = BoardError;

    /// `"backlog"` names the backlog; anything else is taken as a sprint id.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(BoardError::validation("container", "must not be empty"));
        }
        if s.eq_ignore_ascii_case("backlog") {
            Ok(ContainerRef::Backlog)
        } else {
            Ok(ContainerRef::Sprint(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrumBoard {
    #[serde(default)]
    pub backlog: Vec<Task>,
    #[serde(default)]
    pub sprints: Vec<Sprint>,
}

impl ScrumBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check id invariants across backlog and sprints.
    pub fn validate(&self) -> Result<()> {
        if self.sprints.iter().any(|s| s.id.trim().is_empty()) {
            return Err(BoardError::decode("sprint with empty id"));
        }
        if self.all_tasks().any(|t| t.id.trim().is_empty()) {
            return Err(BoardError::decode("task with empty id"));
        }
        if let Some(dup) = container::first_duplicate(self.sprints.iter().map(|s| s.id.as_str())) {
            return Err(BoardError::decode(format!("duplicate sprint id '{dup}'")));
        }
        if let Some(dup) = container::first_duplicate(self.all_tasks().map(|t| t.id.as_str())) {
            return Err(BoardError::decode(format!("duplicate task id '{dup}'")));
        }
        Ok(())
    }

    pub fn sprint(&self, sprint_id: &str) -> Option<&Sprint> {
        self.sprints.iter().find(|s| s.id == sprint_id)
    }

    fn sprint_index(&self, sprint_id: &str) -> Result<usize> {
        container::index_of(&self.sprints, sprint_id)
            .ok_or_else(|| BoardError::not_found("sprint", sprint_id))
    }

    /// Backlog first, then every sprint in order.
    pub fn all_tasks(&self) -> impl Iterator<Item = &Task> {
        self.backlog
            .iter()
            .chain(self.sprints.iter().flat_map(|s| s.tasks.iter()))
    }

    pub fn task_count(&self) -> usize {
        self.backlog.len() + self.sprints.iter().map(|s| s.tasks.len()).sum::<usize>()
    }

    pub fn tasks(&self, container: &ContainerRef) -> Result<&[Task]> {
        match container {
            ContainerRef::Backlog => Ok(&self.backlog),
            ContainerRef::Sprint(id) => Ok(&self.sprints[self.sprint_index(id)?].tasks),
        }
    }

    fn tasks_mut(&mut self, container: &ContainerRef) -> Result<&mut Vec<Task>> {
        match container {
            ContainerRef::Backlog => Ok(&mut self.backlog),
            ContainerRef::Sprint(id) => {
                let idx = self.sprint_index(id)?;
                Ok(&mut self.sprints[idx].tasks)
            }
        }
    }

    /// Locate a task and the container holding it.
    pub fn find_task(&self, task_id: &str) -> Option<(ContainerRef, &Task)> {
        if let Some(task) = self.backlog.iter().find(|t| t.id == task_id) {
            return Some((ContainerRef::Backlog, task));
        }
        self.sprints.iter().find_map(|s| {
            s.tasks
                .iter()
                .find(|t| t.id == task_id)
                .map(|t| (ContainerRef::Sprint(s.id.clone()), t))
        })
    }

    /// Append a new item to the backlog.
    pub fn add_backlog_item(&self, task_id: &str, content: &str) -> Result<Self> {
        self.insert_task(&ContainerRef::Backlog, Task::new(task_id, content)?)
    }

    /// Append an already-built task to a container.
    pub fn insert_task(&self, holder: &ContainerRef, task: Task) -> Result<Self> {
        self.tasks(holder)?;
        require_text("task id", &task.id)?;
        require_text("task content", &task.content)?;
        if self.find_task(&task.id).is_some() {
            return Err(BoardError::validation("task id", format!("'{}' already exists", task.id)));
        }
        let mut next = self.clone();
        next.tasks_mut(holder)?.push(task);
        Ok(next)
    }

    /// Append decoded generator output to the backlog.
    pub fn append_backlog(&self, tasks: Vec<Task>) -> Result<Self> {
        for task in &tasks {
            if self.find_task(&task.id).is_some() {
                return Err(BoardError::decode(format!("generated task id '{}' already on board", task.id)));
            }
        }
        let mut next = self.clone();
        next.backlog.extend(tasks);
        next.validate()?;
        Ok(next)
    }

    /// Create a planned sprint at the front of the list.
    ///
    /// Without a title the sprint is named "Sprint N" where N is one past the
    /// current number of sprints.
    pub fn create_sprint(&self, sprint_id: &str, title: Option<&str>) -> Result<Self> {
        let id = require_text("sprint id", sprint_id)?;
        if id.eq_ignore_ascii_case("backlog") {
            return Err(BoardError::validation("sprint id", "'backlog' is reserved for the backlog"));
        }
        if self.sprint(&id).is_some() {
            return Err(BoardError::validation("sprint id", format!("'{id}' already exists")));
        }
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Sprint {}", self.sprints.len() + 1));

        let mut next = self.clone();
        next.sprints.insert(
            0,
            Sprint {
                id,
                title,
                status: SprintStatus::Planned,
                start_date: None,
                end_date: None,
                tasks: Vec::new(),
            },
        );
        Ok(next)
    }

    pub fn rename_sprint(&self, sprint_id: &str, title: &str) -> Result<Self> {
        let idx = self.sprint_index(sprint_id)?;
        let title = require_text("sprint title", title)?;
        let mut next = self.clone();
        next.sprints[idx].title = title;
        Ok(next)
    }

    /// `planned -> active`, stamping the start date.
    pub fn start_sprint(&self, sprint_id: &str, now: DateTime<Utc>) -> Result<Self> {
        self.transition(sprint_id, SprintStatus::Planned, "start", |s| {
            s.status = SprintStatus::Active;
            s.start_date = Some(now);
        })
    }

    /// `active -> completed`, stamping the end date.
    pub fn complete_sprint(&self, sprint_id: &str, now: DateTime<Utc>) -> Result<Self> {
        self.transition(sprint_id, SprintStatus::Active, "complete", |s| {
            s.status = SprintStatus::Completed;
            s.end_date = Some(now);
        })
    }

    /// `completed -> active`, clearing the end date.
    pub fn reopen_sprint(&self, sprint_id: &str) -> Result<Self> {
        self.transition(sprint_id, SprintStatus::Completed, "reopen", |s| {
            s.status = SprintStatus::Active;
            s.end_date = None;
        })
    }

    fn transition(
        &self,
        sprint_id: &str,
        required: SprintStatus,
        action: &str,
        apply: impl FnOnce(&mut Sprint),
    ) -> Result<Self> {
        let idx = self.sprint_index(sprint_id)?;
        let current = self.sprints[idx].status;
        if current != required {
            return Err(BoardError::InvalidStateTransition {
                sprint: sprint_id.to_string(),
                from: current.to_string(),
                action: action.to_string(),
            });
        }
        let mut next = self.clone();
        apply(&mut next.sprints[idx]);
        debug!(sprint = sprint_id, from = %current, to = %next.sprints[idx].status, "sprint transition");
        Ok(next)
    }

    /// Remove a sprint, returning its tasks to the end of the backlog.
    pub fn delete_sprint(&self, sprint_id: &str) -> Result<Self> {
        let idx = self.sprint_index(sprint_id)?;
        let mut next = self.clone();
        let sprint = next.sprints.remove(idx);
        debug!(sprint = sprint_id, returned = sprint.tasks.len(), "deleted sprint");
        next.backlog.extend(sprint.tasks);
        Ok(next)
    }

    /// Move a task between backlog and sprints (or within one of them).
    ///
    /// Same semantics as the Kanban move: remove first, then insert before
    /// `before` if it is still in the target, else append.
    pub fn move_task(
        &self,
        task_id: &str,
        source: &ContainerRef,
        target: &ContainerRef,
        before: Option<&str>,
    ) -> Result<Self> {
        let from = container::index_of(self.tasks(source)?, task_id).ok_or_else(|| {
            BoardError::not_found("task", format!("{task_id} in {source}"))
        })?;
        self.tasks(target)?;

        let mut next = self.clone();
        if source == target && before == Some(task_id) {
            return Ok(next);
        }
        let task = next.tasks_mut(source)?.remove(from);
        let placed = container::insert_before(next.tasks_mut(target)?, task, before);
        debug!(task = task_id, %source, %target, ?placed, "moved task");
        Ok(next)
    }

    pub fn set_story_points(&self, task_id: &str, points: i64) -> Result<Self> {
        let points = checked_story_points(points)?;
        let patch = TaskPatch {
            story_points: Some(Some(points)),
            ..Default::default()
        };
        self.update_task(task_id, &patch)
    }

    /// Merge `patch` into the task wherever it lives.
    pub fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<Self> {
        patch.validate()?;
        let (holder, _) = self
            .find_task(task_id)
            .ok_or_else(|| BoardError::not_found("task", task_id))?;
        let mut next = self.clone();
        if let Some(task) = next.tasks_mut(&holder)?.iter_mut().find(|t| t.id == task_id) {
            patch.apply(task);
        }
        Ok(next)
    }

    pub fn delete_task(&self, holder: &ContainerRef, task_id: &str) -> Result<Self> {
        let pos = container::index_of(self.tasks(holder)?, task_id)
            .ok_or_else(|| BoardError::not_found("task", task_id))?;
        let mut next = self.clone();
        next.tasks_mut(holder)?.remove(pos);
        Ok(next)
    }
}
