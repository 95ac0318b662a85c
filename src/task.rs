//! Task data structure and field-level editing.
//!
//! A `Task` is the unit that lives in exactly one container (a Kanban column,
//! the Scrum backlog, or a sprint). Moving a task never touches its fields;
//! editing goes through `TaskPatch`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{require_text, BoardError, Result};
use crate::fields::{AttachmentKind, Priority};

/// A single work item on a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Free-text display name, not a reference to a user record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Emoji or image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, alias = "documents", skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

/// A file, image or link hanging off a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default, alias = "type")]
    pub kind: AttachmentKind,
}

/// A coloured label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Task {
    /// Create a task with the caller-supplied id. Both id and content must be non-blank.
    pub fn new(id: impl Into<String>, content: &str) -> Result<Self> {
        let id = require_text("task id", &id.into())?;
        let content = require_text("task content", content)?;
        Ok(Task {
            id,
            content,
            description: None,
            due_date: None,
            assignee: None,
            icon: None,
            attachments: Vec::new(),
            tags: Vec::new(),
            story_points: None,
            priority: None,
        })
    }

    /// Set the assignee, treating blank input as "unassigned".
    pub fn with_assignee(mut self, assignee: Option<String>) -> Self {
        self.assignee = assignee
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
        self
    }
}

/// Partial update for a task. `None` leaves a field as it is; for clearable
/// fields `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub content: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub assignee: Option<Option<String>>,
    pub icon: Option<Option<String>>,
    pub attachments: Option<Vec<Attachment>>,
    pub tags: Option<Vec<Tag>>,
    pub story_points: Option<Option<u32>>,
    pub priority: Option<Option<Priority>>,
}

impl TaskPatch {
    /// True when applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.assignee.is_none()
            && self.icon.is_none()
            && self.attachments.is_none()
            && self.tags.is_none()
            && self.story_points.is_none()
            && self.priority.is_none()
    }

    /// Check the patch on its own, before any board is touched.
    pub fn validate(&self) -> Result<()> {
        if let Some(content) = &self.content {
            require_text("task content", content)?;
        }
        if let Some(attachments) = &self.attachments {
            for a in attachments {
                if a.id.trim().is_empty() {
                    return Err(BoardError::validation("attachment id", "must not be empty"));
                }
            }
        }
        if let Some(tags) = &self.tags {
            for t in tags {
                if t.id.trim().is_empty() {
                    return Err(BoardError::validation("tag id", "must not be empty"));
                }
            }
        }
        Ok(())
    }

    /// Merge the patch into `task`. Call `validate` first; this never fails.
    pub fn apply(&self, task: &mut Task) {
        if let Some(content) = &self.content {
            task.content = content.trim().to_string();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(due) = self.due_date {
            task.due_date = due;
        }
        if let Some(assignee) = &self.assignee {
            task.assignee = assignee
                .as_ref()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty());
        }
        if let Some(icon) = &self.icon {
            task.icon = icon.clone();
        }
        if let Some(attachments) = &self.attachments {
            task.attachments = attachments.clone();
        }
        if let Some(tags) = &self.tags {
            task.tags = tags.clone();
        }
        if let Some(points) = self.story_points {
            task.story_points = points;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
    }
}

/// Convert a user-supplied story point value, rejecting negatives.
pub fn checked_story_points(points: i64) -> Result<u32> {
    if points < 0 {
        return Err(BoardError::validation(
            "story points",
            format!("must not be negative (got {points})"),
        ));
    }
    u32::try_from(points)
        .map_err(|_| BoardError::validation("story points", format!("{points} is too large")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_rejects_blank_content() {
        assert!(Task::new("t1", "  ").unwrap_err().is_validation());
        assert!(Task::new("", "Write docs").unwrap_err().is_validation());
        assert_eq!(Task::new("t1", " Write docs ").unwrap().content, "Write docs");
    }

    #[test]
    fn test_patch_merges_and_clears() {
        let mut task = Task::new("t1", "Draft").unwrap().with_assignee(Some("Ana".into()));
        task.description = Some("old".into());

        let patch = TaskPatch {
            content: Some("Final".into()),
            description: Some(None),
            priority: Some(Some(Priority::High)),
            ..Default::default()
        };
        patch.validate().unwrap();
        patch.apply(&mut task);

        assert_eq!(task.content, "Final");
        assert_eq!(task.description, None);
        assert_eq!(task.priority, Some(Priority::High));
        assert_eq!(task.assignee.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_patch_rejects_blank_content() {
        let patch = TaskPatch {
            content: Some(" ".into()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_checked_story_points() {
        assert_eq!(checked_story_points(8).unwrap(), 8);
        assert!(checked_story_points(-1).unwrap_err().is_validation());
    }

    #[test]
    fn test_task_json_shape() {
        let json = r#"{"id":"t1","content":"Ship","dueDate":"2024-05-01","storyPoints":3,
            "documents":[{"id":"d1","name":"brief","url":"http://x","type":"link"}]}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.story_points, Some(3));
        assert_eq!(task.attachments[0].kind, AttachmentKind::Link);

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["dueDate"], "2024-05-01");
        assert!(value.get("assignee").is_none());
    }

    #[test]
    fn test_priority_keeps_stored_casing() {
        let json = r#"{"id":"t1","content":"Ship","priority":"High"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, Some(Priority::High));
        assert_eq!(serde_json::to_string(&task).unwrap(), json);

        // Lowercase is still read.
        let task: Task = serde_json::from_str(r#"{"id":"t2","content":"x","priority":"low"}"#).unwrap();
        assert_eq!(serde_json::to_value(&task).unwrap()["priority"], "Low");
    }
}
