//! Derived, read-only board statistics.
//!
//! Nothing here is stored; everything is recomputed from a board value.
//!
//! Kanban has no per-task "done" flag, so completion is inferred from column
//! titles via [`DoneHeuristic`]. This is a fuzzy substring match: a column
//! titled "Not done yet" counts as done. Scrum completion is sprint-grained:
//! every task in a completed sprint counts, none elsewhere.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::board::Board;
use crate::fields::SprintStatus;
use crate::kanban::KanbanBoard;
use crate::scrum::ScrumBoard;
use crate::task::Task;

/// Title fragments that mark a Kanban column as holding finished work.
pub const DEFAULT_DONE_SYNONYMS: &[&str] = &[
    "done",
    "complete",
    "completed",
    "concluído",
    "concluido",
    "finished",
];

/// Case-insensitive substring match of column titles against a synonym set.
#[derive(Debug, Clone)]
pub struct DoneHeuristic {
    synonyms: Vec<String>,
}

impl Default for DoneHeuristic {
    fn default() -> Self {
        Self::new(DEFAULT_DONE_SYNONYMS.iter().copied())
    }
}

impl DoneHeuristic {
    pub fn new<I, S>(synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let synonyms = synonyms
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        DoneHeuristic { synonyms }
    }

    pub fn is_done_column(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.synonyms.iter().any(|s| title.contains(s.as_str()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PointStats {
    pub total: u64,
    pub completed: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoardStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// (container title, task count) in display order.
    pub per_container: Vec<(String, usize)>,
    /// Exact assignee string -> task count. Unassigned tasks are not listed.
    pub by_assignee: BTreeMap<String, usize>,
    pub unassigned: usize,
    /// Scrum boards only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_points: Option<PointStats>,
}

impl BoardStats {
    /// Completion ratio in percent, 0 for an empty board.
    pub fn completion_percent(&self) -> u8 {
        if self.total_tasks == 0 {
            return 0;
        }
        ((self.completed_tasks * 100) / self.total_tasks) as u8
    }
}

pub fn board_stats(board: &Board, heuristic: &DoneHeuristic) -> BoardStats {
    match board {
        Board::Kanban(b) => kanban_stats(b, heuristic),
        Board::Scrum(b) => scrum_stats(b),
    }
}

pub fn kanban_stats(board: &KanbanBoard, heuristic: &DoneHeuristic) -> BoardStats {
    let mut stats = BoardStats::default();
    for column in &board.columns {
        stats.total_tasks += column.tasks.len();
        if heuristic.is_done_column(&column.title) {
            stats.completed_tasks += column.tasks.len();
        }
        stats.per_container.push((column.title.clone(), column.tasks.len()));
    }
    tally_assignees(&mut stats, board.all_tasks());
    stats
}

pub fn scrum_stats(board: &ScrumBoard) -> BoardStats {
    let mut stats = BoardStats {
        total_tasks: board.task_count(),
        ..Default::default()
    };
    let mut points = PointStats::default();
    stats.per_container.push(("Backlog".to_string(), board.backlog.len()));
    points.total += sum_points(&board.backlog);

    for sprint in &board.sprints {
        stats.per_container.push((sprint.title.clone(), sprint.tasks.len()));
        let sprint_points = sum_points(&sprint.tasks);
        points.total += sprint_points;
        if sprint.status == SprintStatus::Completed {
            stats.completed_tasks += sprint.tasks.len();
            points.completed += sprint_points;
        }
    }
    stats.story_points = Some(points);
    tally_assignees(&mut stats, board.all_tasks());
    stats
}

fn sum_points(tasks: &[Task]) -> u64 {
    tasks.iter().filter_map(|t| t.story_points).map(u64::from).sum()
}

fn tally_assignees<'a>(stats: &mut BoardStats, tasks: impl Iterator<Item = &'a Task>) {
    for task in tasks {
        match task.assignee.as_deref() {
            Some(name) => *stats.by_assignee.entry(name.to_string()).or_default() += 1,
            None => stats.unassigned += 1,
        }
    }
}

/// Task count per team member, matching when the task's assignee text contains
/// the member's name (case-insensitive).
///
/// Known limitation: names that share a fragment ("Ana" and "Ana Paula") are
/// not told apart, so one task can count towards several members.
pub fn workload(board: &Board, members: &[String]) -> Vec<(String, usize)> {
    let assignees: Vec<String> = board
        .all_tasks()
        .into_iter()
        .filter_map(|t| t.assignee.as_deref())
        .map(str::to_lowercase)
        .collect();
    members
        .iter()
        .map(|member| {
            let needle = member.to_lowercase();
            let count = assignees.iter().filter(|a| a.contains(&needle)).count();
            (member.clone(), count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrum::ContainerRef;
    use chrono::Utc;

    #[test]
    fn test_done_heuristic() {
        let h = DoneHeuristic::default();
        assert!(h.is_done_column("Done"));
        assert!(h.is_done_column("Tarefas Concluído"));
        assert!(h.is_done_column("COMPLETED ✅"));
        assert!(!h.is_done_column("In Progress"));

        let custom = DoneHeuristic::new(["shipped"]);
        assert!(custom.is_done_column("Shipped"));
        assert!(!custom.is_done_column("Done"));
    }

    #[test]
    fn test_kanban_stats() {
        let b = KanbanBoard::new()
            .add_column("todo", "To Do", None)
            .and_then(|b| b.add_column("done", "Done", None))
            .and_then(|b| b.add_task("todo", "t1", "a", Some("Ana".into())))
            .and_then(|b| b.add_task("todo", "t2", "b", None))
            .and_then(|b| b.add_task("done", "t3", "c", Some("Ana".into())))
            .unwrap();
        let stats = board_stats(&Board::Kanban(b), &DoneHeuristic::default());
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.completed_tasks, 1);
        assert_eq!(stats.by_assignee.get("Ana"), Some(&2));
        assert_eq!(stats.unassigned, 1);
        assert_eq!(stats.per_container, vec![("To Do".to_string(), 2), ("Done".to_string(), 1)]);
        assert_eq!(stats.completion_percent(), 33);
    }

    #[test]
    fn test_scrum_completion_is_sprint_grained() {
        let sprint = ContainerRef::Sprint("s1".to_string());
        let b = ScrumBoard::new()
            .add_backlog_item("t1", "a")
            .and_then(|b| b.add_backlog_item("t2", "b"))
            .and_then(|b| b.add_backlog_item("t3", "c"))
            .and_then(|b| b.set_story_points("t1", 3))
            .and_then(|b| b.set_story_points("t2", 5))
            .and_then(|b| b.create_sprint("s1", None))
            .and_then(|b| b.move_task("t1", &ContainerRef::Backlog, &sprint, None))
            .and_then(|b| b.move_task("t2", &ContainerRef::Backlog, &sprint, None))
            .unwrap();
        let stats = scrum_stats(&b);
        assert_eq!(stats.completed_tasks, 0);

        let done = b
            .start_sprint("s1", Utc::now())
            .and_then(|b| b.complete_sprint("s1", Utc::now()))
            .unwrap();
        let stats = scrum_stats(&done);
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.completed_tasks, 2);
        assert_eq!(stats.story_points, Some(PointStats { total: 8, completed: 8 }));
    }

    #[test]
    fn test_workload_matches_name_fragments() {
        let b = KanbanBoard::new()
            .add_column("todo", "To Do", None)
            .and_then(|b| b.add_task("todo", "t1", "a", Some("Ana Paula".into())))
            .and_then(|b| b.add_task("todo", "t2", "b", Some("ana".into())))
            .and_then(|b| b.add_task("todo", "t3", "c", Some("Rui".into())))
            .unwrap();
        let load = workload(&Board::Kanban(b), &["Ana".to_string(), "Paula".to_string(), "Zé".to_string()]);
        assert_eq!(
            load,
            vec![("Ana".to_string(), 2), ("Paula".to_string(), 1), ("Zé".to_string(), 0)]
        );
    }
}
