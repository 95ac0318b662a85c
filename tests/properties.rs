//! Property tests for the board engine over generated boards.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use proptest::sample::Index;

use workspace_boards::fields::SprintStatus;
use workspace_boards::kanban::KanbanBoard;
use workspace_boards::scrum::{ContainerRef, ScrumBoard};
use workspace_boards::task::Task;

type TaskFields = (String, Option<u32>, Option<String>);

/// Content, story points and assignee for one generated task.
fn task_fields_strategy() -> impl Strategy<Value = TaskFields> {
    (
        "[a-z][a-z ]{0,10}",
        prop::option::of(0u32..13),
        prop::option::of("[A-Z][a-z]{2,6}"),
    )
}

fn build_task(id: String, (content, points, assignee): TaskFields) -> Task {
    let mut task = Task::new(id, &content).unwrap();
    task.story_points = points;
    task.assignee = assignee;
    task
}

/// Kanban boards with 1-4 columns of 0-5 tasks each.
fn kanban_strategy() -> impl Strategy<Value = KanbanBoard> {
    prop::collection::vec(prop::collection::vec(task_fields_strategy(), 0..6), 1..5).prop_map(|columns| {
        let mut board = KanbanBoard::new();
        for (ci, tasks) in columns.into_iter().enumerate() {
            let column_id = format!("c{ci}");
            board = board.add_column(&column_id, &format!("Column {ci}"), None).unwrap();
            for (ti, fields) in tasks.into_iter().enumerate() {
                board = board.insert_task(&column_id, build_task(format!("t{ci}_{ti}"), fields)).unwrap();
            }
        }
        board
    })
}

/// Scrum boards with a 0-5 item backlog and 0-3 sprints of 0-5 tasks each.
fn scrum_strategy() -> impl Strategy<Value = ScrumBoard> {
    (
        prop::collection::vec(task_fields_strategy(), 0..6),
        prop::collection::vec(prop::collection::vec(task_fields_strategy(), 0..6), 0..4),
    )
        .prop_map(|(backlog, sprints)| {
            let mut board = ScrumBoard::new();
            for (i, fields) in backlog.into_iter().enumerate() {
                board = board.insert_task(&ContainerRef::Backlog, build_task(format!("b{i}"), fields)).unwrap();
            }
            for (si, tasks) in sprints.into_iter().enumerate() {
                let sprint_id = format!("s{si}");
                board = board.create_sprint(&sprint_id, None).unwrap();
                let holder = ContainerRef::Sprint(sprint_id);
                for (ti, fields) in tasks.into_iter().enumerate() {
                    board = board.insert_task(&holder, build_task(format!("t{si}_{ti}"), fields)).unwrap();
                }
            }
            board
        })
}

fn kanban_ids(board: &KanbanBoard, column: &str) -> Vec<String> {
    board.column(column).unwrap().tasks.iter().map(|t| t.id.clone()).collect()
}

/// Every (column id, task) pair on the board.
fn kanban_placements(board: &KanbanBoard) -> Vec<(String, Task)> {
    board
        .columns
        .iter()
        .flat_map(|c| c.tasks.iter().map(move |t| (c.id.clone(), t.clone())))
        .collect()
}

fn scrum_containers(board: &ScrumBoard) -> Vec<ContainerRef> {
    std::iter::once(ContainerRef::Backlog)
        .chain(board.sprints.iter().map(|s| ContainerRef::Sprint(s.id.clone())))
        .collect()
}

fn scrum_len(board: &ScrumBoard, holder: &ContainerRef) -> usize {
    board.tasks(holder).unwrap().len()
}

#[derive(Debug, Clone, Copy)]
enum SprintAction {
    Start,
    Complete,
    Reopen,
}

fn sprint_action_strategy() -> impl Strategy<Value = SprintAction> {
    prop::sample::select(vec![SprintAction::Start, SprintAction::Complete, SprintAction::Reopen])
}

proptest! {
    #[test]
    fn test_kanban_move_preserves_counts_and_fields(
        board in kanban_strategy(),
        pick in any::<Index>(),
        target in any::<Index>(),
        anchor in prop::option::of(any::<Index>()),
    ) {
        let placements = kanban_placements(&board);
        prop_assume!(!placements.is_empty());
        let (source, task) = placements[pick.index(placements.len())].clone();
        let target = board.columns[target.index(board.columns.len())].id.clone();
        let before = anchor.map(|i| placements[i.index(placements.len())].1.id.clone());

        let moved = board.move_task(&task.id, &source, &target, before.as_deref()).unwrap();

        prop_assert_eq!(moved.task_count(), board.task_count());
        let (src_before, dst_before) = (kanban_ids(&board, &source).len(), kanban_ids(&board, &target).len());
        if source != target {
            prop_assert_eq!(kanban_ids(&moved, &source).len(), src_before - 1);
            prop_assert_eq!(kanban_ids(&moved, &target).len(), dst_before + 1);
        }

        let (holder, after) = moved.find_task(&task.id).unwrap();
        prop_assert_eq!(&holder.id, &target);
        prop_assert_eq!(after, &task);

        // Lands before the anchor when it is still in the target, else at the end.
        let target_ids = kanban_ids(&moved, &target);
        let pos = target_ids.iter().position(|id| *id == task.id).unwrap();
        match before.as_deref() {
            Some(anchor) if anchor == task.id && source == target => {
                prop_assert_eq!(&moved, &board);
            }
            Some(anchor) if anchor != task.id && target_ids.iter().any(|id| id == anchor) => {
                prop_assert_eq!(target_ids[pos + 1].as_str(), anchor);
            }
            _ => {
                prop_assert_eq!(pos, target_ids.len() - 1);
            }
        }
    }

    #[test]
    fn test_kanban_reorder_is_permutation(
        board in kanban_strategy(),
        column in any::<Index>(),
        t in any::<Index>(),
        u in any::<Index>(),
    ) {
        let column_id = board.columns[column.index(board.columns.len())].id.clone();
        let original = kanban_ids(&board, &column_id);
        prop_assume!(!original.is_empty());
        let t = original[t.index(original.len())].clone();
        let u = original[u.index(original.len())].clone();

        let moved = board.move_task(&t, &column_id, &column_id, Some(&u)).unwrap();
        let reordered = kanban_ids(&moved, &column_id);

        let (mut sorted_before, mut sorted_after) = (original.clone(), reordered.clone());
        sorted_before.sort();
        sorted_after.sort();
        prop_assert_eq!(sorted_before, sorted_after);

        if t == u {
            prop_assert_eq!(&moved, &board);
        } else {
            let pos_t = reordered.iter().position(|id| *id == t).unwrap();
            prop_assert_eq!(&reordered[pos_t + 1], &u);
        }
        for other in moved.columns.iter().filter(|c| c.id != column_id) {
            prop_assert_eq!(Some(other), board.column(&other.id));
        }
    }

    #[test]
    fn test_kanban_delete_column_removes_exactly_its_tasks(
        board in kanban_strategy(),
        column in any::<Index>(),
    ) {
        let doomed = board.columns[column.index(board.columns.len())].clone();
        let after = board.delete_column(&doomed.id).unwrap();

        prop_assert_eq!(after.task_count(), board.task_count() - doomed.tasks.len());
        prop_assert!(after.column(&doomed.id).is_none());
        for task in &doomed.tasks {
            prop_assert!(after.find_task(&task.id).is_none());
        }
        let survivors: Vec<_> = board.columns.iter().filter(|c| c.id != doomed.id).cloned().collect();
        prop_assert_eq!(after.columns, survivors);
    }

    #[test]
    fn test_scrum_move_preserves_counts_and_fields(
        board in scrum_strategy(),
        pick in any::<Index>(),
        target in any::<Index>(),
        anchor in prop::option::of(any::<Index>()),
    ) {
        let tasks: Vec<Task> = board.all_tasks().cloned().collect();
        prop_assume!(!tasks.is_empty());
        let task = tasks[pick.index(tasks.len())].clone();
        let (source, _) = board.find_task(&task.id).unwrap();
        let containers = scrum_containers(&board);
        let target = containers[target.index(containers.len())].clone();
        let before = anchor.map(|i| tasks[i.index(tasks.len())].id.clone());

        let moved = board.move_task(&task.id, &source, &target, before.as_deref()).unwrap();

        prop_assert_eq!(moved.task_count(), board.task_count());
        if source != target {
            prop_assert_eq!(scrum_len(&moved, &source), scrum_len(&board, &source) - 1);
            prop_assert_eq!(scrum_len(&moved, &target), scrum_len(&board, &target) + 1);
        }
        let (holder, after) = moved.find_task(&task.id).unwrap();
        prop_assert_eq!(holder, target);
        prop_assert_eq!(after, &task);
    }

    #[test]
    fn test_scrum_delete_sprint_is_loss_free(
        board in scrum_strategy(),
        sprint in any::<Index>(),
    ) {
        prop_assume!(!board.sprints.is_empty());
        let doomed = board.sprints[sprint.index(board.sprints.len())].clone();
        let after = board.delete_sprint(&doomed.id).unwrap();

        prop_assert_eq!(after.backlog.len(), board.backlog.len() + doomed.tasks.len());
        prop_assert_eq!(&after.backlog[board.backlog.len()..], doomed.tasks.as_slice());
        prop_assert!(after.sprint(&doomed.id).is_none());
        prop_assert_eq!(after.sprints.len(), board.sprints.len() - 1);
        prop_assert_eq!(after.task_count(), board.task_count());
    }

    #[test]
    fn test_sprint_transitions_follow_the_state_machine(
        actions in prop::collection::vec(sprint_action_strategy(), 1..12),
    ) {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let mut board = ScrumBoard::new().create_sprint("s1", None).unwrap();

        for action in actions {
            let status = board.sprint("s1").unwrap().status;
            let (result, allowed) = match action {
                SprintAction::Start => (board.start_sprint("s1", now), status == SprintStatus::Planned),
                SprintAction::Complete => (board.complete_sprint("s1", now), status == SprintStatus::Active),
                SprintAction::Reopen => (board.reopen_sprint("s1"), status == SprintStatus::Completed),
            };
            match result {
                Ok(next) => {
                    prop_assert!(allowed);
                    let sprint = next.sprint("s1").unwrap();
                    let expected = match action {
                        SprintAction::Complete => SprintStatus::Completed,
                        SprintAction::Start | SprintAction::Reopen => SprintStatus::Active,
                    };
                    prop_assert_eq!(sprint.status, expected);
                    prop_assert_eq!(sprint.end_date.is_some(), expected == SprintStatus::Completed);
                    board = next;
                }
                Err(e) => {
                    prop_assert!(!allowed);
                    prop_assert!(e.is_invalid_transition());
                }
            }
        }
    }
}
