//! # Workspace Boards
//!
//! A board engine for project workspaces: Kanban boards (ordered columns of
//! ordered tasks) and Scrum boards (a backlog plus ordered sprints), with a
//! JSON project store, a CLI and a terminal board view on top.
//!
//! ## Key Features
//!
//! - **Value-in, value-out engine**: every operation borrows the current board
//!   and returns a new one, or a typed error with the original untouched
//! - **Drag-and-drop semantics**: `move_task` removes first and then inserts
//!   before an anchor task, falling back to append if the anchor has gone
//! - **Sprint lifecycle**: `planned -> active -> completed`, with reopen as the
//!   single way back
//! - **Derived statistics**: totals, "done" detection by column title, story
//!   points and assignee workload
//! - **Untrusted generator output**: externally generated boards are decoded
//!   and validated before they can reach the engine
//!
//! ## Quick Start
//!
//! ```
//! use workspace_boards::kanban::KanbanBoard;
//!
//! let board = KanbanBoard::new()
//!     .add_column("todo", "To Do", None)?
//!     .add_column("done", "Done", None)?
//!     .add_task("todo", "t1", "Write release notes", None)?;
//!
//! let board = board.move_task("t1", "todo", "done", None)?;
//! assert_eq!(board.column("done").unwrap().tasks[0].id, "t1");
//! # Ok::<(), workspace_boards::error::BoardError>(())
//! ```
//!
//! The engine never generates ids; callers supply them for every new task,
//! column and sprint.

pub mod board;
pub mod config;
pub mod container;
pub mod dates;
pub mod error;
pub mod fields;
pub mod generate;
pub mod kanban;
pub mod project;
pub mod scrum;
pub mod stats;
pub mod store;
pub mod task;
pub mod template;

pub use board::Board;
pub use error::{BoardError, Result};
