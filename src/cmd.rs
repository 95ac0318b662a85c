//! Command implementations for the CLI interface.
//!
//! Each handler loads the selected project, calls exactly one engine
//! operation, and saves the board it gets back. Ids for new columns, tasks
//! and sprints are minted here, never inside the engine.

use std::fs;
use std::path::PathBuf;

use chrono::{Local, Utc};
use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::info;
use uuid::Uuid;

use workspace_boards::board::Board;
use workspace_boards::config::Config;
use workspace_boards::dates::{format_due_relative, parse_due_input};
use workspace_boards::error::{BoardError, Result};
use workspace_boards::fields::{format_priority, BoardKind, Priority};
use workspace_boards::generate::{apply_generated, FileGenerator, GeneratedMerge};
use workspace_boards::kanban::KanbanBoard;
use workspace_boards::project::Project;
use workspace_boards::scrum::{ContainerRef, ScrumBoard};
use workspace_boards::stats::{board_stats, workload};
use workspace_boards::store::{JsonProjectStore, ProjectStore};
use workspace_boards::task::{Tag, Task, TaskPatch};
use workspace_boards::template::BoardTemplate;

use crate::tui::run::run_board_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive board view.
    Ui,

    /// Create, list or delete projects.
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Kanban column operations.
    Column {
        #[command(subcommand)]
        action: ColumnAction,
    },

    /// Task operations (columns, backlog or sprints).
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Add an item to the Scrum backlog.
    Backlog {
        /// Item text.
        content: String,
        #[arg(long)]
        assignee: Option<String>,
    },

    /// Sprint lifecycle operations.
    Sprint {
        #[command(subcommand)]
        action: SprintAction,
    },

    /// Set story points on a Scrum task.
    Points {
        task: String,
        #[arg(allow_hyphen_values = true)]
        points: i64,
    },

    /// Print every container and its tasks.
    Show,

    /// Print board statistics.
    Stats {
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Merge generator output (a JSON file) into the board.
    Import {
        /// File holding the generated JSON.
        file: PathBuf,
        /// Kanban: replace every column with the generated ones.
        #[arg(long)]
        replace: bool,
        /// Kanban: column that receives generated tasks (defaults to the first column).
        #[arg(long)]
        column: Option<String>,
        /// Free-text project context passed to the generator.
        #[arg(long, default_value = "")]
        context: String,
    },

    /// Export the board's tasks to CSV.
    Export {
        /// Output file path (defaults to <project>.csv).
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Create a timestamped backup of the project store.
    Backup,

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a new project.
    New {
        /// Display name; the project id is derived from it.
        name: String,
        #[arg(long, value_enum, default_value_t = BoardKind::Kanban)]
        kind: BoardKind,
        /// Starting columns for Kanban boards (defaults to the configured template).
        #[arg(long, value_enum)]
        template: Option<BoardTemplate>,
        #[arg(long)]
        desc: Option<String>,
    },
    /// List all projects.
    List,
    /// Delete a project and its board.
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// Append a column.
    Add {
        title: String,
        #[arg(long)]
        color: Option<String>,
    },
    Rename { column: String, title: String },
    /// Delete a column and every task in it.
    Delete { column: String },
    /// Move a column before another one (or to the end).
    Move {
        column: String,
        #[arg(long)]
        before: Option<String>,
    },
    /// Set or clear (with no colour) a column's colour.
    Color { column: String, color: Option<String> },
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Append a task to a column, the backlog or a sprint.
    Add {
        container: String,
        content: String,
        #[arg(long)]
        assignee: Option<String>,
    },
    /// Update fields on a task wherever it lives.
    Update {
        task: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        clear_desc: bool,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", "friday", "in Nd".
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        clear_due: bool,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long)]
        unassign: bool,
        /// Emoji or image URL.
        #[arg(long)]
        icon: Option<String>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Replace tags. Repeatable, as `text` or `text:#color`.
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    Delete { container: String, task: String },
    /// Move a task to another container, optionally before another task.
    Move {
        task: String,
        from: String,
        to: String,
        #[arg(long)]
        before: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum SprintAction {
    /// Create a planned sprint at the front of the list.
    New {
        #[arg(long)]
        title: Option<String>,
    },
    Start { sprint: String },
    Complete { sprint: String },
    Reopen { sprint: String },
    Rename { sprint: String, title: String },
    /// Delete a sprint, returning its tasks to the backlog.
    Delete { sprint: String },
}

/// Everything a handler needs: where projects live and how to interpret them.
pub struct Session {
    pub store: JsonProjectStore,
    pub config: Config,
    pub project: Option<String>,
}

impl Session {
    /// The selected project id, or the only project when none was named.
    pub fn project_id(&self) -> Result<String> {
        if let Some(id) = &self.project {
            return Ok(id.clone());
        }
        let projects = self.store.list()?;
        match projects.as_slice() {
            [only] => Ok(only.id.clone()),
            [] => Err(BoardError::validation(
                "project",
                "no projects yet, create one with `wb project new <name>`",
            )),
            many => {
                let ids: Vec<&str> = many.iter().map(|p| p.id.as_str()).collect();
                Err(BoardError::validation(
                    "project",
                    format!("several projects exist, pass --project (one of: {})", ids.join(", ")),
                ))
            }
        }
    }

    /// Load, transform, save.
    fn apply(&self, op: impl FnOnce(&Board) -> Result<Board>) -> Result<Board> {
        let id = self.project_id()?;
        let project = self.store.load(&id)?;
        let next = op(&project.board)?;
        self.store.save(&id, &next)?;
        Ok(next)
    }
}

/// Mint a fresh entity id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn as_kanban(board: &Board) -> Result<&KanbanBoard> {
    match board {
        Board::Kanban(b) => Ok(b),
        Board::Scrum(_) => Err(BoardError::validation("board", "this project uses a Scrum board")),
    }
}

fn as_scrum(board: &Board) -> Result<&ScrumBoard> {
    match board {
        Board::Scrum(b) => Ok(b),
        Board::Kanban(_) => Err(BoardError::validation("board", "this project uses a Kanban board")),
    }
}

/// Dispatch a parsed command.
pub fn run_command(session: &Session, command: Commands) -> Result<()> {
    match command {
        Commands::Ui => cmd_ui(session),
        Commands::Project { action } => cmd_project(session, action),
        Commands::Column { action } => cmd_column(session, action),
        Commands::Task { action } => cmd_task(session, action),
        Commands::Backlog { content, assignee } => {
            let id = new_id();
            session.apply(|b| {
                let task = Task::new(id.as_str(), &content)?.with_assignee(assignee);
                as_scrum(b)?.insert_task(&ContainerRef::Backlog, task).map(Board::Scrum)
            })?;
            println!("Added backlog item {id}");
            Ok(())
        }
        Commands::Sprint { action } => cmd_sprint(session, action),
        Commands::Points { task, points } => {
            session.apply(|b| as_scrum(b)?.set_story_points(&task, points).map(Board::Scrum))?;
            println!("Set {points} point(s) on {task}");
            Ok(())
        }
        Commands::Show => cmd_show(session),
        Commands::Stats { json } => cmd_stats(session, json),
        Commands::Import { file, replace, column, context } => {
            cmd_import(session, file, replace, column, context)
        }
        Commands::Export { output } => cmd_export(session, output),
        Commands::Backup => {
            let path = session.store.backup()?;
            println!("Backup created: {}", path.display());
            Ok(())
        }
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

/// Launch the terminal user interface.
fn cmd_ui(session: &Session) -> Result<()> {
    let id = session.project_id()?;
    run_board_tui(&session.store, &id, &session.config)
}

fn cmd_project(session: &Session, action: ProjectAction) -> Result<()> {
    match action {
        ProjectAction::New { name, kind, template, desc } => {
            let board = match kind {
                BoardKind::Kanban => {
                    let template = template.unwrap_or(session.config.default_template);
                    Board::Kanban(KanbanBoard::from_template(template, new_id)?)
                }
                BoardKind::Scrum => Board::Scrum(ScrumBoard::new()),
            };
            let project = Project::new(&name, desc, board, Utc::now())?;
            let id = project.id.clone();
            session.store.create(project)?;
            println!("Created project '{name}' ({id})");
        }
        ProjectAction::List => {
            let projects = session.store.list()?;
            if projects.is_empty() {
                println!("No projects.");
                return Ok(());
            }
            println!("{:<24} {:<28} {:<7} {}", "ID", "Name", "Kind", "Tasks");
            for p in projects {
                let kind = match p.kind {
                    BoardKind::Kanban => "kanban",
                    BoardKind::Scrum => "scrum",
                };
                println!("{:<24} {:<28} {:<7} {}", truncate(&p.id, 24), truncate(&p.name, 28), kind, p.task_count);
            }
        }
        ProjectAction::Delete { id } => {
            session.store.delete(&id)?;
            info!(project = %id, "deleted project");
            println!("Deleted project {id}");
        }
    }
    Ok(())
}

fn cmd_column(session: &Session, action: ColumnAction) -> Result<()> {
    match action {
        ColumnAction::Add { title, color } => {
            let id = new_id();
            let color = color.unwrap_or_else(|| session.config.default_column_color.clone());
            session.apply(|b| as_kanban(b)?.add_column(&id, &title, Some(&color)).map(Board::Kanban))?;
            println!("Added column {id}");
        }
        ColumnAction::Rename { column, title } => {
            session.apply(|b| as_kanban(b)?.rename_column(&column, &title).map(Board::Kanban))?;
            println!("Renamed column {column}");
        }
        ColumnAction::Delete { column } => {
            session.apply(|b| as_kanban(b)?.delete_column(&column).map(Board::Kanban))?;
            println!("Deleted column {column}");
        }
        ColumnAction::Move { column, before } => {
            session.apply(|b| {
                as_kanban(b)?
                    .reorder_column(&column, before.as_deref())
                    .map(Board::Kanban)
            })?;
            println!("Moved column {column}");
        }
        ColumnAction::Color { column, color } => {
            session.apply(|b| {
                as_kanban(b)?
                    .set_column_color(&column, color.as_deref())
                    .map(Board::Kanban)
            })?;
            println!("Updated column {column}");
        }
    }
    Ok(())
}

fn cmd_task(session: &Session, action: TaskAction) -> Result<()> {
    match action {
        TaskAction::Add { container, content, assignee } => {
            let id = new_id();
            session.apply(|b| b.add_task(&container, &id, &content, assignee))?;
            println!("Added task {id}");
        }
        TaskAction::Update {
            task, content, desc, clear_desc, due, clear_due, assignee, unassign, icon, priority, tags,
        } => {
            let patch = build_patch(content, desc, clear_desc, due, clear_due, assignee, unassign, icon, priority, tags)?;
            if patch.is_empty() {
                println!("Nothing to update.");
                return Ok(());
            }
            session.apply(|b| b.update_task(&task, &patch))?;
            println!("Updated task {task}");
        }
        TaskAction::Delete { container, task } => {
            session.apply(|b| b.delete_task(&container, &task))?;
            println!("Deleted task {task}");
        }
        TaskAction::Move { task, from, to, before } => {
            session.apply(|b| b.move_task(&task, &from, &to, before.as_deref()))?;
            println!("Moved task {task} to {to}");
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn build_patch(
    content: Option<String>,
    desc: Option<String>,
    clear_desc: bool,
    due: Option<String>,
    clear_due: bool,
    assignee: Option<String>,
    unassign: bool,
    icon: Option<String>,
    priority: Option<Priority>,
    tags: Vec<String>,
) -> Result<TaskPatch> {
    let today = Local::now().date_naive();
    let due_date = match (due, clear_due) {
        (_, true) => Some(None),
        (Some(raw), false) => {
            let parsed = parse_due_input(&raw, today)
                .ok_or_else(|| BoardError::validation("due date", format!("could not understand '{raw}'")))?;
            Some(Some(parsed))
        }
        (None, false) => None,
    };
    let tags = if tags.is_empty() {
        None
    } else {
        Some(tags.iter().map(|raw| parse_tag(raw)).collect::<Result<Vec<_>>>()?)
    };

    Ok(TaskPatch {
        content,
        description: if clear_desc { Some(None) } else { desc.map(Some) },
        due_date,
        assignee: if unassign { Some(None) } else { assignee.map(Some) },
        icon: icon.map(Some),
        priority: priority.map(Some),
        tags,
        ..Default::default()
    })
}

/// Parse `text` or `text:#color` into a tag with a fresh id.
fn parse_tag(raw: &str) -> Result<Tag> {
    let (text, color) = match raw.split_once(':') {
        Some((text, color)) => (text.trim(), Some(color.trim().to_string()).filter(|c| !c.is_empty())),
        None => (raw.trim(), None),
    };
    if text.is_empty() {
        return Err(BoardError::validation("tag", "must not be empty"));
    }
    Ok(Tag {
        id: new_id(),
        text: text.to_string(),
        color,
    })
}

fn cmd_sprint(session: &Session, action: SprintAction) -> Result<()> {
    match action {
        SprintAction::New { title } => {
            let id = new_id();
            session.apply(|b| as_scrum(b)?.create_sprint(&id, title.as_deref()).map(Board::Scrum))?;
            println!("Created sprint {id}");
        }
        SprintAction::Start { sprint } => {
            session.apply(|b| as_scrum(b)?.start_sprint(&sprint, Utc::now()).map(Board::Scrum))?;
            println!("Started sprint {sprint}");
        }
        SprintAction::Complete { sprint } => {
            session.apply(|b| as_scrum(b)?.complete_sprint(&sprint, Utc::now()).map(Board::Scrum))?;
            println!("Completed sprint {sprint}");
        }
        SprintAction::Reopen { sprint } => {
            session.apply(|b| as_scrum(b)?.reopen_sprint(&sprint).map(Board::Scrum))?;
            println!("Reopened sprint {sprint}");
        }
        SprintAction::Rename { sprint, title } => {
            session.apply(|b| as_scrum(b)?.rename_sprint(&sprint, &title).map(Board::Scrum))?;
            println!("Renamed sprint {sprint}");
        }
        SprintAction::Delete { sprint } => {
            session.apply(|b| as_scrum(b)?.delete_sprint(&sprint).map(Board::Scrum))?;
            println!("Deleted sprint {sprint}; its tasks are back in the backlog");
        }
    }
    Ok(())
}

/// Print every container with its tasks in a table.
fn cmd_show(session: &Session) -> Result<()> {
    let project = session.store.load(&session.project_id()?)?;
    let today = Local::now().date_naive();
    println!("{} ({})", project.name, project.id);
    for view in project.board.containers() {
        let status = view.status.map(|s| format!(" [{s}]")).unwrap_or_default();
        println!();
        println!("== {}{} ({}) - {} task(s)", view.title, status, view.id, view.tasks.len());
        if view.tasks.is_empty() {
            continue;
        }
        println!("{:<10} {:<32} {:<14} {:<7} {:<4} {}", "ID", "Task", "Assignee", "Pri", "Pts", "Due");
        for t in view.tasks {
            println!(
                "{:<10} {:<32} {:<14} {:<7} {:<4} {}",
                truncate(&t.id, 10),
                truncate(&t.content, 32),
                truncate(t.assignee.as_deref().unwrap_or("-"), 14),
                format_priority(t.priority),
                t.story_points.map(|p| p.to_string()).unwrap_or_else(|| "-".into()),
                format_due_relative(t.due_date, today),
            );
        }
    }
    Ok(())
}

fn cmd_stats(session: &Session, json: bool) -> Result<()> {
    let project = session.store.load(&session.project_id()?)?;
    let stats = board_stats(&project.board, &session.config.done_heuristic());
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Tasks:      {}", stats.total_tasks);
    println!("Completed:  {} ({}%)", stats.completed_tasks, stats.completion_percent());
    if let Some(points) = &stats.story_points {
        println!("Points:     {} / {}", points.completed, points.total);
    }
    println!();
    for (title, count) in &stats.per_container {
        println!("  {:<28} {}", truncate(title, 28), count);
    }
    if !stats.by_assignee.is_empty() || stats.unassigned > 0 {
        println!();
        for (name, count) in &stats.by_assignee {
            println!("  {:<28} {}", truncate(name, 28), count);
        }
        println!("  {:<28} {}", "(unassigned)", stats.unassigned);
    }
    if !session.config.members.is_empty() {
        println!();
        println!("Workload (name match):");
        for (member, count) in workload(&project.board, &session.config.members) {
            println!("  {:<28} {}", truncate(&member, 28), count);
        }
    }
    Ok(())
}

fn cmd_import(
    session: &Session,
    file: PathBuf,
    replace: bool,
    column: Option<String>,
    context: String,
) -> Result<()> {
    let generator = FileGenerator::new(file);
    let board = session.apply(|b| {
        let merge = match b {
            Board::Scrum(_) => GeneratedMerge::AppendToBacklog,
            Board::Kanban(_) if replace => GeneratedMerge::ReplaceColumns,
            Board::Kanban(k) => {
                let column = match column {
                    Some(c) => c,
                    None => k
                        .columns
                        .first()
                        .map(|c| c.id.clone())
                        .ok_or_else(|| BoardError::validation("column", "board has no columns to import into"))?,
                };
                GeneratedMerge::AppendToColumn(column)
            }
        };
        apply_generated(b, &generator, &context, &merge)
    })?;
    println!("Imported; board now has {} task(s)", board.task_count());
    Ok(())
}

/// Export tasks to CSV for reporting.
fn cmd_export(session: &Session, output: Option<PathBuf>) -> Result<()> {
    let project = session.store.load(&session.project_id()?)?;
    let output_path = output.unwrap_or_else(|| PathBuf::from(format!("{}.csv", project.id)));

    let mut csv = String::from("Container,ID,Content,Assignee,Priority,StoryPoints,Due,Tags,Description\n");
    let mut count = 0;
    for view in project.board.containers() {
        for t in view.tasks {
            let tags: Vec<&str> = t.tags.iter().map(|tag| tag.text.as_str()).collect();
            let row = [
                view.title.clone(),
                t.id.clone(),
                t.content.clone(),
                t.assignee.clone().unwrap_or_default(),
                t.priority.map(|p| format_priority(Some(p)).to_string()).unwrap_or_default(),
                t.story_points.map(|p| p.to_string()).unwrap_or_default(),
                t.due_date.map(|d| d.to_string()).unwrap_or_default(),
                tags.join(";"),
                t.description.clone().unwrap_or_default(),
            ];
            let escaped: Vec<String> = row.iter().map(|f| escape_csv(f)).collect();
            csv.push_str(&escaped.join(","));
            csv.push('\n');
            count += 1;
        }
    }
    fs::write(&output_path, csv)?;
    println!("Exported {count} task(s) to {}", output_path.display());
    Ok(())
}

/// Quote a CSV field when it contains a separator, quote or newline.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 6), "a lon…");
    }

    #[test]
    fn test_parse_tag() {
        let tag = parse_tag("urgent:#ef4444").unwrap();
        assert_eq!(tag.text, "urgent");
        assert_eq!(tag.color.as_deref(), Some("#ef4444"));
        assert_eq!(parse_tag("plain").unwrap().color, None);
        assert!(parse_tag(" :#fff").is_err());
    }

    #[test]
    fn test_build_patch() {
        let patch = build_patch(
            None, None, true, Some("2030-01-02".into()), false, None, true, None, Some(Priority::Low), vec![],
        )
        .unwrap();
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.assignee, Some(None));
        assert_eq!(patch.priority, Some(Some(Priority::Low)));
        assert!(patch.due_date.unwrap().is_some());
        assert!(patch.tags.is_none());

        assert!(build_patch(None, None, false, Some("whenever".into()), false, None, false, None, None, vec![]).is_err());
        assert!(build_patch(None, None, false, None, false, None, false, None, None, vec![]).unwrap().is_empty());
    }
}
