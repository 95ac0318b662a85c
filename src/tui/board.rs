//! Interactive board view.
//!
//! Renders a board's containers side by side (Kanban columns, or the Scrum
//! backlog followed by sprints) and turns key presses into single engine
//! calls. Each successful call is saved through the project store straight
//! away; a failed call leaves the board as it was and shows the error.

use std::io;
use std::time::Duration;

use chrono::{Local, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::debug;

use workspace_boards::board::{Board, ContainerView};
use workspace_boards::config::Config;
use workspace_boards::dates::format_due_relative;
use workspace_boards::error::{BoardError, Result};
use workspace_boards::fields::{format_priority, BoardKind, SprintStatus};
use workspace_boards::project::Project;
use workspace_boards::stats::{board_stats, DoneHeuristic};
use workspace_boards::store::ProjectStore;
use workspace_boards::task::Task;

use crate::cmd::new_id;
use crate::tui::colors::{parse_hex_color, priority_color, sprint_status_color, ACCENT};
use crate::tui::input::InputField;

/// What the open text prompt will do with its value.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Prompt {
    AddTask,
    AddColumn,
    RenameColumn,
    RenameSprint,
}

impl Prompt {
    fn label(self) -> &'static str {
        match self {
            Prompt::AddTask => "New task",
            Prompt::AddColumn => "New column",
            Prompt::RenameColumn => "Rename column",
            Prompt::RenameSprint => "Rename sprint",
        }
    }

    /// The rename prompt for a container, or `None` for the Scrum backlog.
    fn rename_for(kind: BoardKind, view: &ContainerView) -> Option<Prompt> {
        match (kind, view.status) {
            (BoardKind::Kanban, _) => Some(Prompt::RenameColumn),
            (BoardKind::Scrum, Some(_)) => Some(Prompt::RenameSprint),
            (BoardKind::Scrum, None) => None,
        }
    }
}

pub struct BoardApp<'a> {
    store: &'a dyn ProjectStore,
    project: Project,
    heuristic: DoneHeuristic,
    default_color: String,
    selected_column: usize,
    selected_card: usize,
    column_scroll_offsets: Vec<usize>,
    status_message: String,
    show_task_detail: bool,
    prompt: Option<(Prompt, InputField)>,
    quit: bool,
}

impl<'a> BoardApp<'a> {
    pub fn new(store: &'a dyn ProjectStore, project: Project, config: &Config) -> Self {
        let mut app = BoardApp {
            store,
            project,
            heuristic: config.done_heuristic(),
            default_color: config.default_column_color.clone(),
            selected_column: 0,
            selected_card: 0,
            column_scroll_offsets: Vec::new(),
            status_message: String::new(),
            show_task_detail: false,
            prompt: None,
            quit: false,
        };
        app.clamp_selection();
        app
    }

    fn board(&self) -> &Board {
        &self.project.board
    }

    fn container_count(&self) -> usize {
        self.board().containers().len()
    }

    fn container_id(&self, idx: usize) -> Option<String> {
        self.board().containers().get(idx).map(|c| c.id.clone())
    }

    fn task_ids(&self, idx: usize) -> Vec<String> {
        self.board()
            .containers()
            .get(idx)
            .map(|c| c.tasks.iter().map(|t| t.id.clone()).collect())
            .unwrap_or_default()
    }

    fn selected_task_id(&self) -> Option<String> {
        self.task_ids(self.selected_column).get(self.selected_card).cloned()
    }

    fn selected_sprint(&self) -> Option<(String, SprintStatus)> {
        let containers = self.board().containers();
        let view = containers.get(self.selected_column)?;
        view.status.map(|status| (view.id.clone(), status))
    }

    /// Ensure selected column and card indices are valid.
    fn clamp_selection(&mut self) {
        let count = self.container_count();
        self.column_scroll_offsets.resize(count, 0);
        if count == 0 {
            self.selected_column = 0;
            self.selected_card = 0;
            return;
        }
        if self.selected_column >= count {
            self.selected_column = count - 1;
        }
        let len = self.task_ids(self.selected_column).len();
        if len == 0 {
            self.selected_card = 0;
        } else if self.selected_card >= len {
            self.selected_card = len - 1;
        }
    }

    /// Run one engine operation against the current board and persist the result.
    fn apply(&mut self, done: String, op: impl FnOnce(&Board) -> Result<Board>) -> bool {
        let outcome = op(&self.project.board).and_then(|next| {
            self.store.save(&self.project.id, &next)?;
            Ok(next)
        });
        match outcome {
            Ok(next) => {
                self.project.board = next;
                self.status_message = done;
                self.clamp_selection();
                true
            }
            Err(e) => {
                debug!(error = %e, "board operation rejected");
                self.status_message = format!("Error: {e}");
                false
            }
        }
    }

    fn select_task(&mut self, column: usize, task_id: &str) {
        self.selected_column = column;
        if let Some(pos) = self.task_ids(column).iter().position(|id| id == task_id) {
            self.selected_card = pos;
        }
        self.clamp_selection();
    }

    /// Move the selected card into the neighbouring container (appended).
    fn move_card_sideways(&mut self, forward: bool) {
        let Some(task_id) = self.selected_task_id() else { return };
        let target_idx = if forward {
            self.selected_column + 1
        } else if self.selected_column > 0 {
            self.selected_column - 1
        } else {
            return;
        };
        let (Some(source), Some(target)) = (self.container_id(self.selected_column), self.container_id(target_idx)) else {
            return;
        };
        let msg = format!("Moved task to {target}");
        if self.apply(msg, |b| b.move_task(&task_id, &source, &target, None)) {
            self.select_task(target_idx, &task_id);
        }
    }

    /// Reorder the selected card one step within its container.
    fn move_card_vertically(&mut self, up: bool) {
        let Some(task_id) = self.selected_task_id() else { return };
        let Some(container) = self.container_id(self.selected_column) else { return };
        let ids = self.task_ids(self.selected_column);
        let sel = self.selected_card;

        // Anchor is resolved after the card is removed, so "down one" means
        // "before the card two below", or the end.
        let before = if up {
            if sel == 0 {
                return;
            }
            Some(ids[sel - 1].clone())
        } else {
            if sel + 1 >= ids.len() {
                return;
            }
            ids.get(sel + 2).cloned()
        };
        let column = self.selected_column;
        if self.apply("Reordered task".to_string(), |b| b.move_task(&task_id, &container, &container, before.as_deref())) {
            self.select_task(column, &task_id);
        }
    }

    /// Reorder the selected Kanban column one step left or right.
    fn move_column(&mut self, left: bool) {
        if self.board().kind() != BoardKind::Kanban {
            self.status_message = "Sprints are ordered by creation".to_string();
            return;
        }
        let sel = self.selected_column;
        let Some(column) = self.container_id(sel) else { return };
        let before = if left {
            if sel == 0 {
                return;
            }
            self.container_id(sel - 1)
        } else {
            if sel + 1 >= self.container_count() {
                return;
            }
            self.container_id(sel + 2)
        };
        let ok = self.apply("Moved column".to_string(), |b| match b {
            Board::Kanban(k) => k.reorder_column(&column, before.as_deref()).map(Board::Kanban),
            Board::Scrum(_) => Err(BoardError::validation("board", "not a Kanban board")),
        });
        if ok {
            self.selected_column = if left { sel - 1 } else { sel + 1 };
            self.clamp_selection();
        }
    }

    fn delete_selected_task(&mut self) {
        let Some(task_id) = self.selected_task_id() else { return };
        let Some(container) = self.container_id(self.selected_column) else { return };
        self.apply("Task deleted".to_string(), |b| b.delete_task(&container, &task_id));
    }

    /// Delete the selected column (with its tasks) or sprint (tasks return to backlog).
    fn delete_selected_container(&mut self) {
        let Some(id) = self.container_id(self.selected_column) else { return };
        self.apply(format!("Deleted {id}"), |b| match b {
            Board::Kanban(k) => k.delete_column(&id).map(Board::Kanban),
            Board::Scrum(s) => s.delete_sprint(&id).map(Board::Scrum),
        });
    }

    /// `planned -> active -> completed` for the selected sprint.
    fn advance_sprint(&mut self) {
        let Some((id, status)) = self.selected_sprint() else {
            self.status_message = "Select a sprint first".to_string();
            return;
        };
        let now = Utc::now();
        self.apply(format!("Sprint {id} advanced"), |b| {
            let Board::Scrum(s) = b else {
                return Err(BoardError::validation("board", "not a Scrum board"));
            };
            match status {
                SprintStatus::Planned => s.start_sprint(&id, now),
                _ => s.complete_sprint(&id, now),
            }
            .map(Board::Scrum)
        });
    }

    fn reopen_sprint(&mut self) {
        let Some((id, _)) = self.selected_sprint() else {
            self.status_message = "Select a sprint first".to_string();
            return;
        };
        self.apply(format!("Sprint {id} reopened"), |b| match b {
            Board::Scrum(s) => s.reopen_sprint(&id).map(Board::Scrum),
            Board::Kanban(_) => Err(BoardError::validation("board", "not a Scrum board")),
        });
    }

    /// Kanban: prompt for a column title. Scrum: create a sprint with the default title.
    fn new_container(&mut self) {
        match self.board().kind() {
            BoardKind::Kanban => self.prompt = Some((Prompt::AddColumn, InputField::new())),
            BoardKind::Scrum => {
                let id = new_id();
                self.apply("Sprint created".to_string(), |b| match b {
                    Board::Scrum(s) => s.create_sprint(&id, None).map(Board::Scrum),
                    Board::Kanban(_) => Err(BoardError::validation("board", "not a Scrum board")),
                });
            }
        }
    }

    fn submit_prompt(&mut self, prompt: Prompt, value: String) {
        match prompt {
            Prompt::AddTask => {
                let Some(container) = self.container_id(self.selected_column) else {
                    self.status_message = "Add a column first".to_string();
                    return;
                };
                let id = new_id();
                let column = self.selected_column;
                if self.apply("Task added".to_string(), |b| b.add_task(&container, &id, &value, None)) {
                    self.select_task(column, &id);
                }
            }
            Prompt::AddColumn => {
                let id = new_id();
                let color = self.default_color.clone();
                if self.apply("Column added".to_string(), |b| match b {
                    Board::Kanban(k) => k.add_column(&id, &value, Some(&color)).map(Board::Kanban),
                    Board::Scrum(_) => Err(BoardError::validation("board", "not a Kanban board")),
                }) {
                    self.selected_column = self.container_count().saturating_sub(1);
                    self.clamp_selection();
                }
            }
            Prompt::RenameColumn => {
                let Some(id) = self.container_id(self.selected_column) else { return };
                self.apply("Column renamed".to_string(), |b| match b {
                    Board::Kanban(k) => k.rename_column(&id, &value).map(Board::Kanban),
                    Board::Scrum(_) => Err(BoardError::validation("board", "not a Kanban board")),
                });
            }
            Prompt::RenameSprint => {
                let Some(id) = self.container_id(self.selected_column) else { return };
                self.apply("Sprint renamed".to_string(), |b| match b {
                    Board::Scrum(s) => s.rename_sprint(&id, &value).map(Board::Scrum),
                    Board::Kanban(_) => Err(BoardError::validation("board", "not a Scrum board")),
                });
            }
        }
    }

    /// Handle prompt keys. Returns true when the key was consumed.
    fn handle_prompt_key(&mut self, code: KeyCode) -> bool {
        let Some((prompt, field)) = self.prompt.as_mut() else {
            return false;
        };
        match code {
            KeyCode::Esc => {
                self.prompt = None;
                self.status_message.clear();
            }
            KeyCode::Enter => {
                let prompt = *prompt;
                let value = field.value.clone();
                self.prompt = None;
                self.submit_prompt(prompt, value);
            }
            KeyCode::Backspace => field.handle_backspace(),
            KeyCode::Delete => field.handle_delete(),
            KeyCode::Left => field.move_cursor_left(),
            KeyCode::Right => field.move_cursor_right(),
            KeyCode::Char(c) => field.handle_char(c),
            _ => {}
        }
        true
    }

    /// Handle keyboard input
    fn handle_input(&mut self) -> io::Result<()> {
        if !event::poll(Duration::from_millis(50))? {
            return Ok(());
        }
        let Event::Key(key) = event::read()? else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if self.handle_prompt_key(key.code) {
            return Ok(());
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('c') if ctrl => self.quit = true,
            KeyCode::Esc if self.show_task_detail => self.show_task_detail = false,
            KeyCode::Esc | KeyCode::Char('q') => self.quit = true,
            KeyCode::Enter => self.show_task_detail = !self.show_task_detail,

            KeyCode::Left if ctrl => self.move_card_sideways(false),
            KeyCode::Right if ctrl => self.move_card_sideways(true),
            KeyCode::Up if shift => self.move_card_vertically(true),
            KeyCode::Down if shift => self.move_card_vertically(false),
            KeyCode::Char('<') => self.move_column(true),
            KeyCode::Char('>') => self.move_column(false),

            KeyCode::Left => {
                self.status_message.clear();
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Right => {
                self.status_message.clear();
                if self.selected_column + 1 < self.container_count() {
                    self.selected_column += 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Up => self.selected_card = self.selected_card.saturating_sub(1),
            KeyCode::Down => {
                let len = self.task_ids(self.selected_column).len();
                if self.selected_card + 1 < len {
                    self.selected_card += 1;
                }
            }

            KeyCode::Char('a') => self.prompt = Some((Prompt::AddTask, InputField::new())),
            KeyCode::Char('n') => self.new_container(),
            KeyCode::Char('R') => {
                let kind = self.board().kind();
                let rename = self
                    .board()
                    .containers()
                    .get(self.selected_column)
                    .and_then(|c| Prompt::rename_for(kind, c).map(|prompt| (prompt, c.title.clone())));
                match rename {
                    Some((prompt, title)) => self.prompt = Some((prompt, InputField::with_value(&title))),
                    None => self.status_message = "Nothing to rename here".to_string(),
                }
            }
            KeyCode::Char('x') => self.delete_selected_task(),
            KeyCode::Char('D') => self.delete_selected_container(),
            KeyCode::Char('s') => self.advance_sprint(),
            KeyCode::Char('r') => self.reopen_sprint(),
            KeyCode::Char('h') => {
                self.status_message = "Enter: Details | a: Add | x: Delete | Ctrl+←/→: Move | Shift+↑/↓: Reorder | </>: Move column | n: New column/sprint | R: Rename | D: Delete column/sprint | s/r: Sprint | q: Quit".to_string();
            }
            _ => {}
        }
        Ok(())
    }

    /// Render the whole screen.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_board(f, chunks[1]);
        self.render_status_bar(f, chunks[2]);

        if self.show_task_detail {
            self.render_task_detail_popup(f);
        }
        if self.prompt.is_some() {
            self.render_prompt(f);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let stats = board_stats(self.board(), &self.heuristic);
        let kind = match self.board().kind() {
            BoardKind::Kanban => "KANBAN",
            BoardKind::Scrum => "SCRUM",
        };
        let mut summary = format!(
            "{}  Tasks: {}  Done: {} ({}%)",
            self.project.name,
            stats.total_tasks,
            stats.completed_tasks,
            stats.completion_percent()
        );
        if let Some(points) = &stats.story_points {
            summary.push_str(&format!("  Points: {}/{}", points.completed, points.total));
        }

        let header = Paragraph::new(Line::from(vec![
            Span::styled(kind, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(summary, Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC)),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_board(&mut self, f: &mut Frame, area: Rect) {
        let count = self.container_count();
        if count == 0 {
            let empty = Paragraph::new("No columns yet. Press 'n' to add one.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(empty, area);
            return;
        }

        let constraints: Vec<Constraint> = (0..count).map(|_| Constraint::Ratio(1, count as u32)).collect();
        let areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (i, &column_area) in areas.iter().enumerate() {
            self.render_column(f, column_area, i);
        }
    }

    fn render_column(&mut self, f: &mut Frame, area: Rect, index: usize) {
        let selected = index == self.selected_column;
        let visible_height = area.height.saturating_sub(2) as usize;

        const CARD_HEIGHT: usize = 4;
        let visible_cards = (visible_height / CARD_HEIGHT).max(1);
        let task_len = self.task_ids(index).len();

        // Keep the selected card in view.
        let mut offset = self.column_scroll_offsets[index];
        if selected {
            if self.selected_card < offset {
                offset = self.selected_card;
            } else if self.selected_card >= offset + visible_cards {
                offset = self.selected_card + 1 - visible_cards;
            }
            self.column_scroll_offsets[index] = offset;
        }

        let containers = self.board().containers();
        let view = &containers[index];
        let accent = match (view.status, view.color) {
            (Some(status), _) => sprint_status_color(status),
            (None, Some(color)) => parse_hex_color(color).unwrap_or(ACCENT),
            (None, None) => ACCENT,
        };
        let title = match view.status {
            Some(status) => format!(" {} [{}] ({}) ", view.title, status, view.tasks.len()),
            None => format!(" {} ({}) ", view.title, view.tasks.len()),
        };
        let border_style = if selected {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(accent)
        };
        let block = Block::default().borders(Borders::ALL).title(title).border_style(border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let today = Local::now().date_naive();
        let mut y = 0;
        for (card_index, task) in view.tasks.iter().enumerate().skip(offset) {
            if y + CARD_HEIGHT > inner.height as usize {
                break;
            }
            let card_area = Rect {
                x: inner.x,
                y: inner.y + y as u16,
                width: inner.width,
                height: CARD_HEIGHT as u16,
            };
            render_card(f, card_area, task, selected && card_index == self.selected_card, accent, today);
            y += CARD_HEIGHT;
        }

        if offset > 0 {
            let above = Paragraph::new(format!("▲ +{offset} above")).style(Style::default().fg(Color::Cyan));
            f.render_widget(above, Rect { height: 1, ..inner });
        }
        let shown = y / CARD_HEIGHT;
        let remaining = task_len.saturating_sub(offset + shown);
        if remaining > 0 && inner.height > 0 {
            let below = Paragraph::new(format!("▼ +{remaining} below")).style(Style::default().fg(Color::Cyan));
            f.render_widget(below, Rect { y: inner.y + inner.height - 1, height: 1, ..inner });
        }
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            "a: Add | Ctrl+←/→: Move | Shift+↑/↓: Reorder | Enter: Details | h: Help | q: Quit".to_string()
        };
        let status = Paragraph::new(text).style(Style::default().bg(ACCENT).fg(Color::White));
        f.render_widget(status, area);
    }

    fn render_task_detail_popup(&self, f: &mut Frame) {
        let Some(task_id) = self.selected_task_id() else { return };
        let Some((container, task)) = self.board().find_task(&task_id) else { return };
        let popup_area = centered(f.area(), 70, 70);
        f.render_widget(Clear, popup_area);

        let today = Local::now().date_naive();
        let tags: Vec<&str> = task.tags.iter().map(|t| t.text.as_str()).collect();
        let mut lines = vec![
            Line::from(Span::styled(task.content.clone(), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(format!("Id:        {}", task.id)),
            Line::from(format!("Container: {container}")),
            Line::from(format!("Assignee:  {}", task.assignee.as_deref().unwrap_or("-"))),
            Line::from(format!("Priority:  {}", format_priority(task.priority))),
            Line::from(format!(
                "Points:    {}",
                task.story_points.map(|p| p.to_string()).unwrap_or_else(|| "-".into())
            )),
            Line::from(format!("Due:       {}", format_due_relative(task.due_date, today))),
            Line::from(format!("Tags:      {}", if tags.is_empty() { "-".to_string() } else { tags.join(", ") })),
            Line::from(format!("Files:     {}", task.attachments.len())),
            Line::from(""),
            Line::from("Description:"),
            Line::from(task.description.clone().unwrap_or_else(|| "-".into())),
        ];
        if let Some(icon) = &task.icon {
            lines.insert(1, Line::from(icon.clone()));
        }

        let popup = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Task Details (Enter to close)")
                    .title_alignment(Alignment::Center)
                    .border_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            )
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(Color::Black));
        f.render_widget(popup, popup_area);
    }

    fn render_prompt(&self, f: &mut Frame) {
        let Some((prompt, field)) = &self.prompt else { return };
        let area = centered(f.area(), 50, 20);
        let area = Rect { height: 3.min(area.height), ..area };
        f.render_widget(Clear, area);
        let input = Paragraph::new(field.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} (Enter to save, Esc to cancel)", prompt.label())),
        );
        f.render_widget(input, area);
        f.set_cursor_position((area.x + 1 + field.cursor as u16, area.y + 1));
    }

    /// Main event loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quit {
            terminal.draw(|f| self.render(f))?;
            self.handle_input()?;
        }
        Ok(())
    }
}

fn render_card(f: &mut Frame, area: Rect, task: &Task, selected: bool, accent: Color, today: chrono::NaiveDate) {
    let style = if selected {
        Style::default().bg(accent).fg(Color::Black).add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray)
    };

    let title = match &task.icon {
        Some(icon) if !icon.starts_with("http") => format!("{icon} {}", task.content),
        _ => task.content.clone(),
    };
    let mut meta = vec![Span::raw(task.assignee.clone().unwrap_or_else(|| "-".into()))];
    if let Some(points) = task.story_points {
        meta.push(Span::raw(format!(" | {points}pt")));
    }
    if task.priority.is_some() {
        meta.push(Span::raw(" | "));
        meta.push(Span::styled(format_priority(task.priority), Style::default().fg(priority_color(task.priority))));
    }
    if task.due_date.is_some() {
        meta.push(Span::raw(format!(" | {}", format_due_relative(task.due_date, today))));
    }

    let card = Paragraph::new(vec![Line::from(title), Line::from(meta)])
        .block(Block::default().borders(Borders::ALL))
        .style(style)
        .wrap(Wrap { trim: true });
    f.render_widget(card, area);
}

/// A rectangle `pct_x`% by `pct_y`% of `area`, centred in it.
fn centered(area: Rect, pct_x: u16, pct_y: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(pct_x) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(pct_y) / 100) as u16;
    Rect::new(area.x + (area.width - width) / 2, area.y + (area.height - height) / 2, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use workspace_boards::kanban::KanbanBoard;
    use workspace_boards::scrum::ScrumBoard;

    #[test]
    fn test_rename_prompt_matches_container() {
        let kanban = Board::Kanban(KanbanBoard::new().add_column("c1", "To Do", None).unwrap());
        let views = kanban.containers();
        assert_eq!(Prompt::rename_for(BoardKind::Kanban, &views[0]), Some(Prompt::RenameColumn));

        let scrum = Board::Scrum(ScrumBoard::new().create_sprint("s1", None).unwrap());
        let views = scrum.containers();
        assert_eq!(Prompt::rename_for(BoardKind::Scrum, &views[0]), None);
        let sprint = Prompt::rename_for(BoardKind::Scrum, &views[1]).unwrap();
        assert_eq!(sprint, Prompt::RenameSprint);
        assert_eq!(sprint.label(), "Rename sprint");
    }
}
