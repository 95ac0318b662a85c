//! Colour helpers for the board view.

use ratatui::style::Color;
use workspace_boards::fields::{Priority, SprintStatus};

/// Selection accent used when a container has no colour of its own.
pub const ACCENT: Color = Color::Rgb(59, 130, 246);
/// Planned sprints
pub const SLATE: Color = Color::Rgb(100, 116, 139);
/// Active sprints and high priority
pub const AMBER: Color = Color::Rgb(245, 158, 11);
/// Completed sprints
pub const GREEN: Color = Color::Rgb(34, 197, 94);

/// Parse `#rrggbb` (or `rrggbb`) into a terminal colour.
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

pub fn sprint_status_color(status: SprintStatus) -> Color {
    match status {
        SprintStatus::Planned => SLATE,
        SprintStatus::Active => AMBER,
        SprintStatus::Completed => GREEN,
    }
}

pub fn priority_color(priority: Option<Priority>) -> Color {
    match priority {
        Some(Priority::High) => Color::Red,
        Some(Priority::Medium) => AMBER,
        Some(Priority::Low) => Color::Gray,
        None => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#22c55e"), Some(Color::Rgb(0x22, 0xc5, 0x5e)));
        assert_eq!(parse_hex_color("ffffff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }
}
