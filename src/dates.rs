//! Human-friendly due date parsing and display.

use chrono::{Datelike, Duration, NaiveDate, TimeDelta};

/// Parse due date input relative to `today`.
///
/// Supports:
/// - "today", "tomorrow", "yesterday"
/// - "eow" / "end of week", "eom" / "end of month"
/// - "in 3d", "in 2w", "in 1m" (a month is 30 days)
/// - weekday names, optionally prefixed with "this" or "next"
/// - "YYYY-MM-DD"
pub fn parse_due_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return today.succ_opt(),
        "yesterday" => return today.pred_opt(),
        "end of week" | "eow" => {
            let weekday = today.weekday().num_days_from_monday() as i64;
            return today.checked_add_signed(Duration::days(6 - weekday));
        }
        "end of month" | "eom" => {
            let (year, month) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            return NaiveDate::from_ymd_opt(year, month, 1).and_then(|d| d.pred_opt());
        }
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        let rest = rest.trim();
        if let Some((idx, unit)) = rest.char_indices().last() {
            if let Ok(n) = rest[..idx].trim().parse::<i64>() {
                // Out-of-range offsets are unparseable, not a panic.
                let offset = match unit {
                    'd' => TimeDelta::try_days(n),
                    'w' => TimeDelta::try_weeks(n),
                    'm' => n.checked_mul(30).and_then(TimeDelta::try_days),
                    _ => return None,
                };
                return offset.and_then(|delta| today.checked_add_signed(delta));
            }
        }
    }

    let (skip_week, day_name) = if let Some(rest) = s.strip_prefix("next ") {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix("this ") {
        (false, rest)
    } else {
        (false, s.as_str())
    };
    if let Some(target) = weekday_index(day_name) {
        let current = today.weekday().num_days_from_monday() as i64;
        let ahead = (target + 7 - current) % 7;
        let days = if skip_week {
            if ahead == 0 { 7 } else { ahead + 7 }
        } else {
            ahead
        };
        return today.checked_add_signed(Duration::days(days));
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

fn weekday_index(name: &str) -> Option<i64> {
    let idx = match name {
        "monday" | "mon" => 0,
        "tuesday" | "tue" => 1,
        "wednesday" | "wed" => 2,
        "thursday" | "thu" => 3,
        "friday" | "fri" => 4,
        "saturday" | "sat" => 5,
        "sunday" | "sun" => 6,
        _ => return None,
    };
    Some(idx)
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: Option<NaiveDate>, today: NaiveDate) -> String {
    match due {
        None => "-".into(),
        Some(d) => {
            let delta = (d - today).num_days();
            match delta {
                0 => "today".into(),
                1 => "tomorrow".into(),
                n if n > 1 => format!("in {n}d"),
                n => format!("{}d late", -n),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A Wednesday.
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_relative_words() {
        assert_eq!(parse_due_input("Tomorrow", today()), Some(ymd(2024, 5, 16)));
        assert_eq!(parse_due_input("eow", today()), Some(ymd(2024, 5, 19)));
        assert_eq!(parse_due_input("end of month", today()), Some(ymd(2024, 5, 31)));
        assert_eq!(parse_due_input("in 3d", today()), Some(ymd(2024, 5, 18)));
        assert_eq!(parse_due_input("in 2w", today()), Some(ymd(2024, 5, 29)));
    }

    #[test]
    fn test_weekdays() {
        assert_eq!(parse_due_input("friday", today()), Some(ymd(2024, 5, 17)));
        assert_eq!(parse_due_input("wed", today()), Some(today()));
        assert_eq!(parse_due_input("next wed", today()), Some(ymd(2024, 5, 22)));
        assert_eq!(parse_due_input("next monday", today()), Some(ymd(2024, 5, 27)));
    }

    #[test]
    fn test_iso_and_garbage() {
        assert_eq!(parse_due_input("2024-12-01", today()), Some(ymd(2024, 12, 1)));
        assert_eq!(parse_due_input("someday", today()), None);
    }

    #[test]
    fn test_out_of_range_offsets_are_rejected() {
        assert_eq!(parse_due_input("in 999999999999d", today()), None);
        assert_eq!(parse_due_input("in 999999999999w", today()), None);
        assert_eq!(parse_due_input("in 9223372036854775807m", today()), None);
        assert_eq!(parse_due_input("in -999999999999d", today()), None);
        assert_eq!(parse_due_input("tomorrow", NaiveDate::MAX), None);
        assert_eq!(parse_due_input("in 1m", today()), Some(ymd(2024, 6, 14)));
    }

    #[test]
    fn test_format_due_relative() {
        assert_eq!(format_due_relative(None, today()), "-");
        assert_eq!(format_due_relative(Some(ymd(2024, 5, 18)), today()), "in 3d");
        assert_eq!(format_due_relative(Some(ymd(2024, 5, 13)), today()), "2d late");
    }
}
