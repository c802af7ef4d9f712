use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

static OUTPUT_JSON: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_json_output(json: bool) {
    OUTPUT_JSON.store(json, Ordering::Relaxed);
}

pub fn is_json_output() -> bool {
    OUTPUT_JSON.load(Ordering::Relaxed)
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print a table or JSON depending on output mode.
pub fn print_table<T, R, F>(items: &[T], to_row: F)
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if is_json_output() {
        println!("{}", serde_json::to_string_pretty(items).unwrap_or_default());
    } else {
        let rows: Vec<R> = items.iter().map(|item| to_row(item)).collect();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }
}

/// Print a single item or JSON depending on output mode.
pub fn print_item<T: Serialize>(item: &T, display: impl FnOnce(&T)) {
    if is_json_output() {
        println!("{}", serde_json::to_string_pretty(item).unwrap_or_default());
    } else {
        display(item);
    }
}

/// Print a status message (skipped when quiet, simple object in JSON mode).
pub fn print_message(message: &str) {
    if is_quiet() {
        return;
    }
    if is_json_output() {
        println!(r#"{{"message": "{}"}}"#, message.replace('"', "\\\""));
    } else {
        println!("{message}");
    }
}

pub fn success(message: &str) {
    if is_quiet() {
        return;
    }
    if is_json_output() {
        print_message(message);
    } else {
        println!("{} {message}", "✓".green());
    }
}

pub fn warning(message: &str) {
    eprintln!("{} {message}", "!".yellow());
}

/// Format a timestamp as a local calendar date.
pub fn format_date(dt: DateTime<Utc>) -> String {
    let local: DateTime<Local> = dt.into();
    local.format("%b %-d, %Y").to_string()
}

/// Format a relative time (e.g., "2 days ago").
pub fn format_relative(dt: DateTime<Utc>) -> String {
    let diff = Utc::now().signed_duration_since(dt);

    if diff.num_seconds() < 60 {
        "just now".to_string()
    } else if diff.num_minutes() < 60 {
        let mins = diff.num_minutes();
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if diff.num_hours() < 24 {
        let hours = diff.num_hours();
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if diff.num_days() < 30 {
        let days = diff.num_days();
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        format_date(dt)
    }
}

/// Truncate a string with ellipsis.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer description here", 10), "a longe...");
    }

    #[test]
    fn relative_times() {
        let now = Utc::now();
        assert_eq!(format_relative(now), "just now");
        assert_eq!(format_relative(now - chrono::Duration::minutes(5)), "5 mins ago");
        assert_eq!(format_relative(now - chrono::Duration::hours(1)), "1 hour ago");
        assert_eq!(format_relative(now - chrono::Duration::days(2)), "2 days ago");
    }
}
