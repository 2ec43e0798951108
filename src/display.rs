//! Read-only text projections of the calendar state. Each panel is rendered
//! in full from current state after every mutation; there is no incremental
//! update.

use crate::calendar::AcademicCalendar;
use chrono::NaiveDate;
use std::fmt::Write;

/// Display labels are hard-wrapped every 50 characters, with no
/// word-boundary awareness.
pub const WRAP_WIDTH: usize = 50;

pub fn wrap_label(label: &str, width: usize) -> String {
    if width == 0 || label.chars().count() <= width {
        return label.to_string();
    }
    let chars: Vec<char> = label.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%y").to_string()
}

/// The "Selected Events" panel: one line per date carrying a label.
pub fn selected_events(calendar: &AcademicCalendar) -> String {
    let mut out = String::new();
    for date in calendar.dates() {
        let label = calendar.label(date);
        if label.is_empty() {
            continue;
        }
        let _ = writeln!(
            out,
            "{}: {}",
            display_date(date),
            wrap_label(&label, WRAP_WIDTH)
        );
    }
    out
}

/// The "Working Days Summary" panel: per weekday group, the count and the
/// qualifying dates.
pub fn working_days_summary(calendar: &AcademicCalendar) -> String {
    let mut out = String::from("Working Days by Weekday:\n\n");
    for group in calendar.working_days_by_weekday() {
        let _ = writeln!(out, "{} ({}):", group.name, group.count());
        for date in &group.dates {
            let _ = writeln!(out, "  - {}", display_date(*date));
        }
        out.push('\n');
    }
    out
}

/// The popup events view: labels grouped under per-date headers.
pub fn events_by_date(calendar: &AcademicCalendar) -> String {
    let mut out = String::new();
    for date in calendar.dates() {
        let label = calendar.label(date);
        if label.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\nDate: {}", display_date(date));
        let _ = writeln!(out, "{}", "─".repeat(30));
        let _ = writeln!(out, "• {label}");
    }
    out
}
