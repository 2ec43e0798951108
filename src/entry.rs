use crate::event::EventCategory;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// One event application recorded against a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedEvent {
    /// Submitted label, including the " (Holiday)" suffix when the holiday
    /// toggle was set.
    pub label: String,
    pub category: EventCategory,
    /// The holiday toggle on the entry form.
    pub holiday: bool,
    /// Catalog-designated holiday event.
    pub designated_holiday: bool,
}

impl AppliedEvent {
    pub fn marks_holiday(&self) -> bool {
        self.holiday || self.designated_holiday
    }
}

/// Structured annotation for one calendar date: the ordered list of applied
/// events. Labels, separators, and ordinal designators are rendered from this
/// on demand rather than stored pre-formatted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    events: Vec<AppliedEvent>,
}

impl DayEntry {
    pub fn events(&self) -> &[AppliedEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Mutation contract: a holiday application replaces the whole list, a
    /// non-holiday application is appended.
    pub fn apply(&mut self, event: AppliedEvent) {
        if event.holiday {
            self.events.clear();
        }
        self.events.push(event);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn has_explicit_holiday(&self) -> bool {
        self.events.iter().any(|event| event.holiday)
    }

    pub fn marks_holiday(&self) -> bool {
        self.events.iter().any(AppliedEvent::marks_holiday)
    }

    pub(crate) fn from_events(events: Vec<AppliedEvent>) -> Self {
        Self { events }
    }
}

/// English ordinal suffix, 11th/12th/13th included.
pub fn ordinal_suffix(n: u32) -> &'static str {
    match n % 100 {
        11..=13 => "th",
        _ => match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

/// 1-based position of a Saturday within its month. Resets at every month
/// boundary; a month holds at most five Saturdays.
pub fn saturday_ordinal(date: NaiveDate) -> u32 {
    (date.day() - 1) / 7 + 1
}

fn saturday_designator(date: NaiveDate) -> String {
    let n = saturday_ordinal(date);
    format!("{n}{} Saturday", ordinal_suffix(n))
}

/// Renders the schedule label for a date from its structured entry.
///
/// Sundays and Saturdays carry their default designators unless a holiday
/// application overwrote the entry, in which case the label is exactly the
/// event label(s). Even-ordinal Saturdays with no events default to holiday.
pub fn render_label(date: NaiveDate, entry: &DayEntry) -> String {
    let joined = entry
        .events()
        .iter()
        .map(|event| event.label.as_str())
        .collect::<Vec<_>>()
        .join(" | ");

    if entry.has_explicit_holiday() {
        return joined;
    }

    match date.weekday() {
        Weekday::Sun => {
            if joined.is_empty() {
                "Sunday".to_string()
            } else {
                format!("Sunday | {joined}")
            }
        }
        Weekday::Sat => {
            let designator = saturday_designator(date);
            if joined.is_empty() {
                if saturday_ordinal(date) % 2 == 0 {
                    format!("{designator} : Holiday")
                } else {
                    designator
                }
            } else {
                format!("{designator} | {joined}")
            }
        }
        _ => joined,
    }
}
