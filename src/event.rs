use crate::calendar::CalendarError;
use crate::entry::AppliedEvent;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category tag attached to every catalog entry at construction. Custom
/// events entered through the "Other" option are always `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    Academic,
    Cultural,
    Other,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Academic => "academic",
            EventCategory::Cultural => "cultural",
            EventCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub label: &'static str,
    pub category: EventCategory,
    /// Designated holiday events force holiday treatment in the report even
    /// when the holiday toggle was not set on submission.
    pub holiday_event: bool,
}

pub const EVENT_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        label: "Enrolment and commencement of classes for all UG and PG / commencement",
        category: EventCategory::Academic,
        holiday_event: false,
    },
    CatalogEntry {
        label: "Enrolment and commencement of classes for all UG-S1,PG-S1 / commencement",
        category: EventCategory::Academic,
        holiday_event: false,
    },
    CatalogEntry {
        label: "Finalisation of electives",
        category: EventCategory::Academic,
        holiday_event: false,
    },
    CatalogEntry {
        label: "First Class committee meeting",
        category: EventCategory::Academic,
        holiday_event: false,
    },
    CatalogEntry {
        label: "Commencement of Mid-Semester Exam",
        category: EventCategory::Academic,
        holiday_event: false,
    },
    CatalogEntry {
        label: "Completion of quizzes, midsem and attendance entry in AUMS",
        category: EventCategory::Academic,
        holiday_event: false,
    },
    CatalogEntry {
        label: "Second class committee",
        category: EventCategory::Academic,
        holiday_event: false,
    },
    CatalogEntry {
        label: "Missed mid semester exam",
        category: EventCategory::Academic,
        holiday_event: false,
    },
    CatalogEntry {
        label: "Pre-registration for next sem, course end survey, faculty feedback",
        category: EventCategory::Academic,
        holiday_event: false,
    },
    CatalogEntry {
        label: "Finalisation of internals and attendance",
        category: EventCategory::Academic,
        holiday_event: false,
    },
    CatalogEntry {
        label: "Last instruction day",
        category: EventCategory::Academic,
        holiday_event: false,
    },
    CatalogEntry {
        label: "Commencement of end-semester exams",
        category: EventCategory::Academic,
        holiday_event: false,
    },
    CatalogEntry {
        label: "Sree Krishna Janmashtami",
        category: EventCategory::Cultural,
        holiday_event: true,
    },
    CatalogEntry {
        label: "Ganesh Chaturthi",
        category: EventCategory::Cultural,
        holiday_event: true,
    },
    CatalogEntry {
        label: "Deepavali",
        category: EventCategory::Cultural,
        holiday_event: true,
    },
];

pub fn find_catalog_entry(label: &str) -> Option<&'static CatalogEntry> {
    EVENT_CATALOG.iter().find(|entry| entry.label == label)
}

/// Target scope of a form submission: one date or an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventScope {
    Single(NaiveDate),
    Span { start: NaiveDate, end: NaiveDate },
}

/// Resolves a submitted event name into an applied event. Catalog names keep
/// their category and designated-holiday tag; anything else is a custom
/// "Other" event. The holiday toggle appends " (Holiday)" to the label.
pub fn resolve_event(name: &str, holiday: bool) -> Result<AppliedEvent, CalendarError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CalendarError::EmptyEventName);
    }
    let (category, designated_holiday) = match find_catalog_entry(trimmed) {
        Some(entry) => (entry.category, entry.holiday_event),
        None => (EventCategory::Other, false),
    };
    let label = if holiday {
        format!("{trimmed} (Holiday)")
    } else {
        trimmed.to_string()
    };
    Ok(AppliedEvent {
        label,
        category,
        holiday,
        designated_holiday,
    })
}
