use crate::entry::{AppliedEvent, DayEntry, render_label, saturday_ordinal};
use crate::event::{EventScope, resolve_event};
use crate::metadata::CalendarMetadata;
use crate::semester::SemesterSet;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
    DateOutOfRange { date: NaiveDate },
    EmptyEventName,
    NothingToUndo,
    UnknownSemester(String),
}

impl fmt::Display for CalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarError::StartAfterEnd { start, end } => {
                write!(f, "start date {start} must be on or before end date {end}")
            }
            CalendarError::DateOutOfRange { date } => {
                write!(f, "date {date} is outside the generated calendar range")
            }
            CalendarError::EmptyEventName => write!(f, "custom event name must not be empty"),
            CalendarError::NothingToUndo => write!(f, "no events to clear"),
            CalendarError::UnknownSemester(name) => write!(f, "unknown semester '{name}'"),
        }
    }
}

impl std::error::Error for CalendarError {}

pub const WEEKDAY_GROUPS: [(Weekday, &str); 6] = [
    (Weekday::Mon, "Monday"),
    (Weekday::Tue, "Tuesday"),
    (Weekday::Wed, "Wednesday"),
    (Weekday::Thu, "Thursday"),
    (Weekday::Fri, "Friday"),
    (Weekday::Sat, "Saturday"),
];

/// One weekday's working-day group: the qualifying dates in calendar order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayGroup {
    pub weekday: Weekday,
    pub name: &'static str,
    pub dates: Vec<NaiveDate>,
}

impl WeekdayGroup {
    pub fn count(&self) -> usize {
        self.dates.len()
    }
}

/// The application state: generated date range, per-date annotations, the
/// undo stack, report metadata, and the semester windows. All mutation goes
/// through methods here; the display panels and the exporter are pure reads.
#[derive(Debug, Clone)]
pub struct AcademicCalendar {
    metadata: CalendarMetadata,
    semesters: SemesterSet,
    range: Option<DateRange>,
    entries: BTreeMap<NaiveDate, DayEntry>,
    applied: Vec<NaiveDate>,
}

impl Default for AcademicCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl AcademicCalendar {
    pub fn new() -> Self {
        Self::with_metadata(CalendarMetadata::default())
    }

    pub fn with_metadata(metadata: CalendarMetadata) -> Self {
        Self {
            metadata,
            semesters: SemesterSet::new(),
            range: None,
            entries: BTreeMap::new(),
            applied: Vec::new(),
        }
    }

    pub fn metadata(&self) -> &CalendarMetadata {
        &self.metadata
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.metadata.title = title.into();
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) {
        self.metadata.subtitle = subtitle.into();
    }

    pub fn semesters(&self) -> &SemesterSet {
        &self.semesters
    }

    pub fn set_semester(
        &mut self,
        name: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(), CalendarError> {
        self.semesters.set(name, start, end)
    }

    pub fn set_semesters(&mut self, semesters: SemesterSet) {
        self.semesters = semesters;
    }

    pub fn range(&self) -> Option<DateRange> {
        self.range
    }

    pub fn is_generated(&self) -> bool {
        self.range.is_some()
    }

    /// Replaces the annotation store with a fresh empty entry per date from
    /// start to end inclusive and clears the undo stack. Returns the number
    /// of generated dates.
    pub fn generate(&mut self, start: NaiveDate, end: NaiveDate) -> Result<usize, CalendarError> {
        if end < start {
            return Err(CalendarError::StartAfterEnd { start, end });
        }
        let mut entries = BTreeMap::new();
        let mut current = start;
        while current <= end {
            entries.insert(current, DayEntry::default());
            current = current + Duration::days(1);
        }
        let count = entries.len();
        self.range = Some(DateRange { start, end });
        self.entries = entries;
        self.applied.clear();
        Ok(count)
    }

    /// Resets the generated range, annotations, and undo stack. Metadata and
    /// semester windows are kept.
    pub fn clear(&mut self) {
        self.range = None;
        self.entries.clear();
        self.applied.clear();
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.entries.keys().copied()
    }

    pub fn entry(&self, date: NaiveDate) -> Option<&DayEntry> {
        self.entries.get(&date)
    }

    /// Rendered schedule label for a date; empty for dates outside the range.
    pub fn label(&self, date: NaiveDate) -> String {
        self.entries
            .get(&date)
            .map(|entry| render_label(date, entry))
            .unwrap_or_default()
    }

    /// Applies one event to one date and records it on the undo stack.
    pub fn apply(&mut self, date: NaiveDate, event: AppliedEvent) -> Result<(), CalendarError> {
        let entry = self
            .entries
            .get_mut(&date)
            .ok_or(CalendarError::DateOutOfRange { date })?;
        entry.apply(event);
        self.applied.push(date);
        Ok(())
    }

    /// Entry-form submission: resolves the event name, validates the scope,
    /// and applies to every in-range date in scope. Range scopes silently
    /// skip dates outside the generated calendar; a single out-of-range date
    /// is an error. Returns the number of dates touched.
    pub fn submit(
        &mut self,
        name: &str,
        scope: EventScope,
        holiday: bool,
    ) -> Result<usize, CalendarError> {
        let event = resolve_event(name, holiday)?;
        match scope {
            EventScope::Single(date) => {
                self.apply(date, event)?;
                Ok(1)
            }
            EventScope::Span { start, end } => {
                if end < start {
                    return Err(CalendarError::StartAfterEnd { start, end });
                }
                let mut touched = 0;
                let mut current = start;
                while current <= end {
                    if self.entries.contains_key(&current) {
                        self.apply(current, event.clone())?;
                        touched += 1;
                    }
                    current = current + Duration::days(1);
                }
                Ok(touched)
            }
        }
    }

    /// Pops the most recent application and blanks that date's entry.
    pub fn undo(&mut self) -> Result<NaiveDate, CalendarError> {
        let date = self.applied.pop().ok_or(CalendarError::NothingToUndo)?;
        if let Some(entry) = self.entries.get_mut(&date) {
            entry.clear();
        }
        Ok(date)
    }

    /// The shared working-day predicate used by the classifier, the display
    /// panels, and the exporter. Sundays never qualify; holiday-flagged or
    /// designated-holiday events disqualify any day; an even-ordinal Saturday
    /// with no events is a default holiday.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        match self.entries.get(&date) {
            Some(entry) => Self::working_day(date, entry),
            None => false,
        }
    }

    pub(crate) fn working_day(date: NaiveDate, entry: &DayEntry) -> bool {
        match date.weekday() {
            Weekday::Sun => false,
            Weekday::Sat => {
                !entry.marks_holiday() && !(entry.is_empty() && saturday_ordinal(date) % 2 == 0)
            }
            _ => !entry.marks_holiday(),
        }
    }

    /// Working days grouped per weekday name, Monday through Saturday.
    /// Recomputed from scratch on every call.
    pub fn working_days_by_weekday(&self) -> Vec<WeekdayGroup> {
        let mut groups: Vec<WeekdayGroup> = WEEKDAY_GROUPS
            .iter()
            .map(|(weekday, name)| WeekdayGroup {
                weekday: *weekday,
                name,
                dates: Vec::new(),
            })
            .collect();
        for (date, entry) in &self.entries {
            if !Self::working_day(*date, entry) {
                continue;
            }
            if let Some(group) = groups.iter_mut().find(|g| g.weekday == date.weekday()) {
                group.dates.push(*date);
            }
        }
        groups
    }

    pub(crate) fn restore(
        &mut self,
        date: NaiveDate,
        events: Vec<AppliedEvent>,
    ) -> Result<(), CalendarError> {
        let entry = self
            .entries
            .get_mut(&date)
            .ok_or(CalendarError::DateOutOfRange { date })?;
        *entry = DayEntry::from_events(events);
        Ok(())
    }
}
