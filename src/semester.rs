use crate::calendar::CalendarError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The six named semester windows, in their canonical report order.
pub const SEMESTER_NAMES: [&str; 6] = ["UG-S1", "UG-S3", "UG-S5", "UG-S7", "PG-S1", "PG-S3"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterWindow {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SemesterWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The configured semester windows, kept in canonical order. Saved and loaded
/// as a JSON config file by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterSet {
    windows: Vec<SemesterWindow>,
}

impl SemesterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(
        &mut self,
        name: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(), CalendarError> {
        let canonical = SEMESTER_NAMES
            .iter()
            .position(|candidate| *candidate == name)
            .ok_or_else(|| CalendarError::UnknownSemester(name.to_string()))?;
        if end < start {
            return Err(CalendarError::StartAfterEnd { start, end });
        }
        let window = SemesterWindow {
            name: SEMESTER_NAMES[canonical].to_string(),
            start,
            end,
        };
        if let Some(existing) = self.windows.iter_mut().find(|w| w.name == name) {
            *existing = window;
        } else {
            self.windows.push(window);
            self.windows
                .sort_by_key(|w| SEMESTER_NAMES.iter().position(|n| *n == w.name));
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&SemesterWindow> {
        self.windows.iter().find(|w| w.name == name)
    }

    pub fn windows(&self) -> &[SemesterWindow] {
        &self.windows
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Windows sharing a start date report under one merged column. The
    /// group's end is the latest member end; groups are ordered by start.
    pub fn groups(&self) -> Vec<SemesterGroup> {
        let mut groups: Vec<SemesterGroup> = Vec::new();
        for window in &self.windows {
            if let Some(group) = groups.iter_mut().find(|g| g.start == window.start) {
                group.names.push(window.name.clone());
                if window.end > group.end {
                    group.end = window.end;
                }
            } else {
                groups.push(SemesterGroup {
                    names: vec![window.name.clone()],
                    start: window.start,
                    end: window.end,
                });
            }
        }
        groups.sort_by_key(|g| g.start);
        groups
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterGroup {
    pub names: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SemesterGroup {
    pub fn header(&self) -> String {
        self.names.join(" & ")
    }
}
