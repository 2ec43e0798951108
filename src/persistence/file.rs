use super::{PersistenceError, PersistenceResult};
use crate::calendar::{AcademicCalendar, DateRange};
use crate::entry::AppliedEvent;
use crate::metadata::CalendarMetadata;
use crate::semester::SemesterSet;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct DayRecord {
    date: NaiveDate,
    events: Vec<AppliedEvent>,
}

#[derive(Serialize, Deserialize)]
struct CalendarSnapshot {
    metadata: CalendarMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    range: Option<DateRange>,
    #[serde(default)]
    semesters: SemesterSet,
    days: Vec<DayRecord>,
}

impl CalendarSnapshot {
    fn from_calendar(calendar: &AcademicCalendar) -> Self {
        let days = calendar
            .dates()
            .filter_map(|date| {
                let entry = calendar.entry(date)?;
                if entry.is_empty() {
                    return None;
                }
                Some(DayRecord {
                    date,
                    events: entry.events().to_vec(),
                })
            })
            .collect();
        Self {
            metadata: calendar.metadata().clone(),
            range: calendar.range(),
            semesters: calendar.semesters().clone(),
            days,
        }
    }

    fn into_calendar(self) -> PersistenceResult<AcademicCalendar> {
        let mut calendar = AcademicCalendar::with_metadata(self.metadata);
        calendar.set_semesters(self.semesters);
        if let Some(range) = self.range {
            calendar
                .generate(range.start, range.end)
                .map_err(|err| PersistenceError::InvalidData(err.to_string()))?;
        }
        for day in self.days {
            calendar
                .restore(day.date, day.events)
                .map_err(|err| PersistenceError::InvalidData(err.to_string()))?;
        }
        Ok(calendar)
    }
}

pub fn save_calendar_to_json<P: AsRef<Path>>(
    calendar: &AcademicCalendar,
    path: P,
) -> PersistenceResult<()> {
    let snapshot = CalendarSnapshot::from_calendar(calendar);
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_calendar_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<AcademicCalendar> {
    let file = File::open(path)?;
    let snapshot: CalendarSnapshot = serde_json::from_reader(file)?;
    snapshot.into_calendar()
}

#[derive(Default, Serialize, Deserialize)]
struct DayCsvRecord {
    date: String,
    day: String,
    label: String,
    events_json: String,
    #[serde(default)]
    metadata_json: String,
    #[serde(default)]
    range_json: String,
    #[serde(default)]
    semesters_json: String,
}

impl DayCsvRecord {
    fn metadata_row(calendar: &AcademicCalendar) -> PersistenceResult<Self> {
        let mut record = DayCsvRecord::default();
        record.date = "__metadata__".to_string();
        record.metadata_json = serde_json::to_string(calendar.metadata())?;
        record.range_json = serde_json::to_string(&calendar.range())?;
        record.semesters_json = serde_json::to_string(calendar.semesters())?;
        Ok(record)
    }

    fn is_metadata_row(&self) -> bool {
        !self.metadata_json.trim().is_empty()
    }
}

pub fn save_calendar_to_csv<P: AsRef<Path>>(
    calendar: &AcademicCalendar,
    path: P,
) -> PersistenceResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.serialize(DayCsvRecord::metadata_row(calendar)?)?;
    for date in calendar.dates() {
        let Some(entry) = calendar.entry(date) else {
            continue;
        };
        if entry.is_empty() {
            continue;
        }
        let record = DayCsvRecord {
            date: date.format("%Y-%m-%d").to_string(),
            day: date.format("%A").to_string(),
            label: calendar.label(date),
            events_json: serde_json::to_string(entry.events())?,
            ..DayCsvRecord::default()
        };
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_calendar_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<AcademicCalendar> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut metadata: Option<CalendarMetadata> = None;
    let mut range: Option<DateRange> = None;
    let mut semesters = SemesterSet::new();
    let mut days: Vec<DayRecord> = Vec::new();

    for result in reader.deserialize() {
        let record: DayCsvRecord = result?;
        if record.is_metadata_row() {
            metadata = Some(serde_json::from_str(&record.metadata_json)?);
            range = serde_json::from_str(&record.range_json)?;
            semesters = serde_json::from_str(&record.semesters_json)?;
            continue;
        }
        let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d")
            .map_err(|err| PersistenceError::InvalidData(format!("invalid date '{}': {err}", record.date)))?;
        let events: Vec<AppliedEvent> = serde_json::from_str(&record.events_json)
            .map_err(|err| PersistenceError::InvalidData(format!("invalid events for {date}: {err}")))?;
        days.push(DayRecord { date, events });
    }

    let snapshot = CalendarSnapshot {
        metadata: metadata.ok_or_else(|| {
            PersistenceError::InvalidData("missing metadata row".to_string())
        })?,
        range,
        semesters,
        days,
    };
    snapshot.into_calendar()
}
