pub mod calendar;
pub mod display;
pub mod entry;
pub mod event;
pub mod export;
pub mod metadata;
pub mod persistence;
pub mod semester;

pub use calendar::{AcademicCalendar, CalendarError, DateRange, WEEKDAY_GROUPS, WeekdayGroup};
pub use display::{WRAP_WIDTH, events_by_date, selected_events, working_days_summary, wrap_label};
pub use entry::{AppliedEvent, DayEntry, ordinal_suffix, render_label, saturday_ordinal};
pub use event::{
    CatalogEntry, EVENT_CATALOG, EventCategory, EventScope, find_catalog_entry, resolve_event,
};
pub use export::{
    ExportError, MergeSpan, ReportPlan, ReportRow, RowFill, plan_report, write_report,
    write_report_to_buffer,
};
pub use metadata::CalendarMetadata;
pub use persistence::{
    PersistenceError, load_calendar_from_csv, load_calendar_from_json, save_calendar_to_csv,
    save_calendar_to_json,
};
pub use semester::{SEMESTER_NAMES, SemesterGroup, SemesterSet, SemesterWindow};
