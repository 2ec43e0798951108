//! Spreadsheet report generation: a pure planning pass over the calendar
//! state followed by a rendering pass onto a styled worksheet.

use crate::calendar::AcademicCalendar;
use crate::entry::DayEntry;
use crate::event::EventCategory;
use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, XlsxError};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

const HEADER_FILL: u32 = 0x4F6228;
const HOLIDAY_FILL: u32 = 0xED7D31;
const ACADEMIC_FILL: u32 = 0xDDEBF7;
const CULTURAL_FILL: u32 = 0xE4D7F1;
const SECTION_FILL: u32 = 0xD9D9D9;

const COLUMN_WIDTH: f64 = 15.0;
const EVENTS_COLUMN_WIDTH: f64 = 40.0;

/// First worksheet row of the planned report rows (after title, subtitle,
/// header, and one spacer row).
const DATA_START_ROW: u32 = 4;

#[derive(Debug)]
pub enum ExportError {
    EmptyCalendar,
    Xlsx(XlsxError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::EmptyCalendar => write!(f, "no calendar range has been generated"),
            ExportError::Xlsx(err) => write!(f, "workbook error: {err}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<XlsxError> for ExportError {
    fn from(value: XlsxError) -> Self {
        Self::Xlsx(value)
    }
}

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFill {
    None,
    Holiday,
    Academic,
    Cultural,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRow {
    pub date: NaiveDate,
    pub date_text: String,
    pub day_text: String,
    pub working: bool,
    pub fill: RowFill,
    /// One cell per semester group: the running count text, when the date is
    /// a working day inside at least one member window.
    pub group_cells: Vec<Option<String>>,
    pub events_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRow {
    MonthDivider(String),
    Date(DateRow),
}

/// A contiguous run of identical events-column text, merged into one cell.
/// Indices are report-row positions (dividers included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSpan {
    pub first: usize,
    pub last: usize,
    pub text: String,
    pub fill: RowFill,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPlan {
    pub title: String,
    pub subtitle: String,
    pub headers: Vec<String>,
    pub rows: Vec<ReportRow>,
    pub event_merges: Vec<MergeSpan>,
    /// Weekday breakdown rows: ("Monday: 4 days", "02/09/24, 09/09/24, ...").
    pub breakdown: Vec<(String, String)>,
    /// Final per-semester counts, keyed by the semester's own non-merged
    /// column position (Date and Day occupy columns 0 and 1).
    pub totals: Vec<(u16, u32)>,
}

impl ReportPlan {
    pub fn column_count(&self) -> u16 {
        self.headers.len() as u16
    }

    pub fn events_column(&self) -> u16 {
        self.column_count() - 1
    }
}

fn row_fill(entry: &DayEntry, working: bool) -> RowFill {
    let events = entry.events();
    if events.iter().any(|e| e.category == EventCategory::Academic) {
        RowFill::Academic
    } else if events.iter().any(|e| e.category == EventCategory::Cultural) {
        RowFill::Cultural
    } else if !working {
        RowFill::Holiday
    } else {
        RowFill::None
    }
}

fn close_run(
    merges: &mut Vec<MergeSpan>,
    open_run: &mut Option<(usize, String, RowFill)>,
    next_index: usize,
) {
    if let Some((first, text, fill)) = open_run.take() {
        let last = next_index - 1;
        if last > first {
            merges.push(MergeSpan {
                first,
                last,
                text,
                fill,
            });
        }
    }
}

/// Walks the generated range once and produces the full report layout:
/// month-divided date rows with fills and running semester counts, the
/// events-column merge spans, and the trailing summary sections.
pub fn plan_report(calendar: &AcademicCalendar) -> ExportResult<ReportPlan> {
    if !calendar.is_generated() {
        return Err(ExportError::EmptyCalendar);
    }

    let groups = calendar.semesters().groups();
    let windows = calendar.semesters().windows();

    let mut headers = vec!["Date".to_string(), "Day".to_string()];
    headers.extend(groups.iter().map(|group| group.header()));
    headers.push("Events/Holidays".to_string());

    let mut counts: HashMap<String, u32> =
        windows.iter().map(|w| (w.name.clone(), 0)).collect();
    let mut rows: Vec<ReportRow> = Vec::new();
    let mut merges: Vec<MergeSpan> = Vec::new();
    let mut open_run: Option<(usize, String, RowFill)> = None;
    let mut current_month: Option<(i32, u32)> = None;

    for date in calendar.dates() {
        let Some(entry) = calendar.entry(date) else {
            continue;
        };

        let month_key = (date.year(), date.month());
        if current_month != Some(month_key) {
            // A merge cannot straddle the divider's own merged row.
            close_run(&mut merges, &mut open_run, rows.len());
            current_month = Some(month_key);
            rows.push(ReportRow::MonthDivider(date.format("%B - %Y").to_string()));
        }

        let working = AcademicCalendar::working_day(date, entry);
        let events_text = calendar.label(date);
        let fill = row_fill(entry, working);

        if working {
            for window in windows {
                if window.contains(date) {
                    if let Some(count) = counts.get_mut(&window.name) {
                        *count += 1;
                    }
                }
            }
        }

        let group_cells: Vec<Option<String>> = groups
            .iter()
            .map(|group| {
                if !working {
                    return None;
                }
                let active: Vec<u32> = group
                    .names
                    .iter()
                    .filter(|name| {
                        windows
                            .iter()
                            .find(|w| &w.name == *name)
                            .is_some_and(|w| w.contains(date))
                    })
                    .map(|name| counts.get(name).copied().unwrap_or(0))
                    .collect();
                if active.is_empty() {
                    None
                } else if active.iter().all(|count| *count == active[0]) {
                    Some(active[0].to_string())
                } else {
                    Some(
                        active
                            .iter()
                            .map(u32::to_string)
                            .collect::<Vec<_>>()
                            .join("/"),
                    )
                }
            })
            .collect();

        let row_index = rows.len();
        let extends = matches!(
            &open_run,
            Some((_, text, _)) if *text == events_text && !events_text.is_empty()
        );
        if !extends {
            close_run(&mut merges, &mut open_run, row_index);
            if !events_text.is_empty() {
                open_run = Some((row_index, events_text.clone(), fill));
            }
        }

        rows.push(ReportRow::Date(DateRow {
            date,
            date_text: date.format("%d-%b").to_string(),
            day_text: date.format("%a").to_string(),
            working,
            fill,
            group_cells,
            events_text,
        }));
    }
    close_run(&mut merges, &mut open_run, rows.len());

    let breakdown = calendar
        .working_days_by_weekday()
        .iter()
        .map(|group| {
            let dates = group
                .dates
                .iter()
                .map(|date| date.format("%d/%m/%y").to_string())
                .collect::<Vec<_>>()
                .join(", ");
            (format!("{}: {} days", group.name, group.count()), dates)
        })
        .collect();

    let totals = windows
        .iter()
        .enumerate()
        .map(|(index, window)| {
            (
                index as u16 + 2,
                counts.get(&window.name).copied().unwrap_or(0),
            )
        })
        .collect();

    Ok(ReportPlan {
        title: calendar.metadata().title.clone(),
        subtitle: calendar.metadata().subtitle.clone(),
        headers,
        rows,
        event_merges: merges,
        breakdown,
        totals,
    })
}

struct ReportFormats {
    title: Format,
    subtitle: Format,
    header: Format,
    month: Format,
    cell: Format,
    cell_holiday: Format,
    cell_academic: Format,
    cell_cultural: Format,
    events: Format,
    events_holiday: Format,
    events_academic: Format,
    events_cultural: Format,
    section_title: Format,
    breakdown_name: Format,
    breakdown_dates: Format,
    total: Format,
}

impl ReportFormats {
    fn new() -> Self {
        let cell = Format::new()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Center);
        let events = Format::new()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Left)
            .set_text_wrap();
        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(14)
                .set_align(FormatAlign::Center),
            subtitle: Format::new()
                .set_bold()
                .set_font_size(12)
                .set_align(FormatAlign::Center),
            header: Format::new()
                .set_bold()
                .set_font_color(0xFFFFFF)
                .set_background_color(HEADER_FILL)
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap(),
            month: Format::new()
                .set_bold()
                .set_background_color(HOLIDAY_FILL)
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            cell_holiday: cell.clone().set_background_color(HOLIDAY_FILL),
            cell_academic: cell.clone().set_background_color(ACADEMIC_FILL),
            cell_cultural: cell.clone().set_background_color(CULTURAL_FILL),
            events_holiday: events.clone().set_background_color(HOLIDAY_FILL),
            events_academic: events.clone().set_background_color(ACADEMIC_FILL),
            events_cultural: events.clone().set_background_color(CULTURAL_FILL),
            section_title: Format::new()
                .set_bold()
                .set_font_size(12)
                .set_background_color(SECTION_FILL)
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center),
            breakdown_name: Format::new().set_bold().set_border(FormatBorder::Thin),
            breakdown_dates: Format::new()
                .set_border(FormatBorder::Thin)
                .set_text_wrap(),
            total: Format::new()
                .set_bold()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center),
            cell,
            events,
        }
    }

    fn cell_for(&self, fill: RowFill) -> &Format {
        match fill {
            RowFill::None => &self.cell,
            RowFill::Holiday => &self.cell_holiday,
            RowFill::Academic => &self.cell_academic,
            RowFill::Cultural => &self.cell_cultural,
        }
    }

    fn events_for(&self, fill: RowFill) -> &Format {
        match fill {
            RowFill::None => &self.events,
            RowFill::Holiday => &self.events_holiday,
            RowFill::Academic => &self.events_academic,
            RowFill::Cultural => &self.events_cultural,
        }
    }
}

fn render_plan(plan: &ReportPlan) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let formats = ReportFormats::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Calendar")?;

    let last_col = plan.events_column();
    for col in 0..last_col {
        worksheet.set_column_width(col, COLUMN_WIDTH)?;
    }
    worksheet.set_column_width(last_col, EVENTS_COLUMN_WIDTH)?;

    worksheet.merge_range(0, 0, 0, last_col, &plan.title, &formats.title)?;
    worksheet.merge_range(1, 0, 1, last_col, &plan.subtitle, &formats.subtitle)?;
    for (col, header) in plan.headers.iter().enumerate() {
        worksheet.write_with_format(2, col as u16, header, &formats.header)?;
    }

    let merged_rows: HashSet<usize> = plan
        .event_merges
        .iter()
        .flat_map(|span| span.first..=span.last)
        .collect();

    for (index, row) in plan.rows.iter().enumerate() {
        let sheet_row = DATA_START_ROW + index as u32;
        match row {
            ReportRow::MonthDivider(text) => {
                worksheet.merge_range(sheet_row, 0, sheet_row, last_col, text, &formats.month)?;
            }
            ReportRow::Date(date_row) => {
                let cell = formats.cell_for(date_row.fill);
                worksheet.write_with_format(sheet_row, 0, &date_row.date_text, cell)?;
                worksheet.write_with_format(sheet_row, 1, &date_row.day_text, cell)?;
                for (group, value) in date_row.group_cells.iter().enumerate() {
                    let col = 2 + group as u16;
                    match value {
                        Some(text) => {
                            worksheet.write_with_format(sheet_row, col, text, cell)?;
                        }
                        None => {
                            worksheet.write_blank(sheet_row, col, cell)?;
                        }
                    }
                }
                if !merged_rows.contains(&index) {
                    let events = formats.events_for(date_row.fill);
                    if date_row.events_text.is_empty() {
                        worksheet.write_blank(sheet_row, last_col, events)?;
                    } else {
                        worksheet.write_with_format(
                            sheet_row,
                            last_col,
                            &date_row.events_text,
                            events,
                        )?;
                    }
                }
            }
        }
    }

    for span in &plan.event_merges {
        worksheet.merge_range(
            DATA_START_ROW + span.first as u32,
            last_col,
            DATA_START_ROW + span.last as u32,
            last_col,
            &span.text,
            formats.events_for(span.fill),
        )?;
    }

    let mut row = DATA_START_ROW + plan.rows.len() as u32 + 1;
    worksheet.merge_range(
        row,
        0,
        row,
        last_col,
        "Working Days Breakdown by Weekday",
        &formats.section_title,
    )?;
    row += 1;
    for (name_text, dates_text) in &plan.breakdown {
        worksheet.write_with_format(row, 0, name_text, &formats.breakdown_name)?;
        worksheet.write_with_format(row, 1, dates_text, &formats.breakdown_dates)?;
        row += 1;
    }

    row += 1;
    worksheet.merge_range(row, 0, row, 1, "Total Working Days", &formats.total)?;
    for (col, count) in &plan.totals {
        worksheet.write_with_format(row, *col, *count, &formats.total)?;
    }

    Ok(workbook)
}

/// Plans and writes the report to `path`. In-memory state is untouched on
/// failure; the target file is only replaced by a successful save.
pub fn write_report<P: AsRef<Path>>(calendar: &AcademicCalendar, path: P) -> ExportResult<()> {
    let plan = plan_report(calendar)?;
    let mut workbook = render_plan(&plan)?;
    workbook.save(path)?;
    Ok(())
}

/// Plans and renders the report to an in-memory xlsx buffer.
pub fn write_report_to_buffer(calendar: &AcademicCalendar) -> ExportResult<Vec<u8>> {
    let plan = plan_report(calendar)?;
    let mut workbook = render_plan(&plan)?;
    Ok(workbook.save_to_buffer()?)
}
