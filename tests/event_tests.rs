use calendar_tool::{
    AcademicCalendar, CalendarError, EventCategory, EventScope, find_catalog_entry, wrap_label,
};
use chrono::NaiveDate;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn september_2024() -> AcademicCalendar {
    let mut calendar = AcademicCalendar::new();
    calendar
        .generate(date(2024, 9, 1), date(2024, 9, 30))
        .unwrap();
    calendar
}

#[test]
fn holiday_event_on_weekday_excludes_it_from_classifier() {
    let mut calendar = september_2024();
    // 2024-09-03 is a Tuesday.
    calendar
        .submit("Ganesh Chaturthi", EventScope::Single(date(2024, 9, 3)), true)
        .unwrap();
    assert_eq!(
        calendar.label(date(2024, 9, 3)),
        "Ganesh Chaturthi (Holiday)"
    );
    assert!(!calendar.is_working_day(date(2024, 9, 3)));
    let groups = calendar.working_days_by_weekday();
    let tuesdays = groups.iter().find(|g| g.name == "Tuesday").unwrap();
    assert!(!tuesdays.dates.contains(&date(2024, 9, 3)));
}

#[test]
fn second_holiday_overwrites_first() {
    let mut calendar = september_2024();
    let tue = date(2024, 9, 3);
    calendar
        .submit("Ganesh Chaturthi", EventScope::Single(tue), true)
        .unwrap();
    calendar
        .submit("Deepavali", EventScope::Single(tue), true)
        .unwrap();
    assert_eq!(calendar.label(tue), "Deepavali (Holiday)");
}

#[test]
fn non_holiday_events_append_in_application_order() {
    let mut calendar = september_2024();
    let tue = date(2024, 9, 3);
    calendar
        .submit("First Class committee meeting", EventScope::Single(tue), false)
        .unwrap();
    calendar
        .submit("Finalisation of electives", EventScope::Single(tue), false)
        .unwrap();
    assert_eq!(
        calendar.label(tue),
        "First Class committee meeting | Finalisation of electives"
    );
    assert!(calendar.is_working_day(tue));
}

#[test]
fn non_holiday_after_holiday_appends_to_the_overwrite() {
    let mut calendar = september_2024();
    let tue = date(2024, 9, 3);
    calendar
        .submit("Deepavali", EventScope::Single(tue), true)
        .unwrap();
    calendar
        .submit("Second class committee", EventScope::Single(tue), false)
        .unwrap();
    assert_eq!(
        calendar.label(tue),
        "Deepavali (Holiday) | Second class committee"
    );
    assert!(!calendar.is_working_day(tue));
}

#[test]
fn empty_custom_name_is_rejected_without_state_change() {
    let mut calendar = september_2024();
    let err = calendar
        .submit("   ", EventScope::Single(date(2024, 9, 3)), false)
        .unwrap_err();
    assert_eq!(err, CalendarError::EmptyEventName);
    assert_eq!(calendar.label(date(2024, 9, 3)), "");
}

#[test]
fn reversed_span_is_rejected_without_state_change() {
    let mut calendar = september_2024();
    let err = calendar
        .submit(
            "Last instruction day",
            EventScope::Span {
                start: date(2024, 9, 10),
                end: date(2024, 9, 5),
            },
            false,
        )
        .unwrap_err();
    assert!(matches!(err, CalendarError::StartAfterEnd { .. }));
    assert!(calendar.dates().all(|d| {
        let label = calendar.label(d);
        !label.contains("Last instruction day")
    }));
}

#[test]
fn single_date_outside_range_is_rejected() {
    let mut calendar = september_2024();
    let err = calendar
        .submit("Deepavali", EventScope::Single(date(2024, 10, 15)), false)
        .unwrap_err();
    assert!(matches!(err, CalendarError::DateOutOfRange { .. }));
}

#[test]
fn span_silently_skips_dates_outside_the_generated_range() {
    let mut calendar = september_2024();
    let touched = calendar
        .submit(
            "Commencement of end-semester exams",
            EventScope::Span {
                start: date(2024, 9, 28),
                end: date(2024, 10, 5),
            },
            false,
        )
        .unwrap();
    assert_eq!(touched, 3);
    assert!(calendar
        .label(date(2024, 9, 30))
        .contains("Commencement of end-semester exams"));
}

#[test]
fn saturday_keeps_ordinal_designator_for_non_holiday_events() {
    let mut calendar = september_2024();
    calendar
        .submit(
            "Missed mid semester exam",
            EventScope::Single(date(2024, 9, 7)),
            false,
        )
        .unwrap();
    assert_eq!(
        calendar.label(date(2024, 9, 7)),
        "1st Saturday | Missed mid semester exam"
    );
}

#[test]
fn saturday_holiday_event_drops_the_ordinal_designator() {
    let mut calendar = september_2024();
    calendar
        .submit("Deepavali", EventScope::Single(date(2024, 9, 14)), true)
        .unwrap();
    assert_eq!(calendar.label(date(2024, 9, 14)), "Deepavali (Holiday)");
    assert!(!calendar.is_working_day(date(2024, 9, 14)));
}

#[test]
fn even_saturday_with_explicit_event_becomes_working() {
    let mut calendar = september_2024();
    calendar
        .submit(
            "Second class committee",
            EventScope::Single(date(2024, 9, 14)),
            false,
        )
        .unwrap();
    assert!(calendar.is_working_day(date(2024, 9, 14)));
    assert_eq!(
        calendar.label(date(2024, 9, 14)),
        "2nd Saturday | Second class committee"
    );
}

#[test]
fn designated_holiday_event_excludes_without_the_toggle() {
    let mut calendar = september_2024();
    let fri = date(2024, 9, 6);
    calendar
        .submit("Deepavali", EventScope::Single(fri), false)
        .unwrap();
    assert_eq!(calendar.label(fri), "Deepavali");
    assert!(!calendar.is_working_day(fri));
}

#[test]
fn custom_events_resolve_to_the_other_category() {
    let mut calendar = september_2024();
    calendar
        .submit("Alumni meet", EventScope::Single(date(2024, 9, 4)), false)
        .unwrap();
    let entry = calendar.entry(date(2024, 9, 4)).unwrap();
    assert_eq!(entry.events()[0].category, EventCategory::Other);
    assert!(find_catalog_entry("Alumni meet").is_none());
    assert!(find_catalog_entry("Deepavali").is_some());
}

#[test]
fn undo_restores_the_date_and_the_classifier() {
    let mut calendar = september_2024();
    let tue = date(2024, 9, 3);
    calendar
        .submit("Ganesh Chaturthi", EventScope::Single(tue), true)
        .unwrap();
    assert!(!calendar.is_working_day(tue));
    let undone = calendar.undo().unwrap();
    assert_eq!(undone, tue);
    assert_eq!(calendar.label(tue), "");
    assert!(calendar.is_working_day(tue));
    let groups = calendar.working_days_by_weekday();
    let tuesdays = groups.iter().find(|g| g.name == "Tuesday").unwrap();
    assert!(tuesdays.dates.contains(&tue));
}

#[test]
fn undo_with_no_events_is_an_error() {
    let mut calendar = september_2024();
    assert!(matches!(
        calendar.undo(),
        Err(CalendarError::NothingToUndo)
    ));
}

#[test]
fn undo_blanks_the_whole_entry_even_with_multiple_events() {
    let mut calendar = september_2024();
    let wed = date(2024, 9, 4);
    calendar
        .submit("Finalisation of electives", EventScope::Single(wed), false)
        .unwrap();
    calendar
        .submit("Second class committee", EventScope::Single(wed), false)
        .unwrap();
    calendar.undo().unwrap();
    assert_eq!(calendar.label(wed), "");
}

#[test]
fn labels_hard_wrap_every_fifty_characters() {
    let label = "a".repeat(120);
    let wrapped = wrap_label(&label, 50);
    let lines: Vec<&str> = wrapped.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].len(), 50);
    assert_eq!(lines[1].len(), 50);
    assert_eq!(lines[2].len(), 20);
    // Short labels pass through untouched.
    assert_eq!(wrap_label("short", 50), "short");
}
