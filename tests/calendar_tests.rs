use calendar_tool::{AcademicCalendar, CalendarError, ordinal_suffix, saturday_ordinal};
use chrono::{Datelike, NaiveDate, Weekday};

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
fn generate_produces_every_date_in_order() {
    let calendar = september_2024();
    let dates: Vec<NaiveDate> = calendar.dates().collect();
    assert_eq!(dates.len(), 30);
    assert_eq!(calendar.range().unwrap().days(), 30);
    assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(dates.first().copied().unwrap(), date(2024, 9, 1));
    assert_eq!(dates.last().copied().unwrap(), date(2024, 9, 30));
}

#[test]
fn generate_rejects_reversed_range() {
    let mut calendar = AcademicCalendar::new();
    let err = calendar
        .generate(date(2024, 9, 30), date(2024, 9, 1))
        .unwrap_err();
    assert!(matches!(err, CalendarError::StartAfterEnd { .. }));
    assert!(!calendar.is_generated());
    assert_eq!(calendar.dates().count(), 0);
}

#[test]
fn generate_replaces_previous_annotations() {
    let mut calendar = september_2024();
    calendar
        .submit(
            "Deepavali",
            calendar_tool::EventScope::Single(date(2024, 9, 3)),
            false,
        )
        .unwrap();
    calendar
        .generate(date(2024, 9, 1), date(2024, 9, 30))
        .unwrap();
    assert_eq!(calendar.label(date(2024, 9, 3)), "");
    // Regeneration also resets the undo stack.
    assert!(matches!(
        calendar.undo(),
        Err(CalendarError::NothingToUndo)
    ));
}

#[test]
fn september_2024_default_labels() {
    let calendar = september_2024();
    // Saturdays in September 2024: 7th, 14th, 21st, 28th.
    assert_eq!(calendar.label(date(2024, 9, 7)), "1st Saturday");
    assert_eq!(calendar.label(date(2024, 9, 14)), "2nd Saturday : Holiday");
    assert_eq!(calendar.label(date(2024, 9, 21)), "3rd Saturday");
    assert_eq!(calendar.label(date(2024, 9, 28)), "4th Saturday : Holiday");
    for day in [1, 8, 15, 22, 29] {
        assert_eq!(calendar.label(date(2024, 9, day)), "Sunday");
    }
    // Plain weekdays carry no label until an event is applied.
    assert_eq!(calendar.label(date(2024, 9, 2)), "");
}

#[test]
fn saturdays_default_holiday_iff_even_ordinal() {
    let calendar = september_2024();
    assert!(calendar.is_working_day(date(2024, 9, 7)));
    assert!(!calendar.is_working_day(date(2024, 9, 14)));
    assert!(calendar.is_working_day(date(2024, 9, 21)));
    assert!(!calendar.is_working_day(date(2024, 9, 28)));
}

#[test]
fn sundays_never_qualify_as_working_days() {
    let calendar = september_2024();
    for group in calendar.working_days_by_weekday() {
        assert!(group.dates.iter().all(|d| d.weekday() != Weekday::Sun));
    }
    assert!(!calendar.is_working_day(date(2024, 9, 1)));
}

#[test]
fn classifier_groups_and_counts_for_plain_september() {
    let calendar = september_2024();
    let groups = calendar.working_days_by_weekday();
    let names: Vec<&str> = groups.iter().map(|g| g.name).collect();
    assert_eq!(
        names,
        ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]
    );
    let counts: Vec<usize> = groups.iter().map(|g| g.count()).collect();
    // Sept 2024 has five Mondays and only the 1st/3rd Saturdays count.
    assert_eq!(counts, [5, 4, 4, 4, 4, 2]);
    let saturdays = &groups[5];
    assert_eq!(saturdays.dates, vec![date(2024, 9, 7), date(2024, 9, 21)]);
}

#[test]
fn classifier_is_idempotent_without_mutation() {
    let calendar = september_2024();
    assert_eq!(
        calendar.working_days_by_weekday(),
        calendar.working_days_by_weekday()
    );
}

#[test]
fn saturday_ordinal_resets_each_month() {
    // August 2024 ends with its fifth Saturday; September restarts at one.
    assert_eq!(saturday_ordinal(date(2024, 8, 3)), 1);
    assert_eq!(saturday_ordinal(date(2024, 8, 31)), 5);
    assert_eq!(saturday_ordinal(date(2024, 9, 7)), 1);
}

#[test]
fn ordinal_suffix_covers_teens_exception() {
    assert_eq!(ordinal_suffix(1), "st");
    assert_eq!(ordinal_suffix(2), "nd");
    assert_eq!(ordinal_suffix(3), "rd");
    assert_eq!(ordinal_suffix(4), "th");
    assert_eq!(ordinal_suffix(5), "th");
    assert_eq!(ordinal_suffix(11), "th");
    assert_eq!(ordinal_suffix(12), "th");
    assert_eq!(ordinal_suffix(13), "th");
    assert_eq!(ordinal_suffix(21), "st");
    assert_eq!(ordinal_suffix(22), "nd");
    assert_eq!(ordinal_suffix(23), "rd");
}

#[test]
fn clear_resets_range_but_keeps_configuration() {
    let mut calendar = september_2024();
    calendar.set_title("Test Calendar");
    calendar
        .set_semester("UG-S1", date(2024, 9, 2), date(2024, 9, 30))
        .unwrap();
    calendar.clear();
    assert!(!calendar.is_generated());
    assert_eq!(calendar.dates().count(), 0);
    assert_eq!(calendar.metadata().title, "Test Calendar");
    assert_eq!(calendar.semesters().len(), 1);
}
