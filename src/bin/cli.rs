use calendar_tool::{
    AcademicCalendar, CalendarError, EVENT_CATALOG, EventScope, SEMESTER_NAMES, SemesterSet,
    events_by_date, load_calendar_from_csv, load_calendar_from_json, save_calendar_to_csv,
    save_calendar_to_json, selected_events, working_days_summary, write_report,
};
use chrono::NaiveDate;
use std::fs;
use std::io::{self, Write};

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Event names may be given as a 1-based catalog index or free text.
fn resolve_name(parts: &[&str]) -> String {
    let joined = parts.join(" ");
    if parts.len() == 1 {
        if let Ok(index) = parts[0].parse::<usize>() {
            if index >= 1 && index <= EVENT_CATALOG.len() {
                return EVENT_CATALOG[index - 1].label.to_string();
            }
        }
    }
    joined
}

fn render_calendar_table(calendar: &AcademicCalendar) -> String {
    let headers = ["Date", "Day", "Schedule"];
    let rows: Vec<[String; 3]> = calendar
        .dates()
        .map(|date| {
            [
                date.format("%d/%m/%y").to_string(),
                date.format("%a").to_string(),
                calendar.label(date),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, value) in row.iter().enumerate() {
            if value.len() > widths[i] {
                widths[i] = value.len();
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push('|');
    for (i, header) in headers.iter().enumerate() {
        out.push(' ');
        out.push_str(header);
        out.push_str(&" ".repeat(widths[i] - header.len()));
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        out.push('|');
        for (i, value) in row.iter().enumerate() {
            out.push(' ');
            out.push_str(value);
            out.push_str(&" ".repeat(widths[i].saturating_sub(value.len())));
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show the generated calendar\n  range <start> <end>                Generate the calendar for a date range (YYYY-MM-DD)\n  events                             List the event catalog\n  event single <date> <true|false> <name...>\n                                     Apply an event to one date (bool marks it a holiday);\n                                     name may be a catalog number or free text\n  event span <start> <end> <true|false> <name...>\n                                     Apply an event to every generated date in a range\n  undo                               Clear the most recently applied event\n  clear                              Reset the calendar\n  working                            Show the working days summary\n  selected                           Show the selected events panel\n  summary                            Show events grouped by date\n  sem show                           Display the semester windows\n  sem set <name> <start> <end>       Set a semester window (UG-S1..PG-S3)\n  sem save <json_path>               Save semester windows to a JSON file\n  sem load <json_path>               Load semester windows from a JSON file\n  meta show                          Show report title and subtitle\n  meta title <text...>               Update the report title\n  meta subtitle <text...>            Update the report subtitle\n  export <path.xlsx>                 Export the styled workbook\n  save <json|csv> <path>             Persist the calendar to disk\n  load <json|csv> <path>             Load a calendar from disk\n  quit|exit                          Exit"
    );
}

fn print_catalog() {
    println!("Event catalog:");
    for (index, entry) in EVENT_CATALOG.iter().enumerate() {
        println!("  {:>2}. [{}] {}", index + 1, entry.category.as_str(), entry.label);
    }
    println!("  Any other name is treated as a custom event.");
}

fn print_semesters(calendar: &AcademicCalendar) {
    if calendar.semesters().is_empty() {
        println!("No semester windows configured.");
        return;
    }
    for window in calendar.semesters().windows() {
        println!("  {:<6} {} - {}", window.name, window.start, window.end);
    }
}

fn print_metadata(calendar: &AcademicCalendar) {
    println!("Title   : {}", calendar.metadata().title);
    println!("Subtitle: {}", calendar.metadata().subtitle);
}

fn main() {
    let mut calendar = AcademicCalendar::new();

    println!("Calendar Tool (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if stdin.read_line(&mut line).is_err() {
            break;
        }
        if line.is_empty() {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts[0];

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => {
                if calendar.is_generated() {
                    println!("{}", render_calendar_table(&calendar));
                } else {
                    println!("No calendar generated. Use: range <start> <end>");
                }
            }
            "range" => match (parts.get(1), parts.get(2)) {
                (Some(start_s), Some(end_s)) => {
                    match (parse_date(start_s), parse_date(end_s)) {
                        (Some(start), Some(end)) => match calendar.generate(start, end) {
                            Ok(count) => {
                                println!("Generated {count} dates.");
                                println!("{}", render_calendar_table(&calendar));
                                println!("{}", working_days_summary(&calendar));
                            }
                            Err(e) => println!("Error: {e}"),
                        },
                        _ => println!("Invalid date (YYYY-MM-DD)"),
                    }
                }
                _ => println!("Usage: range <start> <end>"),
            },
            "events" => print_catalog(),
            "event" => {
                let usage = "Usage: event single <date> <true|false> <name...>\n       event span <start> <end> <true|false> <name...>";
                match parts.get(1) {
                    Some(&"single") => {
                        let (date_s, holiday_s) = (parts.get(2), parts.get(3));
                        let name_parts = parts.get(4..).unwrap_or(&[]);
                        match (date_s, holiday_s) {
                            (Some(date_s), Some(holiday_s)) if !name_parts.is_empty() => {
                                let date = match parse_date(date_s) {
                                    Some(d) => d,
                                    None => {
                                        println!("Invalid date (YYYY-MM-DD)");
                                        continue;
                                    }
                                };
                                let holiday = match parse_bool(holiday_s) {
                                    Some(b) => b,
                                    None => {
                                        println!("Invalid bool (true|false)");
                                        continue;
                                    }
                                };
                                let name = resolve_name(name_parts);
                                match calendar.submit(&name, EventScope::Single(date), holiday) {
                                    Ok(_) => {
                                        println!("Applied '{name}' to {date}.");
                                        println!("{}", working_days_summary(&calendar));
                                    }
                                    Err(e) => println!("Error: {e}"),
                                }
                            }
                            _ => println!("{usage}"),
                        }
                    }
                    Some(&"span") => {
                        let (start_s, end_s, holiday_s) = (parts.get(2), parts.get(3), parts.get(4));
                        let name_parts = parts.get(5..).unwrap_or(&[]);
                        match (start_s, end_s, holiday_s) {
                            (Some(start_s), Some(end_s), Some(holiday_s)) if !name_parts.is_empty() => {
                                let (start, end) = match (parse_date(start_s), parse_date(end_s)) {
                                    (Some(s), Some(e)) => (s, e),
                                    _ => {
                                        println!("Invalid date (YYYY-MM-DD)");
                                        continue;
                                    }
                                };
                                let holiday = match parse_bool(holiday_s) {
                                    Some(b) => b,
                                    None => {
                                        println!("Invalid bool (true|false)");
                                        continue;
                                    }
                                };
                                let name = resolve_name(name_parts);
                                match calendar.submit(&name, EventScope::Span { start, end }, holiday) {
                                    Ok(touched) => {
                                        println!("Applied '{name}' to {touched} date(s).");
                                        println!("{}", working_days_summary(&calendar));
                                    }
                                    Err(e) => println!("Error: {e}"),
                                }
                            }
                            _ => println!("{usage}"),
                        }
                    }
                    _ => println!("{usage}"),
                }
            }
            "undo" => match calendar.undo() {
                Ok(date) => {
                    println!("Cleared last event on {date}.");
                    println!("{}", working_days_summary(&calendar));
                }
                Err(CalendarError::NothingToUndo) => println!("No events to clear."),
                Err(e) => println!("Error: {e}"),
            },
            "clear" => {
                calendar.clear();
                println!("Calendar cleared successfully.");
            }
            "working" => println!("{}", working_days_summary(&calendar)),
            "selected" => print!("{}", selected_events(&calendar)),
            "summary" => print!("{}", events_by_date(&calendar)),
            "sem" => match parts.get(1) {
                Some(&"show") => print_semesters(&calendar),
                Some(&"set") => match (parts.get(2), parts.get(3), parts.get(4)) {
                    (Some(name), Some(start_s), Some(end_s)) => {
                        match (parse_date(start_s), parse_date(end_s)) {
                            (Some(start), Some(end)) => {
                                match calendar.set_semester(name, start, end) {
                                    Ok(()) => println!("Semester {name} set."),
                                    Err(e) => println!("Error: {e}"),
                                }
                            }
                            _ => println!("Invalid date (YYYY-MM-DD)"),
                        }
                    }
                    _ => println!(
                        "Usage: sem set <name> <start> <end>   (names: {})",
                        SEMESTER_NAMES.join(", ")
                    ),
                },
                Some(&"save") => match parts.get(2) {
                    Some(path) => {
                        match serde_json::to_string_pretty(calendar.semesters()) {
                            Ok(json) => match fs::write(path, json) {
                                Ok(()) => println!("Semester windows saved to {path}."),
                                Err(e) => println!("Error writing {path}: {e}"),
                            },
                            Err(e) => println!("Error: {e}"),
                        }
                    }
                    None => println!("Usage: sem save <json_path>"),
                },
                Some(&"load") => match parts.get(2) {
                    Some(path) => match fs::read_to_string(path) {
                        Ok(json) => match serde_json::from_str::<SemesterSet>(&json) {
                            Ok(semesters) => {
                                calendar.set_semesters(semesters);
                                println!("Semester windows loaded from {path}.");
                                print_semesters(&calendar);
                            }
                            Err(e) => println!("Error parsing {path}: {e}"),
                        },
                        Err(e) => println!("Error reading {path}: {e}"),
                    },
                    None => println!("Usage: sem load <json_path>"),
                },
                _ => println!("Usage: sem show | sem set <name> <start> <end> | sem save <path> | sem load <path>"),
            },
            "meta" => match parts.get(1) {
                Some(&"show") => print_metadata(&calendar),
                Some(&"title") => {
                    let text = parts.get(2..).unwrap_or(&[]).join(" ");
                    if text.is_empty() {
                        println!("Usage: meta title <text...>");
                    } else {
                        calendar.set_title(text);
                        print_metadata(&calendar);
                    }
                }
                Some(&"subtitle") => {
                    let text = parts.get(2..).unwrap_or(&[]).join(" ");
                    if text.is_empty() {
                        println!("Usage: meta subtitle <text...>");
                    } else {
                        calendar.set_subtitle(text);
                        print_metadata(&calendar);
                    }
                }
                _ => println!("Usage: meta show | meta title <text...> | meta subtitle <text...>"),
            },
            "export" => match parts.get(1) {
                Some(path) => match write_report(&calendar, path) {
                    Ok(()) => println!("Calendar exported to {path}."),
                    Err(e) => println!("Error exporting calendar: {e}"),
                },
                None => println!("Usage: export <path.xlsx>"),
            },
            "save" => match (parts.get(1), parts.get(2)) {
                (Some(&"json"), Some(path)) => match save_calendar_to_json(&calendar, path) {
                    Ok(()) => println!("Calendar saved to {path}."),
                    Err(e) => println!("Error saving calendar: {e}"),
                },
                (Some(&"csv"), Some(path)) => match save_calendar_to_csv(&calendar, path) {
                    Ok(()) => println!("Calendar saved to {path}."),
                    Err(e) => println!("Error saving calendar: {e}"),
                },
                _ => println!("Usage: save <json|csv> <path>"),
            },
            "load" => match (parts.get(1), parts.get(2)) {
                (Some(&"json"), Some(path)) => match load_calendar_from_json(path) {
                    Ok(loaded) => {
                        calendar = loaded;
                        println!("Calendar loaded from {path}.");
                        println!("{}", render_calendar_table(&calendar));
                    }
                    Err(e) => println!("Error loading calendar: {e}"),
                },
                (Some(&"csv"), Some(path)) => match load_calendar_from_csv(path) {
                    Ok(loaded) => {
                        calendar = loaded;
                        println!("Calendar loaded from {path}.");
                        println!("{}", render_calendar_table(&calendar));
                    }
                    Err(e) => println!("Error loading calendar: {e}"),
                },
                _ => println!("Usage: load <json|csv> <path>"),
            },
            _ => println!("Unknown command '{cmd}'. Type 'help' for commands."),
        }
    }
}
