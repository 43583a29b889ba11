//! Integration tests for reference-date layout parsing.

use fieldcheck::{LayoutError, parse_layout};

fn parsed(layout: &str, value: &str) -> String {
    parse_layout(layout, value).unwrap().to_string()
}

// =========================================================================
// Dates
// =========================================================================

#[test]
fn test_parses_iso_date() {
    assert_eq!(parsed("2006-01-02", "2023-02-28"), "2023-02-28 00:00:00");
}

#[test]
fn test_rejects_impossible_calendar_dates() {
    assert_eq!(
        parse_layout("2006-01-02", "2023-02-30"),
        Err(LayoutError::OutOfRange("day"))
    );
    assert_eq!(
        parse_layout("2006-01-02", "2023-13-01"),
        Err(LayoutError::OutOfRange("month"))
    );
    assert!(parse_layout("2006-01-02", "2024-02-29").is_ok());
    assert!(parse_layout("2006-01-02", "2023-02-29").is_err());
}

#[test]
fn test_zero_padded_tokens_require_two_digits() {
    assert_eq!(
        parse_layout("2006-01-02", "2023-2-28"),
        Err(LayoutError::Mismatch)
    );
    assert_eq!(parsed("2006-1-2", "2023-2-8"), "2023-02-08 00:00:00");
}

#[test]
fn test_rejects_extra_and_missing_text() {
    assert_eq!(
        parse_layout("2006-01-02", "2023-02-28T00"),
        Err(LayoutError::ExtraText)
    );
    assert_eq!(
        parse_layout("2006-01-02", "2023-02"),
        Err(LayoutError::Mismatch)
    );
    assert_eq!(parse_layout("2006-01-02", ""), Err(LayoutError::Mismatch));
}

#[test]
fn test_month_and_weekday_names() {
    assert_eq!(
        parsed("Mon, 02 Jan 2006", "Tue, 07 mar 2023"),
        "2023-03-07 00:00:00"
    );
    assert_eq!(
        parsed("January 2, 2006", "March 7, 2023"),
        "2023-03-07 00:00:00"
    );
}

#[test]
fn test_two_digit_years_pivot_at_69() {
    assert_eq!(parsed("06-01-02", "68-01-02"), "2068-01-02 00:00:00");
    assert_eq!(parsed("06-01-02", "69-01-02"), "1969-01-02 00:00:00");
}

#[test]
fn test_day_of_year() {
    assert_eq!(parsed("2006-002", "2023-060"), "2023-03-01 00:00:00");
    assert!(parse_layout("2006-002", "2023-366").is_err());
}

#[test]
fn test_space_runs_match_space_runs() {
    assert_eq!(parsed("Jan _2 2006", "Mar  7 2023"), "2023-03-07 00:00:00");
}

#[test]
fn test_non_ascii_literals() {
    assert_eq!(
        parsed("2006年01月02日", "2023年03月07日"),
        "2023-03-07 00:00:00"
    );
    assert!(parse_layout("2006年01月02日", "2023-03-07").is_err());
}

// =========================================================================
// Times
// =========================================================================

#[test]
fn test_twelve_hour_clock() {
    assert_eq!(parsed("3:04PM", "3:15PM"), "0000-01-01 15:15:00");
    assert_eq!(parsed("03:04pm", "12:00am"), "0000-01-01 00:00:00");
}

#[test]
fn test_offsets_and_fractions() {
    assert_eq!(
        parsed("2006-01-02T15:04:05Z07:00", "2023-03-07T10:20:30Z"),
        "2023-03-07 10:20:30"
    );
    assert_eq!(
        parsed("2006-01-02T15:04:05.000-0700", "2023-03-07T10:20:30.250+0900"),
        "2023-03-07 10:20:30.250"
    );
    assert!(parse_layout("15:04:05.000", "10:20:30.25").is_err());
    assert_eq!(parsed("15:04:05", "10:20:30.5"), "0000-01-01 10:20:30.500");
    assert_eq!(parsed("15:04:05.999", "10:20:30"), "0000-01-01 10:20:30");
}
