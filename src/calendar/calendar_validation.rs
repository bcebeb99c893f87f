//! Validation functions for calendar event data.
//
// The core queries tolerate malformed input; these checks are for front ends
// that want to reject a form before it reaches the store.

use super::CalendarError;
use crate::event::EventForm;
use chrono::{NaiveDate, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}:\d{2}(:\d{2})?$").unwrap());

/// Validate date string has format YYYY-MM-DD and names a real day
pub fn validate_date_format(date: &str) -> bool {
    DATE_RE.is_match(date) && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

/// Validate time string has format HH:MM or HH:MM:SS
pub fn validate_time_format(time: &str) -> bool {
    if !TIME_RE.is_match(time) {
        return false;
    }
    let format = if time.len() == 5 { "%H:%M" } else { "%H:%M:%S" };
    NaiveTime::parse_from_str(time, format).is_ok_and(|t| t.nanosecond() < 1_000_000_000)
}

/// Checks a form the way the edit screen does before saving.
pub fn validate_event_form(form: &EventForm) -> Result<(), CalendarError> {
    let required = [
        ("title", &form.title),
        ("date", &form.date),
        ("start time", &form.start_time),
        ("end time", &form.end_time),
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(CalendarError::InvalidArgument(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    if !validate_date_format(&form.date) {
        return Err(CalendarError::InvalidDateTime(format!(
            "'{}' is not a valid YYYY-MM-DD date",
            form.date
        )));
    }
    for time in [&form.start_time, &form.end_time] {
        if !validate_time_format(time) {
            return Err(CalendarError::InvalidDateTime(format!(
                "'{}' is not a valid HH:MM time",
                time
            )));
        }
    }

    // Both sides share a format, so string order is time order.
    if normalize_time(&form.start_time) >= normalize_time(&form.end_time) {
        return Err(CalendarError::InvalidArgument(
            "End time must be later than start time".to_string(),
        ));
    }

    if let Some(end_date) = &form.repeat.end_date {
        if !validate_date_format(end_date) {
            return Err(CalendarError::InvalidDateTime(format!(
                "'{}' is not a valid repeat end date",
                end_date
            )));
        }
    }

    Ok(())
}

fn normalize_time(time: &str) -> String {
    if time.len() == 5 {
        format!("{}:00", time)
    } else {
        time.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> EventForm {
        EventForm::new("팀 미팅", "2024-07-01", "14:00", "15:00")
    }

    #[test]
    fn test_validate_date_format() {
        assert!(validate_date_format("2024-07-01"));
        assert!(validate_date_format("2024-02-29"));
        assert!(!validate_date_format("2023-02-29"));
        assert!(!validate_date_format("2024-07-32"));
        assert!(!validate_date_format("2024-7-1"));
        assert!(!validate_date_format(""));
    }

    #[test]
    fn test_validate_time_format() {
        assert!(validate_time_format("14:30"));
        assert!(validate_time_format("10:05:00"));
        assert!(!validate_time_format("14:60"));
        assert!(!validate_time_format("24:00"));
        assert!(!validate_time_format("14:30:60"));
        assert!(!validate_time_format("9:30"));
        assert!(!validate_time_format(""));
    }

    #[test]
    fn test_validate_event_form_accepts_complete_form() {
        assert_eq!(validate_event_form(&form()), Ok(()));
    }

    #[test]
    fn test_validate_event_form_reports_missing_fields() {
        let empty = EventForm::default();
        let err = validate_event_form(&empty).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: title, date, start time, end time"
        );
    }

    #[test]
    fn test_validate_event_form_rejects_inverted_times() {
        let mut inverted = form();
        inverted.start_time = "15:00".to_string();
        inverted.end_time = "14:00".to_string();
        assert!(matches!(validate_event_form(&inverted), Err(CalendarError::InvalidArgument(_))));

        let mut touching = form();
        touching.end_time = "14:00:00".to_string();
        assert!(validate_event_form(&touching).is_err());
    }

    #[test]
    fn test_validate_event_form_rejects_bad_repeat_end() {
        let mut repeating = form();
        repeating.repeat.end_date = Some("2024-13-01".to_string());
        assert!(matches!(validate_event_form(&repeating), Err(CalendarError::InvalidDateTime(_))));
    }
}
