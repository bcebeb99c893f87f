//! Pure calendar arithmetic: month lengths, Sunday-first weeks, month grids
//! and the Korean week/month labels shown above each view.

use super::CalendarError;
use crate::event::EventLike;
use chrono::{Datelike, Duration, NaiveDate};

pub const DEFAULT_PAD_WIDTH: usize = 2;

/// Number of days in `month` (1-12) of `year`.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidArgument(
            "Invalid month. Month must be between 1 and 12.".to_string(),
        ));
    }
    let days = match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    };
    Ok(days)
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// The Sunday-to-Saturday week containing `anchor`.
pub fn week_dates(anchor: NaiveDate) -> [NaiveDate; 7] {
    let sunday = anchor - Duration::days(i64::from(anchor.weekday().num_days_from_sunday()));
    std::array::from_fn(|offset| sunday + Duration::days(offset as i64))
}

/// Month grid for the month containing `anchor`: Sunday-aligned rows of
/// day-of-month numbers, `None` for cells outside the month.
pub fn weeks_of_month(anchor: NaiveDate) -> Vec<[Option<u32>; 7]> {
    let first = first_of_month(anchor);
    let first_weekday = first.weekday().num_days_from_sunday();
    // The month of a valid NaiveDate is always in range.
    let days = days_in_month(anchor.year(), anchor.month()).unwrap_or(31);

    let mut weeks = Vec::with_capacity(6);
    let mut week = [None; 7];
    for day in 1..=days {
        let column = ((first_weekday + day - 1) % 7) as usize;
        week[column] = Some(day);
        if column == 6 || day == days {
            weeks.push(week);
            week = [None; 7];
        }
    }
    weeks
}

/// Week-of-month label such as `2024년 11월 2주`.
///
/// A week belongs to the month its Thursday falls in, so the last days of
/// a month can be labelled as week 1 of the next one (`2023-02-28` gives
/// `2023년 3월 1주`). Weeks are counted from that month's first Thursday.
pub fn week_label(date: NaiveDate) -> String {
    let thursday = date + Duration::days(4 - i64::from(date.weekday().num_days_from_sunday()));
    let first = first_of_month(thursday);
    let to_first_thursday = (4 + 7 - first.weekday().num_days_from_sunday()) % 7;
    let first_thursday = first + Duration::days(i64::from(to_first_thursday));
    let week_number = (thursday - first_thursday).num_days() / 7 + 1;

    format!("{}년 {}월 {}주", thursday.year(), thursday.month(), week_number)
}

/// Month label such as `2024년 7월`.
pub fn month_label(date: NaiveDate) -> String {
    format!("{}년 {}월", date.year(), date.month())
}

/// `YYYY-MM-DD`, optionally with the day-of-month replaced by `day`.
pub fn format_date(date: NaiveDate, day: Option<u32>) -> String {
    format!(
        "{}-{}-{}",
        date.year(),
        pad_number(f64::from(date.month()), DEFAULT_PAD_WIDTH),
        pad_number(f64::from(day.unwrap_or_else(|| date.day())), DEFAULT_PAD_WIDTH)
    )
}

/// Left-pads the printed value with zeros up to `width` characters. Values
/// already at least `width` characters long come back unchanged.
pub fn pad_number(value: f64, width: usize) -> String {
    format!("{:0>width$}", value.to_string(), width = width)
}

/// Inclusive on both ends; false for every date when `start > end`.
pub fn is_within_range(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    date >= start && date <= end
}

/// Events whose date falls on day-of-month `day`, in input order.
pub fn events_for_day<E: EventLike>(events: &[E], day: u32) -> Vec<&E> {
    events
        .iter()
        .filter(|event| parse_date(event.date()).is_some_and(|date| date.day() == day))
        .collect()
}

/// Parses a strict `YYYY-MM-DD` date.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    if !super::validate_date_format(date) {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

pub(crate) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
