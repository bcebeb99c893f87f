//! Event time intervals and conflict detection.
//!
//! An event occupies the half-open interval `[date startTime, date endTime)`.
//! Malformed dates or times produce [`DateTimeValue::Invalid`] instead of an
//! error; an invalid endpoint never compares as earlier or later than anything,
//! so an interval containing one overlaps nothing.

use crate::calendar::validate_date_format;
use crate::event::{Event, EventLike};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::cmp::Ordering;

/// A parsed date-time or the marker for unparseable input.
///
/// Like a floating point NaN, `Invalid` is not equal to anything, itself included.
#[derive(Debug, Clone, Copy)]
pub enum DateTimeValue {
    Valid(NaiveDateTime),
    Invalid,
}

impl DateTimeValue {
    pub fn is_valid(&self) -> bool {
        matches!(self, DateTimeValue::Valid(_))
    }

    pub fn value(&self) -> Option<NaiveDateTime> {
        match self {
            DateTimeValue::Valid(dt) => Some(*dt),
            DateTimeValue::Invalid => None,
        }
    }
}

impl From<NaiveDateTime> for DateTimeValue {
    fn from(dt: NaiveDateTime) -> Self {
        DateTimeValue::Valid(dt)
    }
}

impl PartialEq for DateTimeValue {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.partial_cmp(other), Some(Ordering::Equal))
    }
}

impl PartialOrd for DateTimeValue {
    /// `None` whenever either side is invalid, which makes `<`, `<=`, `>` and
    /// `>=` all false.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (DateTimeValue::Valid(a), DateTimeValue::Valid(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub start: DateTimeValue,
    pub end: DateTimeValue,
}

impl Interval {
    pub fn is_valid(&self) -> bool {
        self.start.is_valid() && self.end.is_valid()
    }
}

/// Combines a `YYYY-MM-DD` date and an `HH:MM` (or `HH:MM:SS`) time.
pub fn parse_date_time(date: &str, time: &str) -> DateTimeValue {
    if !validate_date_format(date) {
        return DateTimeValue::Invalid;
    }
    let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return DateTimeValue::Invalid;
    };
    let parsed_time = match time.len() {
        5 => NaiveTime::parse_from_str(time, "%H:%M"),
        8 => NaiveTime::parse_from_str(time, "%H:%M:%S"),
        _ => return DateTimeValue::Invalid,
    };
    match parsed_time {
        // chrono reads second 60 as a leap second; a wall-clock time never has one.
        Ok(t) if t.nanosecond() >= 1_000_000_000 => DateTimeValue::Invalid,
        Ok(t) => DateTimeValue::Valid(day.and_time(t)),
        Err(_) => DateTimeValue::Invalid,
    }
}

pub fn to_interval<E: EventLike + ?Sized>(event: &E) -> Interval {
    Interval {
        start: parse_date_time(event.date(), event.start_time()),
        end: parse_date_time(event.date(), event.end_time()),
    }
}

/// Half-open intersection test; intervals that only touch do not overlap.
pub fn intervals_overlap(a: &Interval, b: &Interval) -> bool {
    a.start < b.end && b.start < a.end
}

pub fn is_overlapping<A, B>(a: &A, b: &B) -> bool
where
    A: EventLike + ?Sized,
    B: EventLike + ?Sized,
{
    intervals_overlap(&to_interval(a), &to_interval(b))
}

/// Every event in `existing` that overlaps `candidate`, in `existing` order.
/// An event with the candidate's own id is skipped so updates do not
/// conflict with their previous version.
pub fn find_overlaps<'a, E>(candidate: &E, existing: &'a [Event]) -> Vec<&'a Event>
where
    E: EventLike + ?Sized,
{
    let candidate_interval = to_interval(candidate);
    let candidate_id = candidate.id();
    existing
        .iter()
        .filter(|event| candidate_id != Some(event.id.as_str()))
        .filter(|event| intervals_overlap(&candidate_interval, &to_interval(*event)))
        .collect()
}
