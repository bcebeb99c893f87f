//! Which window of the calendar is on screen and how to move it.

use super::calendar_math::{first_of_month, month_label, week_label};
use crate::holidays::{holidays_for_month, Holidays};
use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Granularity of the visible window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Week,
    Month,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Week => f.write_str("week"),
            View::Month => f.write_str("month"),
        }
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(View::Week),
            "month" => Ok(View::Month),
            other => Err(format!("Unknown view: {} (expected 'week' or 'month')", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarViewState {
    pub view: View,
    pub current_date: NaiveDate,
}

impl CalendarViewState {
    pub fn new(view: View, current_date: NaiveDate) -> Self {
        Self { view, current_date }
    }

    /// Moves one week, or one month landing on its first day.
    pub fn navigate(&mut self, direction: Direction) {
        self.current_date = match (self.view, direction) {
            (View::Week, Direction::Next) => self.current_date + Duration::days(7),
            (View::Week, Direction::Prev) => self.current_date - Duration::days(7),
            (View::Month, direction) => {
                let first = first_of_month(self.current_date);
                let shifted = match direction {
                    Direction::Next => first.checked_add_months(Months::new(1)),
                    Direction::Prev => first.checked_sub_months(Months::new(1)),
                };
                shifted.unwrap_or(first)
            }
        };
    }

    pub fn label(&self) -> String {
        match self.view {
            View::Week => week_label(self.current_date),
            View::Month => month_label(self.current_date),
        }
    }

    pub fn holidays(&self) -> Holidays {
        holidays_for_month(self.current_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_navigate_week() {
        let mut state = CalendarViewState::new(View::Week, d("2024-10-01"));
        state.navigate(Direction::Next);
        assert_eq!(state.current_date, d("2024-10-08"));
        state.navigate(Direction::Prev);
        state.navigate(Direction::Prev);
        assert_eq!(state.current_date, d("2024-09-24"));
    }

    #[test]
    fn test_navigate_month_lands_on_first_day() {
        let mut state = CalendarViewState::new(View::Month, d("2024-01-31"));
        state.navigate(Direction::Next);
        assert_eq!(state.current_date, d("2024-02-01"));
        state.navigate(Direction::Prev);
        state.navigate(Direction::Prev);
        assert_eq!(state.current_date, d("2023-12-01"));
    }

    #[test]
    fn test_label_follows_view() {
        let mut state = CalendarViewState::new(View::Week, d("2024-11-01"));
        assert_eq!(state.label(), "2024년 10월 5주");
        state.view = View::Month;
        assert_eq!(state.label(), "2024년 11월");
    }

    #[test]
    fn test_view_from_str() {
        assert_eq!("Month".parse::<View>(), Ok(View::Month));
        assert!("day".parse::<View>().is_err());
    }
}
