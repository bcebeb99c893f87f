//! Read-only public holiday lookup used when drawing month grids.

use crate::calendar::{pad_number, DEFAULT_PAD_WIDTH};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// ISO date to holiday name.
pub type Holidays = BTreeMap<String, String>;

static HOLIDAYS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("2024-01-01", "신정"),
        ("2024-02-09", "설날"),
        ("2024-02-10", "설날"),
        ("2024-02-11", "설날"),
        ("2024-03-01", "삼일절"),
        ("2024-05-05", "어린이날"),
        ("2024-06-06", "현충일"),
        ("2024-08-15", "광복절"),
        ("2024-09-16", "추석"),
        ("2024-09-17", "추석"),
        ("2024-09-18", "추석"),
        ("2024-10-03", "개천절"),
        ("2024-10-09", "한글날"),
        ("2024-12-25", "크리스마스"),
    ])
});

/// Holidays falling in the month of `date`.
pub fn holidays_for_month(date: NaiveDate) -> Holidays {
    let prefix =
        format!("{}-{}-", date.year(), pad_number(f64::from(date.month()), DEFAULT_PAD_WIDTH));
    HOLIDAYS
        .iter()
        .filter(|(day, _)| day.starts_with(&prefix))
        .map(|(day, name)| (day.to_string(), name.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_holidays_for_month_returns_only_that_month() {
        let expected: Holidays = [("2024-02-09", "설날"), ("2024-02-10", "설날"), ("2024-02-11", "설날")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(holidays_for_month(d("2024-02-01")), expected);
    }

    #[test]
    fn test_month_without_holidays_is_empty() {
        assert!(holidays_for_month(d("2024-04-01")).is_empty());
        assert!(holidays_for_month(d("2025-09-16")).is_empty());
    }

    #[test]
    fn test_month_with_several_holidays() {
        let holidays = holidays_for_month(d("2024-09-20"));
        assert_eq!(holidays.len(), 3);
        assert_eq!(holidays.get("2024-09-17").map(String::as_str), Some("추석"));
    }
}
