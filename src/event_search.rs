//! Text search and view-window filtering over an event snapshot.

use crate::calendar::{is_within_range, parse_date, week_dates, View};
use crate::event::EventLike;
use chrono::{Datelike, NaiveDate};

/// Case-insensitive substring match on title, description or location.
/// An empty term matches every event.
pub fn matches_search<E: EventLike + ?Sized>(event: &E, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    [event.title(), event.description(), event.location()]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Whether the event's date is inside the week or month shown around `anchor`.
/// Events with an unparseable date are never visible.
pub fn matches_view<E: EventLike + ?Sized>(event: &E, anchor: NaiveDate, view: View) -> bool {
    let Some(date) = parse_date(event.date()) else {
        return false;
    };
    match view {
        View::Week => {
            let week = week_dates(anchor);
            is_within_range(date, week[0], week[6])
        }
        View::Month => date.year() == anchor.year() && date.month() == anchor.month(),
    }
}

/// Events visible in the current view that match `term`, in input order.
pub fn get_filtered_events<'a, E: EventLike>(
    events: &'a [E],
    term: &str,
    anchor: NaiveDate,
    view: View,
) -> Vec<&'a E> {
    events
        .iter()
        .filter(|event| matches_view(*event, anchor, view))
        .filter(|event| matches_search(*event, term))
        .collect()
}
