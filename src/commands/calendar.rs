use super::{date_or_today, CommandContext};
use crate::calendar::{
    days_in_month, events_for_day, format_date, validate_event_form, week_dates, weeks_of_month,
    CalendarError, CalendarViewState, View,
};
use crate::cli::EventDetailArgs;
use crate::event::{Event, EventForm};
use crate::event_search::get_filtered_events;
use crate::holidays::{holidays_for_month, Holidays};
use crate::operations::{SaveMode, SaveOutcome};
use anyhow::{anyhow, Result};
use chrono::Datelike;
use log::debug;

const WEEKDAY_NAMES: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// Field edits requested on the command line; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct EventChanges {
    pub title: Option<String>,
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub details: EventDetailArgs,
}

impl EventChanges {
    pub fn apply(self, form: &mut EventForm) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(date) = self.date {
            form.date = date;
        }
        if let Some(start) = self.start {
            form.start_time = start;
        }
        if let Some(end) = self.end {
            form.end_time = end;
        }
        apply_details(self.details, form);
    }
}

fn apply_details(details: EventDetailArgs, form: &mut EventForm) {
    if let Some(description) = details.description {
        form.description = description;
    }
    if let Some(location) = details.location {
        form.location = location;
    }
    if let Some(category) = details.category {
        form.category = category;
    }
    if let Some(repeat_type) = details.repeat {
        form.repeat.repeat_type = repeat_type;
        if form.repeat.interval == 0 {
            form.repeat.interval = 1;
        }
    }
    if let Some(interval) = details.interval {
        form.repeat.interval = interval;
    }
    if let Some(end_date) = details.repeat_end {
        form.repeat.end_date = Some(end_date);
    }
    if let Some(minutes) = details.notify {
        form.notification_time = minutes;
    }
}

pub async fn list_events(
    ctx: &CommandContext,
    view: Option<View>,
    date: Option<&str>,
    search: Option<&str>,
) -> Result<()> {
    let anchor = date_or_today(date)?;
    let state = CalendarViewState::new(view.unwrap_or(ctx.config.calendar.default_view), anchor);
    let events = ctx.operations.fetch_events().await?;
    let visible: Vec<Event> =
        get_filtered_events(&events, search.unwrap_or(""), anchor, state.view)
            .into_iter()
            .cloned()
            .collect();
    debug!("{} of {} events visible", visible.len(), events.len());

    let output = match state.view {
        View::Week => render_week(&state, &visible),
        View::Month => render_month(&state, &visible, &state.holidays()),
    };
    print!("{}", output);
    Ok(())
}

pub async fn add_event(
    ctx: &CommandContext,
    title: &str,
    date: &str,
    start_time: &str,
    end_time: &str,
    details: EventDetailArgs,
    force: bool,
) -> Result<()> {
    let mut form = EventForm::new(title, date, start_time, end_time);
    form.notification_time = ctx.config.calendar.default_notification_minutes;
    apply_details(details, &mut form);
    validate_event_form(&form)?;

    let snapshot = ctx.operations.fetch_events().await?;
    let outcome = ctx.operations.save(&snapshot, form, save_mode(force)).await?;
    report_outcome(outcome)
}

pub async fn edit_event(
    ctx: &CommandContext,
    id: &str,
    changes: EventChanges,
    force: bool,
) -> Result<()> {
    let snapshot = ctx.operations.fetch_events().await?;
    let current = snapshot
        .iter()
        .find(|event| event.id == id)
        .ok_or_else(|| anyhow!(CalendarError::EventNotFound(id.to_string())))?;

    let mut form = current.to_form();
    changes.apply(&mut form);
    validate_event_form(&form)?;

    let outcome = ctx.operations.save(&snapshot, Event::from_form(id, form), save_mode(force)).await?;
    report_outcome(outcome)
}

pub async fn delete_event(ctx: &CommandContext, id: &str) -> Result<()> {
    ctx.operations.delete(id).await?;
    println!("일정이 삭제되었습니다: {}", id);
    Ok(())
}

pub fn list_holidays(date: Option<&str>) -> Result<()> {
    let anchor = date_or_today(date)?;
    let holidays = holidays_for_month(anchor);
    if holidays.is_empty() {
        println!("{}년 {}월에는 공휴일이 없습니다.", anchor.year(), anchor.month());
    }
    for (day, name) in holidays {
        println!("  {} {}", day, name);
    }
    Ok(())
}

fn save_mode(force: bool) -> SaveMode {
    if force {
        SaveMode::Forced
    } else {
        SaveMode::Checked
    }
}

fn report_outcome(outcome: SaveOutcome) -> Result<()> {
    match outcome {
        SaveOutcome::Saved(event) => {
            println!("일정이 저장되었습니다: {}", format_event_line(&event));
            Ok(())
        }
        SaveOutcome::Conflict(overlapping) => {
            print!("{}", render_conflicts(&overlapping));
            Err(anyhow!(
                "Event overlaps {} existing event(s); re-run with --force to save anyway",
                overlapping.len()
            ))
        }
    }
}

pub fn format_event_line(event: &Event) -> String {
    let mut line =
        format!("{}-{} {} [{}]", event.start_time, event.end_time, event.title, event.id);
    if !event.location.is_empty() {
        line.push_str(&format!(" @ {}", event.location));
    }
    if event.repeat.is_recurring() {
        line.push_str(&format!(
            " (반복: {} / {})",
            event.repeat.repeat_type, event.repeat.interval
        ));
    }
    line
}

pub fn render_conflicts(overlapping: &[Event]) -> String {
    let mut out = String::from("일정 겹침 경고\n다음 일정과 겹칩니다:\n");
    for event in overlapping {
        out.push_str(&format!(
            "  {} ({} {}-{})\n",
            event.title, event.date, event.start_time, event.end_time
        ));
    }
    out
}

pub fn render_week(state: &CalendarViewState, events: &[Event]) -> String {
    let mut out = format!("{}\n", state.label());
    for (weekday, date) in week_dates(state.current_date).iter().enumerate() {
        out.push_str(&format!("{} {}/{}\n", WEEKDAY_NAMES[weekday], date.month(), date.day()));
        let iso = format_date(*date, None);
        for event in events.iter().filter(|event| event.date == iso) {
            out.push_str(&format!("  {}\n", format_event_line(event)));
        }
    }
    out
}

pub fn render_month(state: &CalendarViewState, events: &[Event], holidays: &Holidays) -> String {
    let anchor = state.current_date;
    let mut out = format!("{}\n", state.label());
    let header: Vec<String> = WEEKDAY_NAMES.iter().map(|name| format!("{:>3} ", name)).collect();
    out.push_str(&header.concat());
    out.push('\n');

    for week in weeks_of_month(anchor) {
        for cell in week {
            let rendered = match cell {
                Some(day) => {
                    let marked = !events_for_day(events, day).is_empty()
                        || holidays.contains_key(&format_date(anchor, Some(day)));
                    format!("{:>3}{}", day, if marked { "*" } else { " " })
                }
                None => "    ".to_string(),
            };
            out.push_str(&rendered);
        }
        out.push('\n');
    }

    let days = days_in_month(anchor.year(), anchor.month()).unwrap_or(31);
    for day in 1..=days {
        let iso = format_date(anchor, Some(day));
        if let Some(name) = holidays.get(&iso) {
            out.push_str(&format!("{} {}\n", iso, name));
        }
        for event in events_for_day(events, day) {
            out.push_str(&format!("{} {}\n", iso, format_event_line(event)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn event(id: &str, title: &str, date: &str) -> Event {
        Event::from_form(id, EventForm::new(title, date, "10:00", "11:00"))
    }

    #[test]
    fn test_render_week_lists_events_under_their_day() {
        let state = CalendarViewState::new(View::Week, d("2024-11-01"));
        let events = vec![event("1", "이벤트 1", "2024-11-01"), event("2", "이벤트 2", "2024-11-02")];
        let out = render_week(&state, &events);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "2024년 10월 5주");
        assert_eq!(lines[1], "일 10/27");
        assert!(out.contains("금 11/1\n  10:00-11:00 이벤트 1 [1]\n토 11/2\n  10:00-11:00 이벤트 2 [2]"));
    }

    #[test]
    fn test_render_month_shows_holidays_and_events() {
        let state = CalendarViewState::new(View::Month, d("2024-10-01"));
        let events = vec![event("1", "회의", "2024-10-08")];
        let out = render_month(&state, &events, &holidays_for_month(state.current_date));
        assert!(out.starts_with("2024년 10월\n"));
        assert!(out.contains("2024-10-03 개천절"));
        assert!(out.contains("2024-10-08 10:00-11:00 회의 [1]"));
        assert!(out.contains("  8*"));
    }

    #[test]
    fn test_render_month_grid_rows() {
        let state = CalendarViewState::new(View::Month, d("2024-10-01"));
        let out = render_month(&state, &[], &holidays_for_month(state.current_date));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "  일   월   화   수   목   금   토 ");
        let first_week = ["    ", "    ", "  1 ", "  2 ", "  3*", "  4 ", "  5 "].concat();
        assert_eq!(lines[2], first_week);
    }

    #[test]
    fn test_format_event_line_with_location_and_repeat() {
        let mut form = EventForm::new("회의", "2024-10-08", "14:00", "15:00");
        form.location = "사무실".to_string();
        form.repeat.repeat_type = crate::event::RepeatType::Weekly;
        form.repeat.interval = 2;
        let line = format_event_line(&Event::from_form("3", form));
        assert_eq!(line, "14:00-15:00 회의 [3] @ 사무실 (반복: weekly / 2)");
    }

    #[test]
    fn test_render_conflicts() {
        let out = render_conflicts(&[event("1", "Event 1", "2024-11-01")]);
        assert!(out.contains("Event 1 (2024-11-01 10:00-11:00)"));
    }

    #[test]
    fn test_changes_keep_unset_fields() {
        let mut form = EventForm::new("회의", "2024-10-08", "14:00", "15:00");
        form.location = "사무실".to_string();
        let changes = EventChanges {
            end: Some("15:30".to_string()),
            details: EventDetailArgs { notify: Some(15), ..EventDetailArgs::default() },
            ..EventChanges::default()
        };
        changes.apply(&mut form);
        assert_eq!(form.end_time, "15:30");
        assert_eq!(form.location, "사무실");
        assert_eq!(form.notification_time, 15);
    }

    #[test]
    fn test_repeat_flag_defaults_interval() {
        let mut form = EventForm::new("회의", "2024-10-08", "14:00", "15:00");
        let details = EventDetailArgs {
            repeat: Some(crate::event::RepeatType::Weekly),
            ..EventDetailArgs::default()
        };
        apply_details(details, &mut form);
        assert!(form.repeat.is_recurring());
        assert_eq!(form.repeat.interval, 1);
    }
}
