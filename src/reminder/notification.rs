//! Deciding which events should alert on a given clock tick.
//!
//! [`get_upcoming_events`] is a pure query. Remembering which events already
//! fired is the caller's job; [`NotificationCenter`] is the caller-side holder
//! of that state used by the ticker and the CLI.

use crate::event::{Event, EventLike};
use crate::overlap::parse_date_time;
use chrono::{Duration, NaiveDateTime};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Events whose notification window `[start - notificationTime, start)`
/// contains `now` and whose id is not in `notified`, in input order.
pub fn get_upcoming_events<'a>(
    events: &'a [Event],
    now: NaiveDateTime,
    notified: &HashSet<String>,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| !notified.contains(&event.id))
        .filter(|event| in_notification_window(*event, now))
        .collect()
}

fn in_notification_window<E: EventLike + ?Sized>(event: &E, now: NaiveDateTime) -> bool {
    let Some(start) = parse_date_time(event.date(), event.start_time()).value() else {
        return false;
    };
    let opens_at = start - Duration::minutes(i64::from(event.notification_time()));
    opens_at <= now && now < start
}

pub fn create_message<E: EventLike + ?Sized>(event: &E) -> String {
    format!("{}분 후 {} 일정이 시작됩니다.", event.notification_time(), event.title())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub message: String,
}

/// Notifications on display plus the ids that already fired this session.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    notified: HashSet<String>,
    notifications: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one tick: finds newly due events, marks them notified and queues
    /// their messages. Returns only the notifications created by this tick.
    pub fn tick(&mut self, events: &[Event], now: NaiveDateTime) -> Vec<Notification> {
        let fresh: Vec<Notification> = get_upcoming_events(events, now, &self.notified)
            .into_iter()
            .map(|event| Notification { id: event.id.clone(), message: create_message(event) })
            .collect();

        for notification in &fresh {
            debug!("Notifying event {}", notification.id);
            self.notified.insert(notification.id.clone());
        }
        self.notifications.extend(fresh.iter().cloned());
        fresh
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Removes the notification at `index` from display. The event stays
    /// marked as notified. Out-of-range indexes are ignored.
    pub fn dismiss(&mut self, index: usize) -> Option<Notification> {
        if index < self.notifications.len() {
            Some(self.notifications.remove(index))
        } else {
            None
        }
    }

    /// Clears every displayed notification. Ids stay marked as notified.
    pub fn dismiss_all(&mut self) {
        self.notifications.clear();
    }

    pub fn is_notified(&self, id: &str) -> bool {
        self.notified.contains(id)
    }

    pub fn notified_ids(&self) -> &HashSet<String> {
        &self.notified
    }
}
