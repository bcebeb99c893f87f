//! Periodic notification loop.

use super::notification::{Notification, NotificationCenter};
use crate::storage::EventStore;
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use log::{debug, info, warn};
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Polls `store` every `period`, feeding each snapshot through `center` and
/// passing new notifications to `on_notify`, until `shutdown` resolves.
///
/// Ticks run one after another on the calling task. A failed fetch is logged
/// and the tick skipped. `on_notify` is the display: delivered notifications
/// are dismissed from `center` so a long session does not accumulate them.
pub async fn run_ticker<S, F, Fut>(
    store: &S,
    center: &mut NotificationCenter,
    period: Duration,
    clock: impl Fn() -> NaiveDateTime,
    mut on_notify: F,
    shutdown: Fut,
) -> Result<()>
where
    S: EventStore + ?Sized,
    F: FnMut(&Notification),
    Fut: Future<Output = ()>,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    info!("Notification ticker started ({:?} period)", period);
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Notification ticker stopped");
                return Ok(());
            }
            _ = interval.tick() => {
                let events = match store.list().await {
                    Ok(events) => events,
                    Err(e) => {
                        warn!("Skipping notification tick, could not load events: {}", e);
                        continue;
                    }
                };
                let fresh = center.tick(&events, clock());
                if !fresh.is_empty() {
                    debug!("{} new notification(s)", fresh.len());
                }
                for notification in &fresh {
                    on_notify(notification);
                }
                center.dismiss_all();
            }
        }
    }
}

/// Wall clock used by the CLI.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Event, EventForm};
    use crate::storage::MemoryEventStore;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_notifies_once_then_stops() -> Result<()> {
        let mut form = EventForm::new("스탠드업", "2024-11-04", "10:05", "10:15");
        form.notification_time = 5;
        let store = MemoryEventStore::with_events(vec![Event::from_form("1", form)]);
        let mut center = NotificationCenter::new();
        let mut received = Vec::new();

        run_ticker(
            &store,
            &mut center,
            Duration::from_secs(1),
            || at("2024-11-04T10:01:00"),
            |n| received.push(n.clone()),
            tokio::time::sleep(Duration::from_millis(3500)),
        )
        .await?;

        assert_eq!(received.len(), 1);
        assert_eq!(received[0].message, "5분 후 스탠드업 일정이 시작됩니다.");
        assert!(center.is_notified("1"));
        assert!(center.notifications().is_empty());
        Ok(())
    }
}
