pub mod calendar;
pub mod cli;
pub mod commands;
pub mod config;
pub mod event;
pub mod event_search;
pub mod holidays;
pub mod operations;
pub mod overlap;
pub mod reminder;
pub mod storage;

use env_logger::Env;

/// Installs the global logger. `RUST_LOG` wins over `default_level`.
pub fn init_logger(default_level: &str) {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

// Re-export commonly used types
pub use calendar::{CalendarError, View};
pub use config::Config;
pub use event::{Event, EventForm, EventLike, Repeat, RepeatType};
pub use operations::{EventInput, EventOperations, SaveMode, SaveOutcome};
pub use storage::{EventStore, JsonEventStore, MemoryEventStore};
