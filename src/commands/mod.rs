use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::operations::EventOperations;
use crate::storage::{default_state_dir, JsonEventStore};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::debug;
use std::path::PathBuf;

pub mod calendar;
pub mod notify;

/// Everything a command needs: settings and the event store behind the controller.
pub struct CommandContext {
    pub config: Config,
    pub operations: EventOperations<JsonEventStore>,
}

impl CommandContext {
    pub fn new(config: Config, data_dir: Option<PathBuf>) -> Result<Self> {
        let state_dir = match data_dir.or_else(|| config.storage.data_dir.clone()) {
            Some(dir) => dir,
            None => default_state_dir()?,
        };
        debug!("Using event store in {}", state_dir.display());
        Ok(Self { config, operations: EventOperations::new(JsonEventStore::new(state_dir)) })
    }
}

pub async fn execute(cli: Cli, config: Config) -> Result<()> {
    let ctx = CommandContext::new(config, cli.data_dir)?;

    match cli.command {
        Commands::List { view, date, search } => {
            calendar::list_events(&ctx, view, date.as_deref(), search.as_deref()).await
        }
        Commands::Add { title, date, start_time, end_time, details, force } => {
            calendar::add_event(&ctx, &title, &date, &start_time, &end_time, details, force).await
        }
        Commands::Edit { id, title, date, start, end, details, force } => {
            let changes = calendar::EventChanges { title, date, start, end, details };
            calendar::edit_event(&ctx, &id, changes, force).await
        }
        Commands::Delete { id } => calendar::delete_event(&ctx, &id).await,
        Commands::Holidays { date } => calendar::list_holidays(date.as_deref()),
        Commands::Watch => notify::watch(&ctx).await,
    }
}

/// Parses an optional `YYYY-MM-DD` argument, falling back to today.
pub(crate) fn date_or_today(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(value) => crate::calendar::parse_date(value).ok_or_else(|| {
            anyhow::anyhow!(crate::calendar::CalendarError::InvalidDateTime(format!(
                "'{}' is not a valid YYYY-MM-DD date",
                value
            )))
        }),
        None => Ok(Local::now().date_naive()),
    }
}
