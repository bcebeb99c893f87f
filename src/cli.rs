use crate::calendar::View;
use crate::event::RepeatType;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// evently - calendar events with conflict checks and reminders
#[derive(Debug, Parser)]
#[command(name = "evently")]
#[command(about = "Calendar events with conflict checks and reminders", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding events.json (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the events of a week or month
    #[command(alias = "ls")]
    List {
        /// week or month (defaults to the configured view)
        #[arg(long)]
        view: Option<View>,

        /// Any date inside the window to show, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Only events whose title, description or location contain this text
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Create a new event
    #[command(alias = "create")]
    Add {
        /// Event title
        title: String,

        /// Date (YYYY-MM-DD)
        date: String,

        /// Start time (HH:MM)
        start_time: String,

        /// End time (HH:MM)
        end_time: String,

        #[command(flatten)]
        details: EventDetailArgs,

        /// Save even if the event overlaps existing ones
        #[arg(long)]
        force: bool,
    },

    /// Change fields of an existing event
    Edit {
        /// Event id
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,

        #[command(flatten)]
        details: EventDetailArgs,

        /// Save even if the event overlaps existing ones
        #[arg(long)]
        force: bool,
    },

    /// Delete an event
    #[command(alias = "rm")]
    Delete {
        /// Event id
        id: String,
    },

    /// List the public holidays of a month
    Holidays {
        /// Any date in the month, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Print notifications as events come due, until Ctrl-C
    Watch,
}

#[derive(Debug, Clone, Default, Args)]
pub struct EventDetailArgs {
    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// none, daily, weekly, monthly or yearly
    #[arg(long)]
    pub repeat: Option<RepeatType>,

    /// Repeat every N days/weeks/months/years
    #[arg(long)]
    pub interval: Option<u32>,

    /// Last date of the repetition (YYYY-MM-DD)
    #[arg(long)]
    pub repeat_end: Option<String>,

    /// Minutes before the start to send a notification
    #[arg(long)]
    pub notify: Option<u32>,
}
