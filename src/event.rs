//! Event records as they are stored and edited.
//!
//! [`Event`] is a persisted record carrying an id assigned by the store,
//! [`EventForm`] is the same record before an id exists. Both implement
//! [`EventLike`] so the overlap, filter and notification queries accept either.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an event repeats. Stored as metadata only; occurrences are not expanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatType {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl fmt::Display for RepeatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RepeatType::None => "none",
            RepeatType::Daily => "daily",
            RepeatType::Weekly => "weekly",
            RepeatType::Monthly => "monthly",
            RepeatType::Yearly => "yearly",
        };
        f.write_str(name)
    }
}

impl FromStr for RepeatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(RepeatType::None),
            "daily" => Ok(RepeatType::Daily),
            "weekly" => Ok(RepeatType::Weekly),
            "monthly" => Ok(RepeatType::Monthly),
            "yearly" => Ok(RepeatType::Yearly),
            other => Err(format!("Unknown repeat type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repeat {
    #[serde(rename = "type")]
    pub repeat_type: RepeatType,
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Repeat {
    pub fn none() -> Self {
        Self::default()
    }

    /// A rule with type `none` or a zero interval describes a single occurrence.
    pub fn is_recurring(&self) -> bool {
        self.repeat_type != RepeatType::None && self.interval > 0
    }
}

/// An event before the store has assigned it an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub repeat: Repeat,
    #[serde(default)]
    pub notification_time: u32,
}

impl EventForm {
    pub fn new(title: &str, date: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            title: title.to_string(),
            date: date.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub repeat: Repeat,
    #[serde(default)]
    pub notification_time: u32,
}

impl Event {
    pub fn from_form(id: impl Into<String>, form: EventForm) -> Self {
        Self {
            id: id.into(),
            title: form.title,
            date: form.date,
            start_time: form.start_time,
            end_time: form.end_time,
            description: form.description,
            location: form.location,
            category: form.category,
            repeat: form.repeat,
            notification_time: form.notification_time,
        }
    }

    /// Everything but the id, used when handing an edited event back to a store.
    pub fn to_form(&self) -> EventForm {
        EventForm {
            title: self.title.clone(),
            date: self.date.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            category: self.category.clone(),
            repeat: self.repeat.clone(),
            notification_time: self.notification_time,
        }
    }
}

/// Read access shared by [`Event`] and [`EventForm`].
pub trait EventLike {
    /// `None` for events that have not been stored yet.
    fn id(&self) -> Option<&str>;
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn location(&self) -> &str;
    fn date(&self) -> &str;
    fn start_time(&self) -> &str;
    fn end_time(&self) -> &str;
    fn notification_time(&self) -> u32;
}

impl EventLike for Event {
    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn location(&self) -> &str {
        &self.location
    }
    fn date(&self) -> &str {
        &self.date
    }
    fn start_time(&self) -> &str {
        &self.start_time
    }
    fn end_time(&self) -> &str {
        &self.end_time
    }
    fn notification_time(&self) -> u32 {
        self.notification_time
    }
}

impl EventLike for EventForm {
    fn id(&self) -> Option<&str> {
        None
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn location(&self) -> &str {
        &self.location
    }
    fn date(&self) -> &str {
        &self.date
    }
    fn start_time(&self) -> &str {
        &self.start_time
    }
    fn end_time(&self) -> &str {
        &self.end_time
    }
    fn notification_time(&self) -> u32 {
        self.notification_time
    }
}
