//! Save and delete with a conflict pre-check.
//!
//! [`EventOperations`] owns nothing but its store handle. Callers pass the
//! event snapshot they are looking at into every save; a conflicting save
//! comes back as [`SaveOutcome::Conflict`] and can be repeated with
//! [`SaveMode::Forced`] once the user has confirmed it.

use crate::event::{Event, EventForm, EventLike};
use crate::overlap::find_overlaps;
use crate::storage::EventStore;
use anyhow::Result;
use log::{debug, info, warn};

/// What is being saved: a new form, or an edit of a stored event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventInput {
    Create(EventForm),
    Update(Event),
}

impl EventInput {
    fn as_event_like(&self) -> &dyn EventLike {
        match self {
            EventInput::Create(form) => form,
            EventInput::Update(event) => event,
        }
    }
}

impl From<EventForm> for EventInput {
    fn from(form: EventForm) -> Self {
        EventInput::Create(form)
    }
}

impl From<Event> for EventInput {
    fn from(event: Event) -> Self {
        EventInput::Update(event)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveMode {
    /// Refuse to save over a conflict.
    #[default]
    Checked,
    /// Skip the conflict check for this call only.
    Forced,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(Event),
    /// Nothing was written; these events overlap the input.
    Conflict(Vec<Event>),
}

pub struct EventOperations<S> {
    store: S,
}

impl<S: EventStore> EventOperations<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn fetch_events(&self) -> Result<Vec<Event>> {
        self.store.list().await
    }

    /// Creates or updates `input` unless, in [`SaveMode::Checked`], it
    /// overlaps an event in `snapshot`. Store errors are returned as-is.
    pub async fn save(
        &self,
        snapshot: &[Event],
        input: impl Into<EventInput>,
        mode: SaveMode,
    ) -> Result<SaveOutcome> {
        let input = input.into();

        if mode == SaveMode::Checked {
            let overlaps = find_overlaps(input.as_event_like(), snapshot);
            if !overlaps.is_empty() {
                warn!(
                    "Save of '{}' deferred: overlaps {} event(s)",
                    input.as_event_like().title(),
                    overlaps.len()
                );
                return Ok(SaveOutcome::Conflict(overlaps.into_iter().cloned().collect()));
            }
        } else {
            debug!("Forced save, skipping overlap check");
        }

        let saved = match input {
            EventInput::Create(form) => self.store.create(form).await?,
            EventInput::Update(event) => {
                let form = event.to_form();
                self.store.update(&event.id, form).await?
            }
        };
        info!("Saved event {} ({})", saved.id, saved.title);
        Ok(SaveOutcome::Saved(saved))
    }

    /// Deletes without any overlap check.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.remove(id).await?;
        info!("Deleted event {}", id);
        Ok(())
    }
}
