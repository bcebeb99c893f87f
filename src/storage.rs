//! Persistence collaborator for events.
//!
//! The scheduling core never stores anything itself; it asks an [`EventStore`]
//! to list, create, update or remove records. Two stores ship with the crate:
//! [`MemoryEventStore`] for tests and embedding, and [`JsonEventStore`] which
//! keeps every event in a single `events.json` file.

use crate::calendar::CalendarError;
use crate::event::{Event, EventForm};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use directories::ProjectDirs;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

const EVENTS_FILE: &str = "events.json";
// Maximum allowed size for the events file (10MB)
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
const MAX_EVENTS: usize = 10_000;

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Event>>;

    /// Stores a new event and returns it with its assigned id.
    async fn create(&self, form: EventForm) -> Result<Event>;

    async fn update(&self, id: &str, form: EventForm) -> Result<Event>;

    async fn remove(&self, id: &str) -> Result<()>;
}

#[async_trait]
impl<S: EventStore + ?Sized> EventStore for Arc<S> {
    async fn list(&self) -> Result<Vec<Event>> {
        (**self).list().await
    }

    async fn create(&self, form: EventForm) -> Result<Event> {
        (**self).create(form).await
    }

    async fn update(&self, id: &str, form: EventForm) -> Result<Event> {
        (**self).update(id, form).await
    }

    async fn remove(&self, id: &str) -> Result<()> {
        (**self).remove(id).await
    }
}

fn new_event_id() -> String {
    Uuid::new_v4().to_string()
}

/// Keeps events in insertion order in memory.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    events: RwLock<Vec<Event>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        Self { events: RwLock::new(events) }
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn list(&self) -> Result<Vec<Event>> {
        Ok(self.events.read().await.clone())
    }

    async fn create(&self, form: EventForm) -> Result<Event> {
        let event = Event::from_form(new_event_id(), form);
        self.events.write().await.push(event.clone());
        debug!("Created event {} in memory", event.id);
        Ok(event)
    }

    async fn update(&self, id: &str, form: EventForm) -> Result<Event> {
        let mut events = self.events.write().await;
        let slot = events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or_else(|| anyhow!(CalendarError::EventNotFound(id.to_string())))?;
        *slot = Event::from_form(id, form);
        Ok(slot.clone())
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let mut events = self.events.write().await;
        let before = events.len();
        events.retain(|event| event.id != id);
        if events.len() == before {
            return Err(anyhow!(CalendarError::EventNotFound(id.to_string())));
        }
        Ok(())
    }
}

/// Stores every event as a JSON array in `<state_dir>/events.json`.
#[derive(Debug)]
pub struct JsonEventStore {
    path: PathBuf,
    // Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl JsonEventStore {
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self { path: state_dir.as_ref().join(EVENTS_FILE), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<Event>> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(Vec::new());
        }

        let metadata = tokio::fs::metadata(&self.path).await?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(anyhow!(CalendarError::Storage(format!(
                "{} exceeds the {} byte limit",
                self.path.display(),
                MAX_FILE_SIZE
            ))));
        }

        let content = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let json_value: serde_json::Value = serde_json::from_slice(&content)
            .map_err(|e| anyhow!("Failed to parse JSON data: {}", e))?;

        if let Some(array) = json_value.as_array() {
            if array.len() > MAX_EVENTS {
                return Err(anyhow!(CalendarError::Storage(format!(
                    "Too many events in file (maximum {})",
                    MAX_EVENTS
                ))));
            }
        }

        let events: Vec<Event> = serde_json::from_value(json_value)
            .map_err(|e| anyhow!("Failed to deserialize events: {}", e))?;
        Ok(events)
    }

    async fn save(&self, events: &[Event]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_vec_pretty(events)?;
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        debug!("Saved {} events to {}", events.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl EventStore for JsonEventStore {
    async fn list(&self) -> Result<Vec<Event>> {
        self.load().await
    }

    async fn create(&self, form: EventForm) -> Result<Event> {
        let _guard = self.write_lock.lock().await;
        let mut events = self.load().await?;
        let event = Event::from_form(new_event_id(), form);
        events.push(event.clone());
        self.save(&events).await?;
        info!("Created event {} ({})", event.id, event.title);
        Ok(event)
    }

    async fn update(&self, id: &str, form: EventForm) -> Result<Event> {
        let _guard = self.write_lock.lock().await;
        let mut events = self.load().await?;
        let slot = events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or_else(|| anyhow!(CalendarError::EventNotFound(id.to_string())))?;
        *slot = Event::from_form(id, form);
        let updated = slot.clone();
        self.save(&events).await?;
        info!("Updated event {}", id);
        Ok(updated)
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut events = self.load().await?;
        let before = events.len();
        events.retain(|event| event.id != id);
        if events.len() == before {
            return Err(anyhow!(CalendarError::EventNotFound(id.to_string())));
        }
        self.save(&events).await?;
        info!("Removed event {}", id);
        Ok(())
    }
}

pub fn default_state_dir() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "evently", "evently")
        .context("Failed to determine data directory")?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn form(title: &str) -> EventForm {
        EventForm::new(title, "2024-07-01", "10:00", "11:00")
    }

    #[tokio::test]
    async fn test_memory_store_crud() -> Result<()> {
        let store = MemoryEventStore::new();
        let created = store.create(form("회의")).await?;
        assert!(!created.id.is_empty());

        let mut edited = form("회의 (변경)");
        edited.location = "회의실".to_string();
        let updated = store.update(&created.id, edited).await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(store.list().await?, vec![updated]);

        store.remove(&created.id).await?;
        assert!(store.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_memory_store_missing_id() {
        let store = MemoryEventStore::new();
        let err = store.update("nope", form("x")).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CalendarError>(),
            Some(CalendarError::EventNotFound(id)) if id == "nope"
        ));
        assert!(store.remove("nope").await.is_err());
    }

    #[tokio::test]
    async fn test_json_store_persists_between_instances() -> Result<()> {
        let temp_dir = tempdir()?;
        let store = JsonEventStore::new(temp_dir.path());
        assert!(store.list().await?.is_empty());

        let first = store.create(form("첫 일정")).await?;
        let second = store.create(form("둘째 일정")).await?;
        store.remove(&first.id).await?;

        let reopened = JsonEventStore::new(temp_dir.path());
        let events = reopened.list().await?;
        assert_eq!(events, vec![second]);
        Ok(())
    }

    #[tokio::test]
    async fn test_json_store_writes_record_shape() -> Result<()> {
        let temp_dir = tempdir()?;
        let store = JsonEventStore::new(temp_dir.path());
        store.create(form("점심")).await?;

        let raw = std::fs::read_to_string(store.path())?;
        assert!(raw.contains("\"startTime\": \"10:00\""));
        assert!(raw.contains("\"notificationTime\": 0"));
        Ok(())
    }

    #[tokio::test]
    async fn test_json_store_rejects_corrupt_file() -> Result<()> {
        let temp_dir = tempdir()?;
        std::fs::write(temp_dir.path().join(EVENTS_FILE), "{not json")?;
        let store = JsonEventStore::new(temp_dir.path());
        assert!(store.list().await.is_err());
        Ok(())
    }
}
