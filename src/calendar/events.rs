//! Event storage with pluggable persistence.
//!
//! The store owns the event collection in memory and re-serializes the
//! whole collection through its persistence dependency after every
//! mutation. Loading is tolerant: an absent or malformed persisted
//! collection becomes an empty store, never an error.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::Result;

use super::types::Event;

// ============================================================================
// Persistence
// ============================================================================

/// Storage backend for the event collection.
///
/// The store never partially updates persisted state; `save` always
/// receives the full collection.
#[async_trait]
pub trait EventPersistence: Send + Sync {
    /// Load the persisted collection. Absence or corruption yields an
    /// empty collection.
    async fn load(&self) -> Vec<Event>;

    /// Replace the persisted collection.
    async fn save(&self, events: &[Event]) -> Result<()>;
}

/// JSON file persistence: one file holding the serialized event array.
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    /// Persist events under the given data directory.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("events.json"),
        }
    }

    /// The file the collection is persisted to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EventPersistence for JsonFilePersistence {
    async fn load(&self) -> Vec<Event> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("Failed to read {}: {e}; starting empty", self.path.display());
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(events) => events,
            Err(e) => {
                warn!(
                    "Malformed event collection in {}: {e}; starting empty",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    async fn save(&self, events: &[Event]) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        let content = serde_json::to_string_pretty(events)?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, content).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        Ok(())
    }
}

/// In-memory persistence for tests.
pub struct MemoryPersistence {
    events: Mutex<Vec<Event>>,
}

impl MemoryPersistence {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Create a backend pre-seeded with events.
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: Mutex::new(events),
        }
    }
}

impl Default for MemoryPersistence {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPersistence for MemoryPersistence {
    async fn load(&self) -> Vec<Event> {
        self.events.lock().await.clone()
    }

    async fn save(&self, events: &[Event]) -> Result<()> {
        *self.events.lock().await = events.to_vec();
        Ok(())
    }
}

// ============================================================================
// Event Store
// ============================================================================

/// The event collection, ordered by insertion.
///
/// All reads (calendar highlighting, events list) derive from this store;
/// extraction state is never consulted directly. Mutation happens from a
/// single chat turn at a time, so exclusive access via `&mut` is the whole
/// concurrency story.
pub struct EventStore<P: EventPersistence> {
    events: Vec<Event>,
    persistence: P,
}

impl<P: EventPersistence> EventStore<P> {
    /// Load the store from its persistence backend.
    pub async fn load(persistence: P) -> Self {
        let events = persistence.load().await;
        debug!("Loaded {} events", events.len());
        Self { events, persistence }
    }

    /// All events, in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append an event unconditionally and persist.
    ///
    /// This is the direct user-message path. It intentionally performs no
    /// dedup check, unlike [`insert_unique`](Self::insert_unique); the
    /// asymmetry mirrors the source behavior and is pinned by tests.
    pub async fn insert_raw(&mut self, event: Event) -> Result<()> {
        debug!("Inserting event: {} on {}", event.title, event.date);
        self.events.push(event);
        self.persist().await
    }

    /// Append an event unless one with the same `(date, title)` already
    /// exists; persist when inserted. Returns whether it was inserted.
    ///
    /// This is the assistant-confirmation path.
    pub async fn insert_unique(&mut self, event: Event) -> Result<bool> {
        let exists = self
            .events
            .iter()
            .any(|e| e.dedup_key() == event.dedup_key());
        if exists {
            debug!(
                "Skipping duplicate event: {} on {}",
                event.title, event.date
            );
            return Ok(false);
        }
        self.events.push(event);
        self.persist().await?;
        Ok(true)
    }

    /// Remove every event and persist the empty collection.
    pub async fn clear_all(&mut self) -> Result<()> {
        debug!("Clearing all {} events", self.events.len());
        self.events.clear();
        self.persist().await
    }

    /// Events dated today or later, sorted ascending.
    ///
    /// Lexical comparison is correct because the date format is
    /// fixed-width and zero-padded.
    pub fn upcoming(&self, today_iso: &str) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .events
            .iter()
            .filter(|e| e.date.as_str() >= today_iso)
            .cloned()
            .collect();
        events.sort_by(|a, b| a.date.cmp(&b.date));
        events
    }

    /// The two most recent past events, most recent first.
    pub fn recent_past(&self, today_iso: &str) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .events
            .iter()
            .filter(|e| e.date.as_str() < today_iso)
            .cloned()
            .collect();
        events.sort_by(|a, b| a.date.cmp(&b.date));
        let skip = events.len().saturating_sub(2);
        let mut recent: Vec<Event> = events.split_off(skip);
        recent.reverse();
        recent
    }

    /// Re-serialize the whole collection through the persistence backend.
    ///
    /// A write failure propagates to the caller with the in-memory state
    /// already mutated; there is no rollback (known gap, see tests).
    async fn persist(&self) -> Result<()> {
        self.persistence.save(&self.events).await
    }
}

// ============================================================================
// Tests
// ============================================================================
