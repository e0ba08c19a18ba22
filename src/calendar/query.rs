//! Display-oriented queries over the event store.

use super::events::{EventPersistence, EventStore};
use super::types::Event;

/// The events-list partition shown to the user: everything from today
/// onward, plus a short tail of the recent past.
#[derive(Debug, Clone)]
pub struct EventsOverview {
    /// Events dated today or later, soonest first.
    pub upcoming: Vec<Event>,
    /// Up to two past events, most recent first.
    pub recent_past: Vec<Event>,
}

impl EventsOverview {
    /// Whether there is nothing to show at all.
    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.recent_past.is_empty()
    }
}

/// Partition the store's events around the given day.
pub fn overview<P: EventPersistence>(store: &EventStore<P>, today_iso: &str) -> EventsOverview {
    EventsOverview {
        upcoming: store.upcoming(today_iso),
        recent_past: store.recent_past(today_iso),
    }
}

// ============================================================================
// Tests
// ============================================================================
