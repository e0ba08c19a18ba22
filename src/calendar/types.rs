//! Calendar event types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A calendar event extracted from a chat turn.
///
/// `date` is a fixed-width `YYYY-MM-DD` string assembled from resolved
/// integer components, so dates compare correctly as plain strings and
/// never drift through a timezone conversion. `time` is the verbatim
/// time-range phrase as typed ("5pm to 6pm"), kept for display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier for the event.
    pub id: String,
    /// Calendar date as an ISO `YYYY-MM-DD` string.
    pub date: String,
    /// Event title, at most 50 characters.
    pub title: String,
    /// Verbatim time-range phrase, when one was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// When the event was inserted. Informational only.
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Create a new event.
    pub fn new(date: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date: date.into(),
            title: title.into(),
            time: None,
            created_at: Utc::now(),
        }
    }

    /// Set the time-range phrase.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// The `(date, title)` pair used for confirmation-path deduplication.
    /// Exact, case-sensitive match on both components.
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.date, &self.title)
    }
}

// ============================================================================
// Tests
// ============================================================================
