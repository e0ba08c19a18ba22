//! Confirmation scanning of assistant replies.
//!
//! The remote assistant replies in free text. When that text reads like an
//! already-created event ("I've scheduled \"X\" ... on January 17, 2026"),
//! the event goes into the store through the deduplicating path; when it
//! reads like a deletion, the store is cleared. Both checks run on every
//! reply, creation first.

use regex::Regex;
use tracing::debug;

use crate::calendar::{Event, EventPersistence, EventStore};
use crate::error::Result;
use crate::extraction::ResolvedDate;

/// Maximum title length carried into the store, in characters.
const MAX_TITLE_LEN: usize = 50;

/// What a reply scan did to the store.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Event inserted from a detected confirmation, if any.
    pub created: Option<Event>,
    /// Whether a deletion intent cleared the store.
    pub cleared: bool,
}

/// Scanner for event confirmations and deletions in assistant replies.
pub struct ConfirmationScanner {
    confirmed_title: Regex,
    title_marker: Regex,
    weekday_prefixed_date: Regex,
    bare_date: Regex,
}

impl Default for ConfirmationScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmationScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self {
            confirmed_title: Regex::new(
                r#"(?i)(?:I've|I have)\s+(?:scheduled|added|created)\s+(?:the\s+)?"([^"]+)""#,
            )
            .expect("Invalid regex"),
            title_marker: Regex::new(r"(?i)\*\*Title:\*\*\s*([^\n*]+)").expect("Invalid regex"),
            weekday_prefixed_date: Regex::new(
                r"(?i)\b(?:Today|Tomorrow|Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday),?\s+([A-Za-z]+)\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b",
            )
            .expect("Invalid regex"),
            bare_date: Regex::new(r"\b([A-Za-z]+)\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b")
                .expect("Invalid regex"),
        }
    }

    /// Scan a reply and apply what it implies to the store.
    ///
    /// The creation check runs first and the deletion check second; both
    /// always execute, so a single reply can in principle insert an event
    /// and then wipe the store.
    pub async fn scan<P: EventPersistence>(
        &self,
        reply: &str,
        store: &mut EventStore<P>,
    ) -> Result<ScanOutcome> {
        let mut outcome = ScanOutcome::default();

        if let (Some(title), Some(date)) = (self.find_title(reply), self.find_date(reply)) {
            let event = Event::new(date.iso(), title);
            debug!(
                "Reply confirms event: {} on {}",
                event.title, event.date
            );
            if store.insert_unique(event.clone()).await? {
                outcome.created = Some(event);
            }
        }

        if detects_deletion(reply) {
            debug!("Reply indicates deletion; clearing store");
            store.clear_all().await?;
            outcome.cleared = true;
        }

        Ok(outcome)
    }

    /// A confirmed title: quoted phrase after a confirmation verb, or a
    /// `**Title:**` marker line.
    fn find_title(&self, reply: &str) -> Option<String> {
        let raw = self
            .confirmed_title
            .captures(reply)
            .or_else(|| self.title_marker.captures(reply))
            .map(|cap| cap[1].trim().to_string())?;
        if raw.is_empty() {
            return None;
        }
        Some(raw.chars().take(MAX_TITLE_LEN).collect())
    }

    /// An absolute date, weekday-prefixed form preferred.
    fn find_date(&self, reply: &str) -> Option<ResolvedDate> {
        for pattern in [&self.weekday_prefixed_date, &self.bare_date] {
            for cap in pattern.captures_iter(reply) {
                let day = cap[2].parse::<u32>().ok()?;
                let year = cap[3].parse::<i32>().ok()?;
                // A non-month word in the month position is not a date;
                // keep looking.
                if let Some(date) =
                    ResolvedDate::from_month_name(&cap[1], day, year, cap.get(0)?.as_str())
                {
                    return Some(date);
                }
            }
        }
        None
    }
}

/// Whether the reply reads as a deletion of events.
fn detects_deletion(reply: &str) -> bool {
    let lower = reply.to_lowercase();
    lower.contains("delete") && (lower.contains("all events") || lower.contains("event"))
}

// ============================================================================
// Tests
// ============================================================================
