//! Per-turn extraction orchestration.
//!
//! Each chat turn carries two texts: what the user asked and what the
//! assistant replied. The user text goes through a keyword gate and, when
//! gated in, the direct extraction path (date cascade, then the literal
//! "today" fallback). The assistant text is always scanned for
//! confirmations and deletions, independent of the gate. The two paths are
//! intentionally uncoordinated beyond their fixed order; both can insert on
//! the same turn.

use chrono::NaiveDate;
use tracing::debug;

use crate::calendar::{Event, EventPersistence, EventStore};
use crate::error::Result;
use crate::extraction::{DateResolver, TimeRangeFinder, TitleExtractor};

use super::scanner::{ConfirmationScanner, ScanOutcome};

/// Scheduling-related words; at least one must appear in the user text
/// before the direct extraction path runs.
const EVENT_KEYWORDS: [&str; 13] = [
    "schedule",
    "add",
    "create",
    "plan",
    "event",
    "meeting",
    "appointment",
    "reminder",
    "task",
    "study",
    "exercise",
    "break",
    "meditation",
];

/// What extraction did with one chat turn.
#[derive(Debug, Default)]
pub struct TurnExtraction {
    /// Event created from the user's own message, if any.
    pub direct_event: Option<Event>,
    /// Templated confirmation message for a direct-path event.
    pub confirmation: Option<String>,
    /// What the assistant-reply scan did.
    pub scan: ScanOutcome,
}

/// Orchestrator for the per-turn extraction paths.
pub struct ExtractionOrchestrator {
    dates: DateResolver,
    times: TimeRangeFinder,
    titles: TitleExtractor,
    scanner: ConfirmationScanner,
}

impl Default for ExtractionOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionOrchestrator {
    /// Create an orchestrator resolving dates against today.
    pub fn new() -> Self {
        Self::with_resolver(DateResolver::new())
    }

    /// Create an orchestrator with a fixed reference date, for
    /// deterministic tests.
    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self::with_resolver(DateResolver::with_reference_date(reference_date))
    }

    fn with_resolver(dates: DateResolver) -> Self {
        Self {
            dates,
            times: TimeRangeFinder::new(),
            titles: TitleExtractor::new(),
            scanner: ConfirmationScanner::new(),
        }
    }

    /// The reference day in ISO form, for display queries.
    pub fn today_iso(&self) -> String {
        self.dates.reference_iso()
    }

    /// Run both extraction paths over one completed chat turn.
    pub async fn process_turn<P: EventPersistence>(
        &self,
        user_text: &str,
        assistant_text: &str,
        store: &mut EventStore<P>,
    ) -> Result<TurnExtraction> {
        let mut extraction = TurnExtraction::default();

        if passes_keyword_gate(user_text) {
            if let Some((event, message)) = self.try_direct_path(user_text, store).await? {
                extraction.direct_event = Some(event);
                extraction.confirmation = Some(message);
            }
        } else {
            debug!("No scheduling keyword in user text; direct path skipped");
        }

        // The reply scan runs regardless of the gate outcome above.
        extraction.scan = self.scanner.scan(assistant_text, store).await?;

        Ok(extraction)
    }

    /// Direct path: resolve a date from the user's message, derive title
    /// and time range, insert without dedup.
    async fn try_direct_path<P: EventPersistence>(
        &self,
        user_text: &str,
        store: &mut EventStore<P>,
    ) -> Result<Option<(Event, String)>> {
        let date = match self.dates.resolve(user_text) {
            Some(date) => date,
            // The cascade found nothing; the literal "today" still counts.
            None if user_text.to_lowercase().contains("today") => self.dates.resolve_reference(),
            None => return Ok(None),
        };

        let title = self.titles.extract(user_text);
        let time = self.times.find(user_text);

        let mut event = Event::new(date.iso(), &title);
        if let Some(ref time) = time {
            event = event.with_time(time);
        }

        debug!("Direct path created event: {} on {}", title, event.date);
        store.insert_raw(event.clone()).await?;

        let message = match time {
            Some(time) => format!(
                "I've added \"{}\" to your calendar on {} from {}!",
                title,
                date.display(),
                time
            ),
            None => format!(
                "I've added \"{}\" to your calendar on {}!",
                title,
                date.display()
            ),
        };

        Ok(Some((event, message)))
    }
}

/// Whether the user text mentions any scheduling-related keyword.
fn passes_keyword_gate(user_text: &str) -> bool {
    let lower = user_text.to_lowercase();
    EVENT_KEYWORDS.iter().any(|k| lower.contains(k))
}

// ============================================================================
// Tests
// ============================================================================
