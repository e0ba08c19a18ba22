//! Chat turn processing.
//!
//! A turn runs start-to-finish before the next begins: send the user's
//! message to the remote assistant, and once a reply is in hand run both
//! extraction paths over it. The network call is the only suspension point
//! where other work can interleave; extraction and store mutation happen
//! synchronously after it. A transport failure ends the turn with an
//! apology message; nothing is retried and nothing rolls back, because
//! extraction never runs before a successful reply.

use tracing::warn;

use crate::assistant::AssistantService;
use crate::calendar::{EventPersistence, EventStore, EventsOverview};
use crate::chat::ExtractionOrchestrator;

/// Message shown when the assistant service cannot be reached.
pub const TRANSPORT_APOLOGY: &str =
    "Sorry, I had trouble connecting to my backend. Please try again!";

/// Everything one chat turn produced for display.
#[derive(Debug)]
pub struct TurnOutcome {
    /// The assistant's reply, or the apology message on transport failure.
    pub reply: String,
    /// Confirmation message for an event created from the user's message.
    pub confirmation: Option<String>,
    /// Whether the turn ended in a transport failure.
    pub transport_failed: bool,
}

/// Processor owning the event store and driving chat turns through it.
pub struct ChatTurnProcessor<A: AssistantService, P: EventPersistence> {
    assistant: A,
    orchestrator: ExtractionOrchestrator,
    store: EventStore<P>,
    session_id: String,
}

impl<A: AssistantService, P: EventPersistence> ChatTurnProcessor<A, P> {
    /// Create a processor. The session identifier is supplied by the
    /// caller and reused for every request of this conversation.
    pub fn new(
        assistant: A,
        orchestrator: ExtractionOrchestrator,
        store: EventStore<P>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            assistant,
            orchestrator,
            store,
            session_id: session_id.into(),
        }
    }

    /// Read access to the event store.
    pub fn store(&self) -> &EventStore<P> {
        &self.store
    }

    /// The events-list partition around the orchestrator's reference day.
    pub fn overview(&self) -> EventsOverview {
        crate::calendar::overview(&self.store, &self.orchestrator.today_iso())
    }

    /// Process one user message to completion.
    pub async fn process(&mut self, user_text: &str) -> TurnOutcome {
        let reply = match self.assistant.send(user_text, &self.session_id).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Assistant request failed: {e}");
                return TurnOutcome {
                    reply: TRANSPORT_APOLOGY.to_string(),
                    confirmation: None,
                    transport_failed: true,
                };
            }
        };

        let confirmation = match self
            .orchestrator
            .process_turn(user_text, &reply, &mut self.store)
            .await
        {
            Ok(extraction) => extraction.confirmation,
            Err(e) => {
                // Persistence write failure: the in-memory state may be
                // ahead of the file. Surfacing the reply still matters
                // more than the bookkeeping.
                warn!("Extraction bookkeeping failed: {e}");
                None
            }
        };

        TurnOutcome {
            reply,
            confirmation,
            transport_failed: false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MemoryPersistence;
    use crate::error::{AssistantError, Result};
    use async_trait::async_trait;
    use chrono::NaiveDate;

    /// Scripted assistant returning a fixed reply or a fixed failure.
    struct ScriptedAssistant {
        reply: Option<String>,
    }

    #[async_trait]
    impl AssistantService for ScriptedAssistant {
        async fn send(&self, _chat_input: &str, _session_id: &str) -> Result<String> {
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(AssistantError::Status(500).into()),
            }
        }
    }

    async fn processor(reply: Option<&str>) -> ChatTurnProcessor<ScriptedAssistant, MemoryPersistence> {
        ChatTurnProcessor::new(
            ScriptedAssistant {
                reply: reply.map(String::from),
            },
            ExtractionOrchestrator::with_reference_date(
                NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            ),
            EventStore::load(MemoryPersistence::new()).await,
            "test-session",
        )
    }

    #[tokio::test]
    async fn test_successful_turn_extracts_event() {
        let mut processor = processor(Some("Sounds good!")).await;

        let outcome = processor
            .process("schedule a study session on January 17th 2026 from 5pm to 6pm")
            .await;

        assert_eq!(outcome.reply, "Sounds good!");
        assert!(!outcome.transport_failed);
        assert!(outcome.confirmation.unwrap().contains("5pm to 6pm"));
        assert_eq!(processor.store().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_yields_apology_and_no_extraction() {
        let mut processor = processor(None).await;

        let outcome = processor
            .process("schedule a study session on January 17th 2026")
            .await;

        assert!(outcome.transport_failed);
        assert_eq!(outcome.reply, TRANSPORT_APOLOGY);
        assert!(outcome.confirmation.is_none());
        // Extraction only runs after a successful reply.
        assert!(processor.store().is_empty());
    }

    #[tokio::test]
    async fn test_overview_reflects_store() {
        let mut processor = processor(Some("OK")).await;
        processor
            .process("add a review meeting on January 10th 2026")
            .await;

        let view = processor.overview();
        assert_eq!(view.upcoming.len(), 1);
        assert!(view.recent_past.is_empty());
    }
}
