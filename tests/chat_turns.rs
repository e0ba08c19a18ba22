//! End-to-end chat turn tests.
//!
//! These drive the full stack below the network: a scripted assistant
//! stands in for the remote service, and the real orchestrator, extraction
//! primitives, and store run underneath.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;

use almanac::{
    AssistantError, AssistantService, ChatTurnProcessor, Event, EventStore,
    ExtractionOrchestrator, JsonFilePersistence, MemoryPersistence, Result, TRANSPORT_APOLOGY,
};

/// Assistant double that pops scripted replies in order; an empty script
/// simulates a transport failure.
struct ScriptedAssistant {
    replies: Mutex<Vec<String>>,
}

impl ScriptedAssistant {
    fn with_replies(replies: &[&str]) -> Self {
        // Stored reversed so pop() yields them in order.
        let mut replies: Vec<String> = replies.iter().map(|r| r.to_string()).collect();
        replies.reverse();
        Self {
            replies: Mutex::new(replies),
        }
    }

    fn failing() -> Self {
        Self {
            replies: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AssistantService for ScriptedAssistant {
    async fn send(&self, _chat_input: &str, _session_id: &str) -> Result<String> {
        self.replies
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| AssistantError::Status(503).into())
    }
}

fn orchestrator() -> ExtractionOrchestrator {
    // Monday, January 5th, 2026.
    ExtractionOrchestrator::with_reference_date(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
}

async fn processor(
    assistant: ScriptedAssistant,
) -> ChatTurnProcessor<ScriptedAssistant, MemoryPersistence> {
    ChatTurnProcessor::new(
        assistant,
        orchestrator(),
        EventStore::load(MemoryPersistence::new()).await,
        "test-session",
    )
}

#[tokio::test]
async fn scheduling_request_creates_event_and_confirms() {
    let assistant = ScriptedAssistant::with_replies(&["I'd be happy to help you study!"]);
    let mut processor = processor(assistant).await;

    let outcome = processor
        .process("Can you schedule a study session on January 17th 2026 from 5pm to 6pm")
        .await;

    assert_eq!(outcome.reply, "I'd be happy to help you study!");
    let confirmation = outcome.confirmation.expect("direct path should confirm");
    assert_eq!(
        confirmation,
        "I've added \"study session\" to your calendar on January 17th 2026 from 5pm to 6pm!"
    );

    let events = processor.store().events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].date, "2026-01-17");
    assert_eq!(events[0].title, "study session");
    assert_eq!(events[0].time.as_deref(), Some("5pm to 6pm"));
}

#[tokio::test]
async fn assistant_confirmation_is_captured_without_user_keywords() {
    let assistant = ScriptedAssistant::with_replies(&[
        r#"All set! I've scheduled "Morning yoga" for you on Tuesday, January 6, 2026."#,
    ]);
    let mut processor = processor(assistant).await;

    let outcome = processor.process("how does tomorrow look").await;

    // No keyword gate pass, no direct-path confirmation, but the reply
    // scan still stores the confirmed event.
    assert!(outcome.confirmation.is_none());
    let events = processor.store().events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Morning yoga");
    assert_eq!(events[0].date, "2026-01-06");
}

#[tokio::test]
async fn repeated_assistant_confirmation_stays_deduplicated() {
    let reply = r#"I've added "Dentist" on February 3, 2026."#;
    let assistant = ScriptedAssistant::with_replies(&[reply, reply]);
    let mut processor = processor(assistant).await;

    processor.process("thanks").await;
    processor.process("thanks again").await;

    assert_eq!(processor.store().len(), 1);
}

#[tokio::test]
async fn repeated_user_request_duplicates_by_design() {
    let assistant = ScriptedAssistant::with_replies(&["Done!", "Done again!"]);
    let mut processor = processor(assistant).await;

    let request = "schedule a study session on January 17th 2026";
    processor.process(request).await;
    processor.process(request).await;

    // The direct path performs no dedup; asking twice stores twice.
    assert_eq!(processor.store().len(), 2);
}

#[tokio::test]
async fn delete_reply_empties_store() {
    let assistant = ScriptedAssistant::with_replies(&[
        "Sure!",
        "Okay, I went ahead and deleted all events from your calendar.",
    ]);
    let mut processor = processor(assistant).await;

    processor
        .process("schedule a study session on January 17th 2026")
        .await;
    assert_eq!(processor.store().len(), 1);

    processor.process("clear my calendar").await;
    assert!(processor.store().is_empty());
}

#[tokio::test]
async fn transport_failure_apologizes_and_extracts_nothing() {
    let mut processor = processor(ScriptedAssistant::failing()).await;

    let outcome = processor
        .process("schedule a study session on January 17th 2026")
        .await;

    assert!(outcome.transport_failed);
    assert_eq!(outcome.reply, TRANSPORT_APOLOGY);
    assert!(outcome.confirmation.is_none());
    assert!(processor.store().is_empty());
}

#[tokio::test]
async fn overview_partitions_upcoming_and_recent_past() {
    let store = EventStore::load(MemoryPersistence::with_events(vec![
        Event::new("2025-12-01", "old checkup"),
        Event::new("2025-12-20", "year-end review"),
        Event::new("2025-11-11", "older errand"),
        Event::new("2026-01-06", "standup"),
        Event::new("2026-02-14", "dinner"),
    ]))
    .await;

    let processor = ChatTurnProcessor::new(
        ScriptedAssistant::with_replies(&[]),
        orchestrator(),
        store,
        "test-session",
    );

    let view = processor.overview();
    let upcoming: Vec<&str> = view.upcoming.iter().map(|e| e.date.as_str()).collect();
    assert_eq!(upcoming, ["2026-01-06", "2026-02-14"]);

    // Only the two most recent past events, most recent first.
    let past: Vec<&str> = view.recent_past.iter().map(|e| e.date.as_str()).collect();
    assert_eq!(past, ["2025-12-20", "2025-12-01"]);
}

#[tokio::test]
async fn events_survive_a_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = EventStore::load(JsonFilePersistence::new(dir.path())).await;
        let mut processor = ChatTurnProcessor::new(
            ScriptedAssistant::with_replies(&["Done!"]),
            orchestrator(),
            store,
            "test-session",
        );
        processor
            .process("schedule a study session on January 17th 2026")
            .await;
    }

    // A fresh processor over the same data directory sees the event.
    let store = EventStore::load(JsonFilePersistence::new(dir.path())).await;
    assert_eq!(store.len(), 1);
    assert_eq!(store.events()[0].title, "study session");
}
