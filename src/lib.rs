//! Almanac: conversational calendar assistant core
//!
//! A user chats in free text, a remote assistant service replies in free
//! text, and this crate decides, from that free text alone, whether a
//! calendar event was requested or confirmed, maintaining a small persisted
//! event store accordingly. Extraction is a best-effort pattern cascade:
//! unparseable input silently creates nothing and never errors.

pub mod assistant;
pub mod calendar;
pub mod chat;
pub mod config;
pub mod error;
pub mod extraction;

pub use assistant::{AssistantService, WebhookAssistant};
pub use calendar::{
    overview, Event, EventPersistence, EventStore, EventsOverview, JsonFilePersistence,
    MemoryPersistence,
};
pub use chat::{
    ChatTurnProcessor, ConfirmationScanner, ExtractionOrchestrator, ScanOutcome, TurnExtraction,
    TurnOutcome, TRANSPORT_APOLOGY,
};
pub use config::Config;
pub use error::{AlmanacError, AssistantError, ConfigError, Result};
pub use extraction::{DateResolver, ResolvedDate, TimeRangeFinder, TitleExtractor};
