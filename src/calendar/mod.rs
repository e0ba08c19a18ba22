//! Calendar event storage and queries.
//!
//! The store is the single source of truth for everything the calendar
//! displays. It is loaded once at startup, mutated only by the chat-turn
//! extraction paths, and persisted in full after every mutation.

mod events;
pub mod query;
mod types;

pub use events::{EventPersistence, EventStore, JsonFilePersistence, MemoryPersistence};
pub use query::{overview, EventsOverview};
pub use types::Event;
