//! Remote assistant service integration.

mod client;

pub use client::{AssistantService, WebhookAssistant};
