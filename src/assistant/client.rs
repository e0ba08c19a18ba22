//! Remote assistant service client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::error::{AssistantError, Result};

/// The remote conversational assistant.
///
/// Implementations exchange one user message for one free-text reply.
/// The reply is scanned by the extraction layer; nothing here interprets
/// it.
#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Send a chat message and return the assistant's reply text.
    async fn send(&self, chat_input: &str, session_id: &str) -> Result<String>;
}

/// Chat request wire format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest<'a> {
    chat_input: &'a str,
    session_id: &'a str,
}

/// Webhook-backed assistant client.
pub struct WebhookAssistant {
    client: Client,
    webhook_url: String,
}

impl WebhookAssistant {
    /// Create a client for the given webhook URL.
    pub fn new(webhook_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(AssistantError::Request)?;

        Ok(Self {
            client,
            webhook_url: webhook_url.to_string(),
        })
    }
}

#[async_trait]
impl AssistantService for WebhookAssistant {
    async fn send(&self, chat_input: &str, session_id: &str) -> Result<String> {
        let request = ChatRequest {
            chat_input,
            session_id,
        };

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&request)
            .send()
            .await
            .map_err(AssistantError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::Status(status.as_u16()).into());
        }

        let body: serde_json::Value = response.json().await.map_err(AssistantError::Request)?;
        Ok(extract_reply_text(&body))
    }
}

/// Pull the reply text out of a response body.
///
/// The service replies either with a bare string or with an object whose
/// text lives under `output`, `message`, or `response` (checked in that
/// priority). Anything else is stringified wholesale as a last resort.
fn extract_reply_text(body: &serde_json::Value) -> String {
    if let Some(text) = body.as_str() {
        return text.to_string();
    }

    for key in ["output", "message", "response"] {
        if let Some(text) = body.get(key).and_then(|v| v.as_str()) {
            return text.to_string();
        }
    }

    body.to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_string_reply() {
        let body = json!("Sure, I can help with that.");
        assert_eq!(extract_reply_text(&body), "Sure, I can help with that.");
    }

    #[test]
    fn test_output_field_preferred() {
        let body = json!({
            "output": "from output",
            "message": "from message",
            "response": "from response",
        });
        assert_eq!(extract_reply_text(&body), "from output");
    }

    #[test]
    fn test_message_then_response_fallback() {
        let body = json!({ "message": "from message", "response": "from response" });
        assert_eq!(extract_reply_text(&body), "from message");

        let body = json!({ "response": "from response" });
        assert_eq!(extract_reply_text(&body), "from response");
    }

    #[test]
    fn test_unknown_shape_is_stringified() {
        let body = json!({ "data": { "noise": 1 } });
        assert_eq!(extract_reply_text(&body), r#"{"data":{"noise":1}}"#);
    }

    #[test]
    fn test_non_string_priority_field_is_skipped() {
        // `output` holding a non-string falls through to `message`.
        let body = json!({ "output": 42, "message": "text" });
        assert_eq!(extract_reply_text(&body), "text");
    }

    #[test]
    fn test_request_wire_format() {
        let request = ChatRequest {
            chat_input: "hello",
            session_id: "abc-123",
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({ "chatInput": "hello", "sessionId": "abc-123" }));
    }
}
