//! Error types for the almanac assistant.
//!
//! Extraction misses (no date, no title, no time range) are not errors;
//! they are `Option::None` and never surface here.

use thiserror::Error;

/// Main error type for almanac operations.
#[derive(Error, Debug)]
pub enum AlmanacError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Assistant error: {0}")]
    Assistant(#[from] AssistantError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Errors from the remote assistant service.
///
/// Any of these is a transport failure in the sense of the turn contract:
/// the user gets an apology message and the turn completes normally.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Assistant service returned HTTP {0}")]
    Status(u16),
}

/// Result type alias for almanac operations.
pub type Result<T> = std::result::Result<T, AlmanacError>;
