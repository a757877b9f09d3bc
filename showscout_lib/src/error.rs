//! Error types for the library layer.

use thiserror::Error;

/// The single error type surfaced to callers of the library.
///
/// Every variant renders a human-readable message; [`ShowError::status`]
/// exposes the HTTP status where one was received.
#[derive(Error, Debug)]
pub enum ShowError {
    /// Required configuration (the API token) is missing or unusable.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// HTTP 429 persisted through the single automatic retry.
    #[error("Rate limited by the API (HTTP 429), try again later")]
    RateLimited,
    /// Any other non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    /// Network failure before a status was received.
    #[error("Network error: {0}")]
    Transport(String),
    /// The response body did not have the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),
    /// Caller-provided input failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Failed to fetch data")]
    Unknown,
}

impl ShowError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited => Some(429),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether trying again later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited | Self::Transport(_) => true,
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<tmdb_api::Error> for ShowError {
    fn from(e: tmdb_api::Error) -> Self {
        match e {
            tmdb_api::Error::RateLimited => Self::RateLimited,
            tmdb_api::Error::HttpStatus { status, body } => Self::Http {
                status,
                message: if body.trim().is_empty() {
                    "request failed".to_string()
                } else {
                    body
                },
            },
            tmdb_api::Error::Transport(msg) => Self::Transport(msg),
            tmdb_api::Error::Decode(msg) => Self::Decode(msg),
            tmdb_api::Error::InvalidUrl(msg) => {
                Self::Configuration(format!("invalid API base URL: {}", msg))
            }
            tmdb_api::Error::RequestFailed => Self::Unknown,
        }
    }
}
