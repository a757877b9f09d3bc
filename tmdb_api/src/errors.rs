//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be sent and the failure does not fit any other kind.
    #[error("Request failed")]
    RequestFailed,
    /// The endpoint URL could not be constructed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The API answered with HTTP 429.
    #[error("Rate limited (HTTP 429)")]
    RateLimited,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// Connection, DNS, or timeout failure before a status was received.
    #[error("Transport error: {0}")]
    Transport(String),
    /// The response body was not valid JSON.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl Error {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() || e.is_connect() || e.is_request() {
            Error::Transport(e.to_string())
        } else if e.is_decode() || e.is_body() {
            Error::Decode(e.to_string())
        } else {
            Error::RequestFailed
        }
    }
}
