//! Error types for the Box Panel client.
//!
//! # Design
//! Every failure is returned to the caller; nothing is retried or swallowed.
//! Non-2xx responses collapse into a single `Status` variant carrying the
//! numeric code, and the response body is not parsed in that case. Network
//! and decoder failures are wrapped verbatim so callers can inspect the
//! underlying ureq or serde_json error.

use thiserror::Error;

/// Result type alias using `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by `Client` and the resource services.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Creation parameters were rejected before any request was sent.
    #[error("invalid parameters: {0}")]
    Validation(String),

    /// The logical path could not be resolved into a valid URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// DNS, connect, TLS or I/O failure while talking to the server.
    #[error("transport error: {0}")]
    Transport(#[source] ureq::Error),

    /// The server answered outside the 2xx range.
    #[error("expected status 2xx, got {status}")]
    Status { status: u16 },

    /// The response body was not valid JSON or had an unexpected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The form body could not be encoded.
    #[error("failed to encode form body: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
}

impl ApiError {
    /// HTTP status code, if this error came from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}
