//! Error types for the Deck client.

use thiserror::Error;

/// Errors returned by [`DeckClient`](super::DeckClient).
#[derive(Debug, Error)]
pub enum DeckError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Deck answered with anything other than `200 OK`
    #[error("Deck API returned error status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Base URL is not an http(s) URL
    #[error("Invalid Nextcloud URL: {0}")]
    InvalidUrl(String),

    /// The instance cannot be migrated to
    #[error("{0}")]
    Incompatible(String),
}

impl DeckError {
    /// HTTP status of a rejected request, if that is what failed.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
