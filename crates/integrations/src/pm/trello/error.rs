//! Error types for the Trello reader.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading from Trello.
#[derive(Debug, Error)]
pub enum TrelloError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Trello rejected the request
    #[error("Trello API returned error status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response or export could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Export file could not be read
    #[error("Failed to read Trello export {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Board id unknown to the source
    #[error("Board not found: {0}")]
    BoardNotFound(String),
}
