//! Error types for the notes client.

use thiserror::Error;

/// All errors that can surface from the session store, the API client or the
/// view state controller.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a usable response (connection, timeout,
    /// undecodable body).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend rejected the username/password pair.
    #[error("Wrong credentials")]
    Unauthorized,

    /// An update targeted a note the backend no longer has.
    #[error("Note {0} not found on server")]
    NotFound(String),

    /// Any other non-success HTTP status.
    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// An authenticated action was attempted without a session.
    #[error("Not logged in")]
    NotAuthenticated,

    /// The note id is not present in the local collection.
    #[error("Unknown note: {0}")]
    UnknownNote(String),

    /// The durable session storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] sled::Error),

    /// A session record could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An environment setting could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// True for the update-conflict case the controller reconciles locally.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}
