//! Durable session storage.
//!
//! The logged-in user is kept as a single JSON record under one key in a sled
//! database. A missing or unreadable record simply means "not logged in".

use std::path::Path;

use tracing::{debug, warn};

use crate::error::ClientError;
use crate::models::UserSession;

/// Key holding the JSON-encoded session record.
pub const SESSION_KEY: &str = "loggedNoteappUser";

#[derive(Clone)]
pub struct SessionStore {
    db: sled::Db,
}

impl SessionStore {
    /// Open (or create) the session database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// A store that lives only as long as the process. Used by tests.
    pub fn temporary() -> Result<Self, ClientError> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }

    /// Read the persisted session, if any.
    pub fn load(&self) -> Option<UserSession> {
        let bytes = match self.db.get(SESSION_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "could not read session record");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(error = %e, "ignoring malformed session record");
                None
            }
        }
    }

    /// Persist `session`, replacing whatever was stored before.
    pub fn save(&self, session: &UserSession) -> Result<(), ClientError> {
        let json = serde_json::to_vec(session)?;
        self.db.insert(SESSION_KEY, json)?;
        self.db.flush()?;
        debug!(username = %session.username, "session saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        self.db.remove(SESSION_KEY)?;
        self.db.flush()?;
        Ok(())
    }
}
