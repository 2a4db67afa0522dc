//! Data models shared by the API client, the session store and the controller.
//!
//! Notes are owned by the backend; the client only ever holds a cached copy.
//! Ids are opaque: backends hand out either JSON numbers or strings, and the
//! client echoes back whatever form it received.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

// ============================================================================
// Notes
// ============================================================================

/// Server-assigned note identifier.
///
/// Two ids are equal when their textual forms match, so `1` and `"1"` name
/// the same note.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteId {
    Number(i64),
    Text(String),
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteId::Number(n) => write!(f, "{}", n),
            NoteId::Text(s) => f.write_str(s),
        }
    }
}

impl PartialEq for NoteId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NoteId::Number(a), NoteId::Number(b)) => a == b,
            (NoteId::Text(a), NoteId::Text(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl Eq for NoteId {}

impl Hash for NoteId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl From<i64> for NoteId {
    fn from(n: i64) -> Self {
        NoteId::Number(n)
    }
}

impl From<&str> for NoteId {
    fn from(s: &str) -> Self {
        NoteId::Text(s.to_string())
    }
}

impl FromStr for NoteId {
    type Err = std::convert::Infallible;

    /// Numeric input becomes `Number`, anything else `Text`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(NoteId::Number)
            .unwrap_or_else(|_| NoteId::Text(s.to_string())))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    #[serde(default)]
    pub important: bool,
}

impl Note {
    /// Copy of this note with the importance flag flipped.
    pub fn toggled(&self) -> Note {
        Note {
            important: !self.important,
            ..self.clone()
        }
    }
}

/// Body of a create request. The backend assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub content: String,
    pub important: bool,
}

// ============================================================================
// Authentication
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Client-held proof of authentication, exactly as returned by `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub username: String,
    pub name: String,
    pub token: String,
}
