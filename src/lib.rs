//! Notes client library.
//!
//! A client for a small note-taking backend: it lists notes, flips their
//! importance, creates new ones and logs a user in, remembering the session
//! between runs.
//!
//! - `models`: notes, credentials and the user session
//! - `session`: durable storage of the logged-in user
//! - `api`: HTTP client for the backend routes
//! - `notification`: auto-clearing error banner
//! - `togglable`: show/hide state for collapsible forms
//! - `controller`: the view state and the user actions that change it
//! - `cli`: command-line front end

pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod notification;
pub mod session;
pub mod togglable;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::Config;
pub use controller::{AuthState, LoginForm, NoteApp, WRONG_CREDENTIALS};
pub use error::ClientError;
pub use models::{Credentials, NewNote, Note, NoteId, UserSession};
pub use notification::{Notification, DEFAULT_TTL};
pub use session::{SessionStore, SESSION_KEY};
pub use togglable::Togglable;
