//! Typed HTTP client for the notes backend.
//!
//! Routes consumed:
//! - `GET  /notes`      → all notes
//! - `POST /notes`      → create (bearer token required)
//! - `PUT  /notes/{id}` → replace, 404 when the note is gone
//! - `POST /login`      → exchange credentials for a session
//!
//! A client carries at most one bearer token. Rather than mutating a shared
//! client on login, [`ApiClient::with_token`] returns a new client bound to the
//! session; both share the same connection pool.

use reqwest::{RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::debug;

use crate::error::ClientError;
use crate::models::{Credentials, NewNote, Note, NoteId, UserSession};

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            token: None,
        })
    }

    /// A client whose authenticated calls carry `token`.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            base_url: self.base_url.clone(),
            http: self.http.clone(),
            token: Some(token.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn notes_url(&self) -> String {
        format!("{}/notes", self.base_url)
    }

    fn note_url(&self, id: &NoteId) -> String {
        format!(
            "{}/notes/{}",
            self.base_url,
            urlencoding::encode(&id.to_string())
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    // ========================================================================
    // Notes
    // ========================================================================

    pub async fn fetch_all(&self) -> Result<Vec<Note>, ClientError> {
        debug!(url = %self.notes_url(), "fetching notes");
        let response = self.http.get(self.notes_url()).send().await?;
        let notes: Vec<Note> = success(response)?.json().await?;
        debug!(count = notes.len(), "notes fetched");
        Ok(notes)
    }

    pub async fn create(&self, note: &NewNote) -> Result<Note, ClientError> {
        debug!(content = %note.content, "creating note");
        let request = self.authorize(self.http.post(self.notes_url()).json(note));
        let response = request.send().await?;
        Ok(success(response)?.json().await?)
    }

    /// Replace the note stored under `id`. A vanished note yields
    /// [`ClientError::NotFound`].
    pub async fn update(&self, id: &NoteId, note: &Note) -> Result<Note, ClientError> {
        debug!(%id, important = note.important, "updating note");
        let request = self.authorize(self.http.put(self.note_url(id)).json(note));
        let response = request.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(id.to_string()));
        }
        Ok(success(response)?.json().await?)
    }

    // ========================================================================
    // Login
    // ========================================================================

    pub async fn login(&self, credentials: &Credentials) -> Result<UserSession, ClientError> {
        debug!(username = %credentials.username, "logging in");
        let response = self
            .http
            .post(format!("{}/login", self.base_url))
            .json(credentials)
            .send()
            .await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        Ok(success(response)?.json().await?)
    }
}

fn success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ClientError::Status(status.as_u16()))
    }
}
