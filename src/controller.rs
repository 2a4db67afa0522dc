//! View state controller.
//!
//! [`NoteApp`] owns everything the view renders: the cached notes, the
//! importance filter, the error banner, the login form fields and the current
//! user. User actions are `async` methods over `&mut self`, so at most one is
//! in flight per controller; dropping an action's future abandons its request
//! before any response is applied.

use std::time::Duration;

use tracing::{info, warn};

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::ClientError;
use crate::models::{Credentials, NewNote, Note, NoteId, UserSession};
use crate::notification::{Notification, DEFAULT_TTL};
use crate::session::SessionStore;
use crate::togglable::Togglable;

pub const WRONG_CREDENTIALS: &str = "Wrong credentials";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticating,
    Authenticated,
}

/// Values typed into the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Holds the auth state at `Authenticating` while a login request is in
/// flight and puts the previous state back when dropped, including when the
/// login future itself is dropped.
struct PendingLogin<'a> {
    auth: &'a mut AuthState,
    previous: AuthState,
}

impl<'a> PendingLogin<'a> {
    fn enter(auth: &'a mut AuthState) -> Self {
        let previous = *auth;
        *auth = AuthState::Authenticating;
        Self { auth, previous }
    }
}

impl Drop for PendingLogin<'_> {
    fn drop(&mut self) {
        *self.auth = self.previous;
    }
}

pub struct NoteApp {
    api: ApiClient,
    session_client: Option<ApiClient>,
    store: SessionStore,
    error_ttl: Duration,

    notes: Vec<Note>,
    notes_fresh: bool,
    show_all: bool,
    notification: Notification,
    login_form: LoginForm,
    user: Option<UserSession>,
    auth: AuthState,

    pub login_toggle: Togglable,
    pub note_toggle: Togglable,
}

impl NoteApp {
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self {
            api,
            session_client: None,
            store,
            error_ttl: DEFAULT_TTL,
            notes: Vec::new(),
            notes_fresh: false,
            show_all: true,
            notification: Notification::new(),
            login_form: LoginForm::default(),
            user: None,
            auth: AuthState::Anonymous,
            login_toggle: Togglable::new("login"),
            note_toggle: Togglable::new("new note"),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let api = ApiClient::new(&config.api_url, config.http_timeout)?;
        let store = SessionStore::open(&config.session_db)?;
        Ok(Self::new(api, store).with_error_ttl(config.error_ttl))
    }

    /// Override how long error messages stay visible.
    pub fn with_error_ttl(mut self, ttl: Duration) -> Self {
        self.error_ttl = ttl;
        self
    }

    // ========================================================================
    // Initialization
    // ========================================================================

    /// Load the note collection and restore any persisted session.
    ///
    /// Both run concurrently. The session is restored even when the fetch
    /// fails or is abandoned; the fetch error is shown in the banner and
    /// returned.
    pub async fn mount(&mut self) -> Result<(), ClientError> {
        let api = self.api.clone();
        let store = self.store.clone();
        let restore = async {
            if let Some(session) = store.load() {
                info!(username = %session.username, "restored session");
                self.apply_session(session);
            }
        };
        let (fetched, ()) = tokio::join!(async move { api.fetch_all().await }, restore);

        match fetched {
            Ok(notes) => {
                info!(count = notes.len(), "notes loaded");
                self.notes = notes;
                self.notes_fresh = true;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "could not load notes");
                self.show_error(format!("Could not load notes: {}", e));
                Err(e)
            }
        }
    }

    fn apply_session(&mut self, session: UserSession) {
        self.session_client = Some(self.api.with_token(session.token.clone()));
        self.user = Some(session);
        self.auth = AuthState::Authenticated;
    }

    // ========================================================================
    // Login
    // ========================================================================

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.login_form.username = username.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.login_form.password = password.into();
    }

    pub fn login_form(&self) -> &LoginForm {
        &self.login_form
    }

    /// Submit the values currently held in the login form.
    pub async fn submit_login_form(&mut self) -> Result<UserSession, ClientError> {
        let LoginForm { username, password } = self.login_form.clone();
        self.submit_login(&username, &password).await
    }

    /// Exchange credentials for a session, persist it and bind the API client
    /// to its token. On failure the stored session is left untouched.
    pub async fn submit_login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<UserSession, ClientError> {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };

        let result = {
            let _pending = PendingLogin::enter(&mut self.auth);
            self.api.login(&credentials).await
        };

        let session = match result {
            Ok(session) => session,
            Err(e) => {
                warn!(username, error = %e, "login failed");
                let message = match e {
                    ClientError::Unauthorized => WRONG_CREDENTIALS.to_string(),
                    ref other => format!("Login failed: {}", other),
                };
                self.show_error(message);
                return Err(e);
            }
        };

        if let Err(e) = self.store.save(&session) {
            warn!(error = %e, "could not persist session");
            self.show_error(format!("Could not save session: {}", e));
            return Err(e);
        }

        info!(username = %session.username, "logged in");
        self.apply_session(session.clone());
        self.login_form = LoginForm::default();
        self.login_toggle.hide();
        Ok(session)
    }

    /// Forget the persisted session and return to anonymous.
    pub fn logout(&mut self) -> Result<(), ClientError> {
        self.store.clear()?;
        if let Some(user) = self.user.take() {
            info!(username = %user.username, "logged out");
        }
        self.session_client = None;
        self.auth = AuthState::Anonymous;
        Ok(())
    }

    // ========================================================================
    // Notes
    // ========================================================================

    /// Create a note. The note is appended only once the server confirms it.
    pub async fn submit_note(
        &mut self,
        content: impl Into<String>,
        important: bool,
    ) -> Result<Note, ClientError> {
        let client = self
            .session_client
            .clone()
            .ok_or(ClientError::NotAuthenticated)?;
        self.note_toggle.hide();

        let new_note = NewNote {
            content: content.into(),
            important,
        };
        match client.create(&new_note).await {
            Ok(note) => {
                info!(id = %note.id, "note created");
                self.notes.push(note.clone());
                Ok(note)
            }
            Err(e) => {
                warn!(error = %e, "could not create note");
                self.show_error(format!("Could not create note: {}", e));
                Err(e)
            }
        }
    }

    /// Flip the importance flag of note `id` on the server.
    ///
    /// If the server no longer has the note it is removed locally and the
    /// banner names its content.
    pub async fn toggle_importance(&mut self, id: &NoteId) -> Result<Note, ClientError> {
        let note = self
            .notes
            .iter()
            .find(|n| n.id == *id)
            .cloned()
            .ok_or_else(|| ClientError::UnknownNote(id.to_string()))?;
        let changed = note.toggled();

        let result = self.client().update(id, &changed).await;
        match result {
            Ok(returned) => {
                if let Some(slot) = self.notes.iter_mut().find(|n| n.id == *id) {
                    *slot = returned.clone();
                }
                Ok(returned)
            }
            Err(e @ ClientError::NotFound(_)) => {
                warn!(%id, "note already removed from server");
                self.notes.retain(|n| n.id != *id);
                self.show_error(format!(
                    "Note '{}' was already removed from server",
                    note.content
                ));
                Err(e)
            }
            Err(e) => {
                warn!(%id, error = %e, "could not update note");
                self.show_error(format!("Could not update note '{}': {}", note.content, e));
                Err(e)
            }
        }
    }

    /// Session-bound client when logged in, anonymous otherwise.
    fn client(&self) -> &ApiClient {
        self.session_client.as_ref().unwrap_or(&self.api)
    }

    pub fn toggle_filter(&mut self) {
        self.show_all = !self.show_all;
    }

    /// Label for the filter button.
    pub fn filter_label(&self) -> &'static str {
        if self.show_all {
            "show important"
        } else {
            "show all"
        }
    }

    /// The notes the view should render under the current filter.
    pub fn notes_to_show(&self) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|n| self.show_all || n.important)
            .collect()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn notes_fresh(&self) -> bool {
        self.notes_fresh
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn user(&self) -> Option<&UserSession> {
        self.user.as_ref()
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth
    }

    pub fn error_message(&self) -> Option<String> {
        self.notification.current()
    }

    fn show_error(&mut self, message: String) {
        self.notification.show(message, self.error_ttl);
    }
}
