//! In-process stand-in for the notes backend, served by axum on an ephemeral
//! port.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tokio::task::JoinHandle;

use noteapp::{ApiClient, Credentials, NewNote, Note, NoteApp, NoteId, SessionStore, UserSession};

pub struct Account {
    pub password: &'static str,
    pub session: UserSession,
}

#[derive(Default)]
pub struct Backend {
    pub notes: Vec<Note>,
    pub next_id: i64,
    pub accounts: Vec<Account>,
    /// Bearer token seen on each create request, in arrival order.
    pub create_tokens: Vec<Option<String>>,
    pub update_tokens: Vec<Option<String>>,
    /// When set, `POST /login` answers with this status instead.
    pub login_status: Option<StatusCode>,
    /// When set, `PUT /notes/{id}` answers with this status instead.
    pub update_status: Option<StatusCode>,
}

pub type Shared = Arc<Mutex<Backend>>;

pub struct MockServer {
    pub url: String,
    pub state: Shared,
    handle: JoinHandle<()>,
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl MockServer {
    pub fn remove_note(&self, id: i64) {
        let target = NoteId::Number(id);
        self.state.lock().unwrap().notes.retain(|n| n.id != target);
    }

    pub fn server_notes(&self) -> Vec<Note> {
        self.state.lock().unwrap().notes.clone()
    }

    pub fn create_tokens(&self) -> Vec<Option<String>> {
        self.state.lock().unwrap().create_tokens.clone()
    }

    pub fn update_tokens(&self) -> Vec<Option<String>> {
        self.state.lock().unwrap().update_tokens.clone()
    }

    pub fn fail_login_with(&self, status: StatusCode) {
        self.state.lock().unwrap().login_status = Some(status);
    }

    pub fn fail_updates_with(&self, status: StatusCode) {
        self.state.lock().unwrap().update_status = Some(status);
    }
}

/// A listener that accepts connections and never answers them.
pub struct SilentServer {
    pub url: String,
    handle: JoinHandle<()>,
}

impl Drop for SilentServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_silent_backend() -> SilentServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind silent backend");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });

    SilentServer {
        url: format!("http://{}", addr),
        handle,
    }
}

pub fn note(id: i64, content: &str, important: bool) -> Note {
    Note {
        id: NoteId::Number(id),
        content: content.to_string(),
        important,
    }
}

pub fn alice() -> UserSession {
    UserSession {
        username: "alice".to_string(),
        name: "Alice Liddell".to_string(),
        token: "token-alice".to_string(),
    }
}

pub fn bob() -> UserSession {
    UserSession {
        username: "bob".to_string(),
        name: "Bob Tables".to_string(),
        token: "token-bob".to_string(),
    }
}

pub async fn spawn_backend(notes: Vec<Note>) -> MockServer {
    let state = Arc::new(Mutex::new(Backend {
        notes,
        next_id: 100,
        accounts: vec![
            Account {
                password: "sekret",
                session: alice(),
            },
            Account {
                password: "hunter2",
                session: bob(),
            },
        ],
        ..Backend::default()
    }));

    let app = Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/{id}", put(update_note))
        .route("/login", post(login))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    MockServer {
        url: format!("http://{}", addr),
        state,
        handle,
    }
}

/// A controller pointed at `server`, plus a handle on its session store.
pub fn app_for(server: &MockServer, error_ttl: Duration) -> (NoteApp, SessionStore) {
    let api = ApiClient::new(&server.url, Duration::from_secs(5)).unwrap();
    let store = SessionStore::temporary().unwrap();
    let app = NoteApp::new(api, store.clone()).with_error_ttl(error_ttl);
    (app, store)
}

// ============================================================================
// Handlers
// ============================================================================

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

async fn list_notes(State(state): State<Shared>) -> Json<Vec<Note>> {
    let notes = state.lock().unwrap().notes.clone();
    Json(notes)
}

async fn create_note(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<NewNote>,
) -> Result<(StatusCode, Json<Note>), StatusCode> {
    let mut backend = state.lock().unwrap();
    let token = bearer(&headers);
    backend.create_tokens.push(token.clone());

    let known = backend
        .accounts
        .iter()
        .any(|a| Some(&a.session.token) == token.as_ref());
    if !known {
        return Err(StatusCode::UNAUTHORIZED);
    }

    backend.next_id += 1;
    let created = Note {
        id: NoteId::Number(backend.next_id),
        content: body.content,
        important: body.important,
    };
    backend.notes.push(created.clone());
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_note(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Note>,
) -> Result<Json<Note>, StatusCode> {
    let mut backend = state.lock().unwrap();
    backend.update_tokens.push(bearer(&headers));
    if let Some(status) = backend.update_status {
        return Err(status);
    }

    let slot = backend
        .notes
        .iter_mut()
        .find(|n| n.id.to_string() == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = Note {
        id: slot.id.clone(),
        content: body.content,
        important: body.important,
    };
    Ok(Json(slot.clone()))
}

async fn login(
    State(state): State<Shared>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<UserSession>, StatusCode> {
    let backend = state.lock().unwrap();
    if let Some(status) = backend.login_status {
        return Err(status);
    }
    let session = backend
        .accounts
        .iter()
        .find(|a| a.session.username == credentials.username && a.password == credentials.password)
        .map(|a| a.session.clone());
    session.map(Json).ok_or(StatusCode::UNAUTHORIZED)
}
