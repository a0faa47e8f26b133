//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the in-memory store of interview sessions.

use interview_coach_core::{InterviewOrchestrator, InterviewSession};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<InterviewOrchestrator>,
    pub sessions: Arc<SessionStore>,
}

//=========================================================================================
// SessionStore (One Entry Per Interview)
//=========================================================================================

/// A handle to one interview. Holding the lock for a whole request keeps at most
/// one generation call outstanding per session.
pub type SessionHandle = Arc<Mutex<InterviewSession>>;

/// Active and ended interviews, keyed by session id. Nothing is persisted.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new session and returns its id.
    pub async fn insert(&self, session: InterviewSession) -> Uuid {
        let session_id = session.id();
        self.sessions
            .write()
            .await
            .insert(session_id, Arc::new(Mutex::new(session)));
        session_id
    }

    pub async fn get(&self, session_id: Uuid) -> Option<SessionHandle> {
        self.sessions.read().await.get(&session_id).cloned()
    }

    /// Removes a session so it can never be used again. Returns false if it was unknown.
    pub async fn discard(&self, session_id: Uuid) -> bool {
        let Some(handle) = self.sessions.write().await.remove(&session_id) else {
            return false;
        };
        // A request still holding the handle finishes on its own copy.
        match Arc::try_unwrap(handle) {
            Ok(session) => session.into_inner().discard(),
            Err(_) => info!(%session_id, "Session removed while a request was in flight."),
        }
        true
    }
}
