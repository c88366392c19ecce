//! Conversation sessions
//!
//! A [`Session`] accumulates the exchanges of one conversation. The
//! application only talks to sessions through the [`SessionService`] trait;
//! [`InMemorySessionService`] is the thread-safe default.

use crate::error::SessionError;
use crate::protocol::{Request, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Default number of exchanges kept per session
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// One request-response exchange recorded in a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionObject {
    pub request_id: String,
    /// Request after all request filters ran
    pub request: Request,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Response>,
    pub timestamp: DateTime<Utc>,
}

impl SessionObject {
    pub fn new(request: Request) -> Self {
        Self {
            request_id: request.id.clone(),
            request,
            response: None,
            timestamp: Utc::now(),
        }
    }
}

/// Conversation state keyed by identifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub history: Vec<SessionObject>,
}

impl Session {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            history: Vec::new(),
        }
    }

    /// Most recent exchange, if any
    pub fn last_exchange(&self) -> Option<&SessionObject> {
        self.history.last()
    }
}

/// Session storage capability consumed by the application
pub trait SessionService: Send + Sync {
    /// Create a new empty session and return its identifier
    fn create(&self) -> Result<String, SessionError>;

    /// Fetch a snapshot of a session
    fn get_session(&self, session_id: &str) -> Result<Session, SessionError>;

    /// Record an exchange in a session
    fn update(&self, session_id: &str, exchange: SessionObject) -> Result<(), SessionError>;
}

/// Drop the oldest exchanges so that at most `max` remain
fn cap_history(history: &mut Vec<SessionObject>, max: usize) {
    if history.len() > max {
        let overflow = history.len() - max;
        history.drain(0..overflow);
    }
}

/// Thread-safe in-process session store
#[derive(Debug)]
pub struct InMemorySessionService {
    sessions: RwLock<HashMap<String, Session>>,
    history_limit: usize,
}

impl Default for InMemorySessionService {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionService {
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create a store keeping at most `history_limit` exchanges per session
    pub fn with_history_limit(history_limit: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            history_limit,
        }
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    /// Remove a session, returning it if it existed
    pub fn remove(&self, session_id: &str) -> Result<Option<Session>, SessionError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionError::Unavailable("session lock poisoned".to_string()))?;
        Ok(sessions.remove(session_id))
    }
}

impl SessionService for InMemorySessionService {
    fn create(&self) -> Result<String, SessionError> {
        let id = Uuid::new_v4().to_string();
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionError::Unavailable("session lock poisoned".to_string()))?;
        sessions.insert(id.clone(), Session::new(id.clone()));
        info!(session_id = %id, "Created session");
        Ok(id)
    }

    fn get_session(&self, session_id: &str) -> Result<Session, SessionError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| SessionError::Unavailable("session lock poisoned".to_string()))?;
        sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
    }

    fn update(&self, session_id: &str, exchange: SessionObject) -> Result<(), SessionError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionError::Unavailable("session lock poisoned".to_string()))?;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;

        session.history.push(exchange);
        if session.history.len() > self.history_limit {
            let dropped = session.history.len() - self.history_limit;
            cap_history(&mut session.history, self.history_limit);
            debug!(
                session_id = %session_id,
                dropped = dropped,
                kept = self.history_limit,
                "Session history exceeded cap; dropped oldest exchanges"
            );
        }
        Ok(())
    }
}
