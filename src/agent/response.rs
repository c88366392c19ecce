//! Agent request and response values
//!
//! An [`AgentRequest`] is what a single agent sees: the filtered request text,
//! the configured user and the session snapshot. Agents answer with an
//! [`AgentResponse`] or decline by returning `None`.

use crate::protocol::{ResponseStatus, StatusCode};
use crate::session::Session;
use crate::users::User;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input handed to an agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub session: Session,
}

impl AgentRequest {
    pub fn new<S: Into<String>>(text: S, user: Option<User>, session: Session) -> Self {
        Self {
            text: text.into(),
            user,
            session,
        }
    }
}

/// Answer produced by an agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentResponse {
    pub text: Option<String>,
    /// Structured data for JSON responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    pub status: ResponseStatus,
}

impl AgentResponse {
    /// Successful text answer
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            text: Some(text.into()),
            payload: None,
            status: ResponseStatus::success(),
        }
    }

    /// Successful answer with structured payload
    pub fn json<S: Into<String>>(text: S, payload: Value) -> Self {
        Self {
            text: Some(text.into()),
            payload: Some(payload),
            status: ResponseStatus::success(),
        }
    }

    /// Answer that only reports a status, e.g. `AgentDidNotKnowAnswer`
    pub fn from_status(status: ResponseStatus) -> Self {
        Self {
            text: None,
            payload: None,
            status,
        }
    }

    /// Shorthand for a status answer using the code's default message
    pub fn from_code(code: StatusCode) -> Self {
        Self::from_status(ResponseStatus::new(code))
    }
}
