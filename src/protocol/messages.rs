//! Request and response message types
//!
//! A [`Request`] enters the application, is rewritten by request filters and
//! routed to agents. Whatever comes back is wrapped in a [`Response`] carrying
//! a [`ResponseStatus`] so that "nobody could route this" and "nobody
//! answered" are ordinary values rather than errors.

use crate::agent::AgentResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Incoming textual request
///
/// Requests are immutable values: filters consume one and return a new one.
///
/// # Examples
/// ```
/// use agent_dispatch::protocol::Request;
///
/// let request = Request::new("What is the weather today?");
/// let rewritten = request.with_text("what is the weather today");
/// assert_eq!(rewritten.text, "what is the weather today");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Request {
    /// UUID v4 request identifier
    pub id: String,
    /// Request text as currently rewritten by filters
    pub text: String,
    /// Session this request belongs to, if the caller is continuing one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl Request {
    /// Create a request with a fresh identifier and no session
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            session_id: None,
        }
    }

    /// Create a request continuing an existing session
    pub fn with_session<S: Into<String>, I: Into<String>>(text: S, session_id: I) -> Self {
        Self {
            session_id: Some(session_id.into()),
            ..Self::new(text)
        }
    }

    /// Return a copy of this request with replaced text, keeping id and session
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        Self {
            id: self.id.clone(),
            text: text.into(),
            session_id: self.session_id.clone(),
        }
    }
}

/// Status codes for a request-response cycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatusCode {
    Success,
    /// Router returned zero candidate agents
    NoAvailableAgent,
    /// Router returned candidates but none of them answered
    NoResponseFromAgent,
    InvalidRequest,
    InternalError,
    AgentDidNotUnderstandRequest,
    AgentDidNotKnowAnswer,
    AgentInternalError,
}

impl StatusCode {
    /// Human readable default message for this code
    pub fn default_message(self) -> &'static str {
        match self {
            StatusCode::Success => "Success",
            StatusCode::NoAvailableAgent => "No agent was available to handle the request",
            StatusCode::NoResponseFromAgent => "The agent did not provide a response",
            StatusCode::InvalidRequest => "The request was not valid",
            StatusCode::InternalError => "Something failed with this request",
            StatusCode::AgentDidNotUnderstandRequest => {
                "The agent did not understand the request"
            }
            StatusCode::AgentDidNotKnowAnswer => "The agent did not know the answer",
            StatusCode::AgentInternalError => "The agent failed while processing the request",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, StatusCode::Success)
    }
}

/// Status code plus message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseStatus {
    pub code: StatusCode,
    pub message: String,
}

impl ResponseStatus {
    /// Status with the code's default message
    pub fn new(code: StatusCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
        }
    }

    /// Status with a custom message
    pub fn with_message<S: Into<String>>(code: StatusCode, message: S) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn success() -> Self {
        Self::new(StatusCode::Success)
    }

    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }
}

/// Kind of payload a response carries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Json,
    Error,
}

/// Final response returned to the caller of `Application::process`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    pub status: ResponseStatus,
}

impl Response {
    /// Successful plain text response
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            response_type: ResponseType::Text,
            text: Some(text.into()),
            payload: None,
            status: ResponseStatus::success(),
        }
    }

    /// Response that only carries a status (no text)
    ///
    /// Non-success statuses produce an `Error` typed response.
    pub fn from_status(status: ResponseStatus) -> Self {
        let response_type = if status.is_success() {
            ResponseType::Text
        } else {
            ResponseType::Error
        };
        Self {
            response_type,
            text: None,
            payload: None,
            status,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status.code
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Return a copy of this response with replaced text
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        Self {
            text: Some(text.into()),
            ..self.clone()
        }
    }
}

impl From<AgentResponse> for Response {
    fn from(agent_response: AgentResponse) -> Self {
        let response_type = if !agent_response.status.is_success() {
            ResponseType::Error
        } else if agent_response.payload.is_some() {
            ResponseType::Json
        } else {
            ResponseType::Text
        };

        Self {
            response_type,
            text: agent_response.text,
            payload: agent_response.payload,
            status: agent_response.status,
        }
    }
}
