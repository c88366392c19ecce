//! Agent Dispatch - Rust Implementation
//!
//! A request-dispatch framework: textual requests are routed to handler
//! agents through a keyword decision tree, answered by the first candidate
//! that responds, and recorded in sessions and reports.
//!
//! # Overview
//!
//! This crate provides:
//! - Request, response and status types
//! - Keyword decision trees and pluggable routers
//! - The application dispatch loop with request and response filters
//! - Session and report capabilities with in-memory defaults
//! - TOML configuration, structured logging and dispatch metrics
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use agent_dispatch::agent::{Agent, AgentRequest, AgentResponse};
//! use agent_dispatch::application::ApplicationBuilder;
//! use agent_dispatch::protocol::{Request, StatusCode};
//! use agent_dispatch::routing::{KeywordNode, LeafNode, Node, TreeRouter};
//!
//! struct Weather;
//!
//! impl Agent for Weather {
//!     fn name(&self) -> &str {
//!         "weather"
//!     }
//!
//!     fn process(&self, _request: &AgentRequest) -> Option<AgentResponse> {
//!         Some(AgentResponse::text("Sunny and warm"))
//!     }
//! }
//!
//! let root = Node::from(
//!     KeywordNode::new(
//!         "weather",
//!         Node::from(LeafNode::single(Arc::new(Weather))),
//!         Node::from(LeafNode::empty()),
//!     )
//!     .unwrap(),
//! );
//! let app = ApplicationBuilder::new(Arc::new(TreeRouter::new(root))).build();
//!
//! let response = app.process(Request::new("What's the Weather like?"));
//! assert_eq!(response.text.as_deref(), Some("Sunny and warm"));
//!
//! let response = app.process(Request::new("Tell me a joke"));
//! assert_eq!(response.status_code(), StatusCode::NoAvailableAgent);
//! ```

pub mod agent;
pub mod application;
pub mod config;
pub mod error;
pub mod filters;
pub mod observability;
pub mod protocol;
pub mod reporting;
pub mod routing;
pub mod session;
pub mod testing;
pub mod tokenizer;
pub mod users;

pub use agent::{Agent, AgentRegistry, AgentRequest, AgentResponse};
pub use application::{Application, ApplicationBuilder, ShutdownListener};
pub use config::*;
pub use error::{DispatchError, DispatchResult, SessionError, TreeError};
pub use protocol::*;
pub use routing::{Node, Router, TreeRouter};
