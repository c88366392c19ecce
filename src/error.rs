//! Error types for the dispatch framework
//!
//! Routing outcomes (no candidates, no answer) are never errors: they are
//! carried as [`StatusCode`](crate::protocol::StatusCode) values on the
//! response. The types here cover tree construction, configuration loading
//! and session service failures.

use thiserror::Error;

/// Errors raised while building or misusing a routing tree
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Invalid keyword '{keyword}': {reason}")]
    InvalidKeyword { keyword: String, reason: String },

    #[error("Leaf nodes have no children to select from")]
    LeafHasNoChildren,

    #[error("Tree depth {depth} exceeds maximum {max}")]
    DepthExceeded { depth: usize, max: usize },

    #[error("Unknown agent referenced by routing tree: {0}")]
    UnknownAgent(String),
}

impl TreeError {
    /// Create invalid keyword error
    pub fn invalid_keyword<K: Into<String>, R: Into<String>>(keyword: K, reason: R) -> Self {
        Self::InvalidKeyword {
            keyword: keyword.into(),
            reason: reason.into(),
        }
    }
}

/// Errors reported by a [`SessionService`](crate::session::SessionService)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session storage unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error type for the crate
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Routing tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Result type for dispatch operations
pub type DispatchResult<T> = Result<T, DispatchError>;
