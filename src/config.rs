//! TOML configuration for a dispatch application
//!
//! A configuration names the application, optionally pins the single user,
//! bounds session history and describes the routing strategy. Agents are not
//! configured here; routing refers to them by name and the names are resolved
//! against an [`AgentRegistry`] when the router is built.

use crate::agent::AgentRegistry;
use crate::error::TreeError;
use crate::routing::{NodeConfig, Router, SingleAgentRouter, TreeRouter, DEFAULT_MAX_TREE_DEPTH};
use crate::session::DEFAULT_HISTORY_LIMIT;
use crate::users::User;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Main dispatch configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DispatchConfig {
    pub application: ApplicationSection,
    /// Single user passed to every agent invocation (optional)
    pub user: Option<User>,
    #[serde(default)]
    pub session: SessionSection,
    pub routing: RoutingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApplicationSection {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSection {
    /// Maximum exchanges kept per session (default: 100)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingConfig {
    /// Routing strategy: "tree" or "single"
    pub strategy: RoutingStrategy,

    /// Deepest keyword tree accepted (default: 32)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Agent name (required if strategy = "single")
    pub agent: Option<String>,

    /// Decision tree (required if strategy = "tree")
    pub tree: Option<NodeConfig>,
}

/// Routing strategy selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoutingStrategy {
    Tree,
    Single,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_TREE_DEPTH
}

impl RoutingConfig {
    /// Validate routing configuration consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidConfig(
                "routing.max_depth must be greater than zero".to_string(),
            ));
        }

        match self.strategy {
            RoutingStrategy::Tree => {
                let tree = self.tree.as_ref().ok_or_else(|| {
                    ConfigError::InvalidConfig(
                        "Tree routing strategy requires [routing.tree] configuration".to_string(),
                    )
                })?;
                let depth = tree.depth();
                if depth > self.max_depth {
                    return Err(ConfigError::InvalidConfig(format!(
                        "routing tree depth {depth} exceeds max_depth {}",
                        self.max_depth
                    )));
                }
            }
            RoutingStrategy::Single => match self.agent.as_deref() {
                Some(name) if !name.trim().is_empty() => {}
                _ => {
                    return Err(ConfigError::InvalidConfig(
                        "Single routing strategy requires routing.agent".to_string(),
                    ));
                }
            },
        }
        Ok(())
    }

    /// Build the configured router, resolving agent names against `registry`
    pub fn build_router(&self, registry: &AgentRegistry) -> Result<Arc<dyn Router>, TreeError> {
        match self.strategy {
            RoutingStrategy::Tree => {
                let root = match &self.tree {
                    Some(tree) => tree.build(registry)?,
                    None => NodeConfig::leaf(Vec::<String>::new()).build(registry)?,
                };
                info!(
                    depth = root.depth(),
                    leaves = root.leaf_count(),
                    "Built keyword routing tree"
                );
                Ok(Arc::new(TreeRouter::with_max_depth(root, self.max_depth)?))
            }
            RoutingStrategy::Single => {
                let name = self.agent.clone().unwrap_or_default();
                let agent = registry
                    .get_agent(&name)
                    .ok_or(TreeError::UnknownAgent(name))?;
                info!(agent = %agent.name(), "Built single-agent router");
                Ok(Arc::new(SingleAgentRouter::new(agent)))
            }
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DispatchConfig {
    /// Load and validate configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: DispatchConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.application.name.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "application.name must not be empty".to_string(),
            ));
        }
        if self.session.history_limit == 0 {
            return Err(ConfigError::InvalidConfig(
                "session.history_limit must be greater than zero".to_string(),
            ));
        }
        if let Some(user) = &self.user {
            if user.id.trim().is_empty() {
                return Err(ConfigError::InvalidConfig(
                    "user.id must not be empty".to_string(),
                ));
            }
        }
        self.routing.validate()
    }
}
