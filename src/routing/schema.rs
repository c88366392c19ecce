//! Declarative Routing Tree Schema
//!
//! Routing trees can be described in configuration and built against an
//! [`AgentRegistry`]. A node is either a keyword decision with `matched` and
//! `unmatched` subtrees, or a leaf listing agent names:
//!
//! ```toml
//! keyword = "weather"
//! [matched]
//! agents = ["weather"]
//! [unmatched]
//! agents = ["fallback"]
//! ```

use super::tree::{KeywordNode, LeafNode, Node};
use crate::agent::{Agent, AgentRegistry};
use crate::error::TreeError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Serialized form of a routing tree node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum NodeConfig {
    Keyword(KeywordNodeConfig),
    Leaf(LeafNodeConfig),
}

/// Keyword decision node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct KeywordNodeConfig {
    pub keyword: String,
    pub matched: Box<NodeConfig>,
    pub unmatched: Box<NodeConfig>,
}

/// Leaf listing agent names in priority order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LeafNodeConfig {
    #[serde(default)]
    pub agents: Vec<String>,
}

impl NodeConfig {
    /// Convenience constructor for a keyword node
    pub fn keyword<K: Into<String>>(keyword: K, matched: NodeConfig, unmatched: NodeConfig) -> Self {
        NodeConfig::Keyword(KeywordNodeConfig {
            keyword: keyword.into(),
            matched: Box::new(matched),
            unmatched: Box::new(unmatched),
        })
    }

    /// Convenience constructor for a leaf
    pub fn leaf<I, S>(agents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NodeConfig::Leaf(LeafNodeConfig {
            agents: agents.into_iter().map(Into::into).collect(),
        })
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        match self {
            NodeConfig::Leaf(_) => 1,
            NodeConfig::Keyword(node) => 1 + node.matched.depth().max(node.unmatched.depth()),
        }
    }

    /// Every agent name referenced anywhere in the tree
    pub fn agent_names(&self) -> Vec<&str> {
        match self {
            NodeConfig::Leaf(leaf) => leaf.agents.iter().map(String::as_str).collect(),
            NodeConfig::Keyword(node) => {
                let mut names = node.matched.agent_names();
                names.extend(node.unmatched.agent_names());
                names
            }
        }
    }

    /// Build the routing tree, resolving agent names through `registry`
    pub fn build(&self, registry: &AgentRegistry) -> Result<Node, TreeError> {
        match self {
            NodeConfig::Leaf(leaf) => {
                let agents = leaf
                    .agents
                    .iter()
                    .map(|name| {
                        registry
                            .get_agent(name)
                            .ok_or_else(|| TreeError::UnknownAgent(name.clone()))
                    })
                    .collect::<Result<Vec<Arc<dyn Agent>>, _>>()?;
                Ok(Node::from(LeafNode::new(agents)))
            }
            NodeConfig::Keyword(node) => {
                let matched = node.matched.build(registry)?;
                let unmatched = node.unmatched.build(registry)?;
                Ok(Node::from(KeywordNode::new(
                    node.keyword.as_str(),
                    matched,
                    unmatched,
                )?))
            }
        }
    }
}
