//! Routing Infrastructure
//!
//! Routing turns a request into an ordered list of candidate agents.
//!
//! ## Decision Trees (tree.rs, tree_router.rs)
//!
//! [`Node`] is a flat sum type of keyword decision nodes and leaves.
//! [`TreeRouter`] walks it from the root and returns the leaf's candidates.
//!
//! ## Other Strategies (router.rs)
//!
//! [`SingleAgentRouter`] always returns one agent; [`ChainRouter`] falls
//! through a list of routers until one produces candidates.
//!
//! ## Declarative Trees (schema.rs)
//!
//! [`NodeConfig`] describes a tree in configuration and builds it against an
//! agent registry.

pub mod router;
pub mod schema;
pub mod tree;
pub mod tree_router;

pub use router::{ChainRouter, Router, SingleAgentRouter};
pub use schema::{KeywordNodeConfig, LeafNodeConfig, NodeConfig};
pub use tree::{KeywordNode, LeafNode, Node};
pub use tree_router::{TreeRouter, DEFAULT_MAX_TREE_DEPTH};
