//! Tree Router
//!
//! Walks a [`Node`] tree from the root for each request and returns the
//! candidate list of the leaf it lands on.

use super::router::{extend_distinct, Router};
use super::tree::Node;
use crate::agent::Agent;
use crate::error::TreeError;
use crate::protocol::Request;
use std::sync::Arc;
use tracing::debug;

/// Depth limit applied to configured trees unless overridden
pub const DEFAULT_MAX_TREE_DEPTH: usize = 32;

/// Router backed by a keyword decision tree
///
/// The tree is immutable after construction and shared read-only between
/// concurrent `route` calls.
#[derive(Debug)]
pub struct TreeRouter {
    root: Node,
}

impl TreeRouter {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Create a router, rejecting trees deeper than `max_depth`
    pub fn with_max_depth(root: Node, max_depth: usize) -> Result<Self, TreeError> {
        let depth = root.depth();
        if depth > max_depth {
            return Err(TreeError::DepthExceeded {
                depth,
                max: max_depth,
            });
        }
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Descend from the root to the leaf selected by this request
    fn find_leaf(&self, request: &Request) -> &Node {
        let mut node = &self.root;
        let mut steps = 0usize;
        loop {
            match node {
                Node::Leaf(_) => {
                    debug!(request_id = %request.id, steps = steps, "Routing reached leaf");
                    return node;
                }
                Node::Keyword(decision) => {
                    let next = decision.select_child(request);
                    debug!(
                        request_id = %request.id,
                        keyword = %decision.keyword(),
                        matched = std::ptr::eq(next, decision.matched()),
                        "Routing decision"
                    );
                    node = next;
                    steps += 1;
                }
            }
        }
    }
}

/// Collect distinct agents of every leaf, depth-first, matched branch first
fn collect_agents(node: &Node, agents: &mut Vec<Arc<dyn Agent>>) {
    match node {
        Node::Leaf(leaf) => extend_distinct(agents, leaf.agents()),
        Node::Keyword(decision) => {
            collect_agents(decision.matched(), agents);
            collect_agents(decision.non_matched(), agents);
        }
    }
}

impl Router for TreeRouter {
    fn route(&self, request: &Request) -> Vec<Arc<dyn Agent>> {
        self.find_leaf(request)
            .value()
            .map(<[Arc<dyn Agent>]>::to_vec)
            .unwrap_or_default()
    }

    fn agents(&self) -> Vec<Arc<dyn Agent>> {
        let mut agents = Vec::new();
        collect_agents(&self.root, &mut agents);
        agents
    }
}
