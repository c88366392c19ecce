//! Routing Decision Trees
//!
//! A routing tree is a hand-authored decision procedure over request text.
//! Inner nodes ask a question about the request ("does it mention
//! *weather*?") and pick one of their two children; leaves hold the ordered
//! list of candidate agents.
//!
//! Children are owned (`Box<Node>`), so every tree is finite and acyclic and
//! every keyword node has both children by construction. Keyword validity is
//! checked when a [`KeywordNode`] is created.
//!
//! # Example
//!
//! ```rust
//! use agent_dispatch::routing::tree::{KeywordNode, LeafNode, Node};
//! use agent_dispatch::protocol::Request;
//!
//! let tree = Node::from(KeywordNode::new(
//!     "weather",
//!     Node::from(LeafNode::new(vec![])),
//!     Node::from(LeafNode::empty()),
//! ).unwrap());
//!
//! assert!(!tree.is_leaf());
//! assert_eq!(tree.depth(), 2);
//! let child = tree.select_child(&Request::new("Weather in Paris?")).unwrap();
//! assert!(child.is_leaf());
//! ```

use crate::agent::Agent;
use crate::error::TreeError;
use crate::protocol::Request;
use crate::tokenizer::{RuleBasedTokenizer, Tokenizer};
use std::fmt;
use std::sync::Arc;

/// Element of a routing tree
#[derive(Debug)]
pub enum Node {
    Keyword(KeywordNode),
    Leaf(LeafNode),
}

impl Node {
    /// Select the child this request descends into
    ///
    /// Fails with [`TreeError::LeafHasNoChildren`] on a leaf: asking a leaf for
    /// a child is a defect in the caller's traversal.
    pub fn select_child(&self, request: &Request) -> Result<&Node, TreeError> {
        match self {
            Node::Keyword(node) => Ok(node.select_child(request)),
            Node::Leaf(_) => Err(TreeError::LeafHasNoChildren),
        }
    }

    /// Children in fixed order: matched first, then non-matched
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Keyword(node) => vec![node.matched(), node.non_matched()],
            Node::Leaf(_) => Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Candidate agents of a leaf; `None` for decision nodes
    pub fn value(&self) -> Option<&[Arc<dyn Agent>]> {
        match self {
            Node::Leaf(leaf) => Some(leaf.agents()),
            Node::Keyword(_) => None,
        }
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Keyword(node) => 1 + node.matched().depth().max(node.non_matched().depth()),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Keyword(node) => node.matched().leaf_count() + node.non_matched().leaf_count(),
        }
    }
}

impl From<KeywordNode> for Node {
    fn from(node: KeywordNode) -> Self {
        Node::Keyword(node)
    }
}

impl From<LeafNode> for Node {
    fn from(node: LeafNode) -> Self {
        Node::Leaf(node)
    }
}

/// Decision node branching on whole-token keyword presence
pub struct KeywordNode {
    keyword: String,
    matched: Box<Node>,
    non_matched: Box<Node>,
    tokenizer: Arc<dyn Tokenizer>,
}

impl KeywordNode {
    /// Create a keyword node using the rule-based tokenizer
    ///
    /// The keyword is lowercased and must form exactly one token, otherwise it
    /// could never equal a token of the request.
    pub fn new<K: Into<String>>(
        keyword: K,
        matched: Node,
        non_matched: Node,
    ) -> Result<Self, TreeError> {
        Self::with_tokenizer(keyword, matched, non_matched, Arc::new(RuleBasedTokenizer))
    }

    /// Create a keyword node with a custom tokenizer
    pub fn with_tokenizer<K: Into<String>>(
        keyword: K,
        matched: Node,
        non_matched: Node,
        tokenizer: Arc<dyn Tokenizer>,
    ) -> Result<Self, TreeError> {
        let raw = keyword.into();
        let keyword = raw.trim().to_lowercase();

        if keyword.is_empty() {
            return Err(TreeError::invalid_keyword(raw, "keyword must not be empty"));
        }

        let tokens = tokenizer.tokenize(&keyword);
        if tokens.len() != 1 || tokens[0] != keyword {
            return Err(TreeError::invalid_keyword(
                raw,
                format!("keyword must be a single token, got {tokens:?}"),
            ));
        }

        Ok(Self {
            keyword,
            matched: Box::new(matched),
            non_matched: Box::new(non_matched),
            tokenizer,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn matched(&self) -> &Node {
        &self.matched
    }

    pub fn non_matched(&self) -> &Node {
        &self.non_matched
    }

    /// Whether the lowercased request text contains the keyword as a token
    pub fn matches(&self, request: &Request) -> bool {
        let text = request.text.to_lowercase();
        self.tokenizer
            .tokenize(&text)
            .iter()
            .any(|token| *token == self.keyword)
    }

    pub fn select_child(&self, request: &Request) -> &Node {
        if self.matches(request) {
            &self.matched
        } else {
            &self.non_matched
        }
    }
}

impl fmt::Debug for KeywordNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywordNode")
            .field("keyword", &self.keyword)
            .field("matched", &self.matched)
            .field("non_matched", &self.non_matched)
            .finish()
    }
}

/// Terminal node holding an ordered candidate list
#[derive(Debug, Clone, Default)]
pub struct LeafNode {
    agents: Vec<Arc<dyn Agent>>,
}

impl LeafNode {
    pub fn new(agents: Vec<Arc<dyn Agent>>) -> Self {
        Self { agents }
    }

    /// Leaf that routes nowhere
    pub fn empty() -> Self {
        Self::default()
    }

    /// Leaf with a single candidate
    pub fn single(agent: Arc<dyn Agent>) -> Self {
        Self::new(vec![agent])
    }

    /// Candidates in the order they will be tried
    pub fn agents(&self) -> &[Arc<dyn Agent>] {
        &self.agents
    }
}
