//! Test helpers and utilities for integration tests

use agent_dispatch::agent::{Agent, AgentRegistry};
use agent_dispatch::config::{
    ApplicationSection, DispatchConfig, RoutingConfig, RoutingStrategy, SessionSection,
};
use agent_dispatch::routing::{KeywordNode, LeafNode, Node, NodeConfig, DEFAULT_MAX_TREE_DEPTH};
use agent_dispatch::testing::mocks::MockAgent;
use std::sync::Arc;

/// Scripted agents shared by the routing trees below
#[allow(dead_code)]
pub struct TestAgents {
    pub weather: Arc<MockAgent>,
    pub clock: Arc<MockAgent>,
    pub backup_clock: Arc<MockAgent>,
    pub fallback: Arc<MockAgent>,
}

#[allow(dead_code)]
impl TestAgents {
    pub fn new() -> Self {
        Self {
            weather: Arc::new(MockAgent::answering("weather", "Sunny")),
            clock: Arc::new(MockAgent::declining("clock")),
            backup_clock: Arc::new(MockAgent::answering("backup-clock", "Noon")),
            fallback: Arc::new(MockAgent::answering("fallback", "I don't know")),
        }
    }

    pub fn registry(&self) -> AgentRegistry {
        AgentRegistry::new()
            .with_agent(self.weather.clone())
            .with_agent(self.clock.clone())
            .with_agent(self.backup_clock.clone())
            .with_agent(self.fallback.clone())
    }

    /// weather? -> [weather] ; time? -> [clock, backup-clock] ; else -> [fallback]
    pub fn tree(&self) -> Node {
        let time = KeywordNode::new(
            "time",
            Node::from(LeafNode::new(vec![
                self.clock.clone() as Arc<dyn Agent>,
                self.backup_clock.clone(),
            ])),
            Node::from(LeafNode::single(self.fallback.clone())),
        )
        .unwrap();

        Node::from(
            KeywordNode::new(
                "weather",
                Node::from(LeafNode::single(self.weather.clone())),
                Node::from(time),
            )
            .unwrap(),
        )
    }
}

/// Same shape as [`TestAgents::tree`], as configuration
#[allow(dead_code)]
pub fn test_tree_config() -> NodeConfig {
    NodeConfig::keyword(
        "weather",
        NodeConfig::leaf(["weather"]),
        NodeConfig::keyword(
            "time",
            NodeConfig::leaf(["clock", "backup-clock"]),
            NodeConfig::leaf(["fallback"]),
        ),
    )
}

/// Create a test configuration for integration tests
#[allow(dead_code)]
pub fn test_config() -> DispatchConfig {
    DispatchConfig {
        application: ApplicationSection {
            name: "test-app".to_string(),
        },
        user: None,
        session: SessionSection::default(),
        routing: RoutingConfig {
            strategy: RoutingStrategy::Tree,
            max_depth: DEFAULT_MAX_TREE_DEPTH,
            agent: None,
            tree: Some(test_tree_config()),
        },
    }
}
