//! Agent Registry
//!
//! Name-indexed collection of agents used when routing trees are built from
//! configuration. Agents are registered once during setup; the registry is
//! then only read.

use super::Agent;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Registry of available agents keyed by [`Agent::name`]
#[derive(Clone, Default)]
pub struct AgentRegistry {
    agents: BTreeMap<String, Arc<dyn Agent>>,
}

impl AgentRegistry {
    /// Create a new empty agent registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace an agent under its own name
    pub fn register_agent(&mut self, agent: Arc<dyn Agent>) {
        let name = agent.name().to_string();
        if self.agents.insert(name.clone(), agent).is_some() {
            debug!(agent = %name, "Replaced registered agent");
        } else {
            info!(agent = %name, "Registered agent");
        }
    }

    /// Builder method for fluent construction
    pub fn with_agent(mut self, agent: Arc<dyn Agent>) -> Self {
        self.register_agent(agent);
        self
    }

    /// Get agent by name
    pub fn get_agent(&self, name: &str) -> Option<Arc<dyn Agent>> {
        self.agents.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.agents.contains_key(name)
    }

    /// Registered agent names in sorted order
    pub fn agent_names(&self) -> Vec<&str> {
        self.agents.keys().map(String::as_str).collect()
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("agents", &self.agent_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mocks::MockAgent;

    fn create_test_registry() -> AgentRegistry {
        AgentRegistry::new()
            .with_agent(Arc::new(MockAgent::answering("weather", "sunny")))
            .with_agent(Arc::new(MockAgent::answering("calculator", "4")))
    }

    #[test]
    fn test_lookup_by_name() {
        let registry = create_test_registry();

        let agent = registry.get_agent("weather").expect("weather registered");
        assert_eq!(agent.name(), "weather");
        assert!(registry.contains("calculator"));
        assert!(registry.get_agent("stocks").is_none());
    }

    #[test]
    fn test_names_are_sorted() {
        let registry = create_test_registry();
        assert_eq!(registry.agent_names(), vec!["calculator", "weather"]);
        assert_eq!(registry.agent_count(), 2);
    }

    #[test]
    fn test_reregistering_replaces_agent() {
        let mut registry = create_test_registry();
        let replacement: Arc<dyn Agent> = Arc::new(MockAgent::declining("weather"));
        registry.register_agent(replacement.clone());

        assert_eq!(registry.agent_count(), 2);
        let stored = registry.get_agent("weather").unwrap();
        assert!(Arc::ptr_eq(&stored, &replacement));
    }

    #[test]
    fn test_empty_registry() {
        let registry = AgentRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.agent_names().is_empty());
    }
}
