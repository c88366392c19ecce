//! Router Trait and Simple Strategies
//!
//! A [`Router`] maps a request to an ordered list of candidate agents. The
//! application tries candidates in that order and the first one that answers
//! wins, so ranking lives entirely in the order a router returns.
//!
//! An empty candidate list is a valid outcome meaning "no route", not an
//! error.

use crate::agent::Agent;
use crate::protocol::Request;
use std::sync::Arc;
use tracing::debug;

/// Routing strategy
pub trait Router: Send + Sync {
    /// Ordered candidate agents for this request (possibly empty)
    fn route(&self, request: &Request) -> Vec<Arc<dyn Agent>>;

    /// Every distinct agent this router can ever return
    fn agents(&self) -> Vec<Arc<dyn Agent>>;
}

/// Append agents not already present (by identity), keeping first-seen order
pub(crate) fn extend_distinct(target: &mut Vec<Arc<dyn Agent>>, agents: &[Arc<dyn Agent>]) {
    for agent in agents {
        if !target.iter().any(|known| Arc::ptr_eq(known, agent)) {
            target.push(agent.clone());
        }
    }
}

/// Router that sends every request to one agent
#[derive(Debug, Clone)]
pub struct SingleAgentRouter {
    agent: Arc<dyn Agent>,
}

impl SingleAgentRouter {
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self { agent }
    }
}

impl Router for SingleAgentRouter {
    fn route(&self, _request: &Request) -> Vec<Arc<dyn Agent>> {
        vec![self.agent.clone()]
    }

    fn agents(&self) -> Vec<Arc<dyn Agent>> {
        vec![self.agent.clone()]
    }
}

/// Router consulting inner routers in order until one yields candidates
pub struct ChainRouter {
    routers: Vec<Arc<dyn Router>>,
}

impl ChainRouter {
    pub fn new(routers: Vec<Arc<dyn Router>>) -> Self {
        Self { routers }
    }

    pub fn len(&self) -> usize {
        self.routers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }
}

impl Router for ChainRouter {
    fn route(&self, request: &Request) -> Vec<Arc<dyn Agent>> {
        for (index, router) in self.routers.iter().enumerate() {
            let candidates = router.route(request);
            if !candidates.is_empty() {
                debug!(
                    router_index = index,
                    candidates = candidates.len(),
                    "Chained router produced candidates"
                );
                return candidates;
            }
        }
        Vec::new()
    }

    fn agents(&self) -> Vec<Arc<dyn Agent>> {
        let mut agents = Vec::new();
        for router in &self.routers {
            extend_distinct(&mut agents, &router.agents());
        }
        agents
    }
}
