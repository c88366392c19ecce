//! Agent capability
//!
//! Agents are the handlers requests are dispatched to. The dispatch core only
//! relies on the [`Agent`] trait: a name used for reporting and a `process`
//! method that either answers or declines.

pub mod registry;
pub mod response;

pub use registry::AgentRegistry;
pub use response::{AgentRequest, AgentResponse};

/// Handler capability
///
/// Implementations must be thread safe: one agent instance may be shared by
/// many routing tree leaves and invoked from concurrent `process` calls.
pub trait Agent: Send + Sync {
    /// Identifier recorded in reports and used for registry lookups
    fn name(&self) -> &str;

    /// Short description of what this agent handles
    fn description(&self) -> &str {
        ""
    }

    /// Answer the request, or return `None` to let the next candidate try
    fn process(&self, request: &AgentRequest) -> Option<AgentResponse>;
}

impl std::fmt::Debug for dyn Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent").field("name", &self.name()).finish()
    }
}
