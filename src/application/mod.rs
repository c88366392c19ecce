//! Application orchestrator
//!
//! Owns the router, filters and collaborators, and runs request-response
//! cycles through them.

pub mod builder;
pub mod lifecycle;
pub mod orchestrator;

pub use builder::ApplicationBuilder;
pub use lifecycle::ShutdownListener;
pub use orchestrator::Application;
