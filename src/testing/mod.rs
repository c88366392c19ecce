//! Testing utilities and mock implementations
//!
//! Mocks for agents, reporters, session services and shutdown listeners so
//! dispatch behavior can be exercised without real collaborators.

pub mod mocks;

pub use mocks::*;
