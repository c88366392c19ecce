//! Request and response message types
//!
//! These are the values flowing through `Application::process`.

pub mod messages;

pub use messages::*;
