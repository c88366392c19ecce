//! Per-request analytics reports
//!
//! Every call to `Application::process` produces exactly one [`Report`]
//! describing what was routed where and how long it took. Reports are handed
//! to a [`Reporter`] and never read back by the dispatch core.

use crate::protocol::{Request, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Record of one request-response cycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub timestamp: DateTime<Utc>,
    /// Request as seen by the router (after request filters)
    pub request: Request,
    /// Name of the last agent invoked, if any
    pub agent: Option<String>,
    pub route_time: Duration,
    pub agent_time: Duration,
    pub response: Option<Response>,
}

impl Report {
    pub fn new(request: Request) -> Self {
        Self {
            timestamp: Utc::now(),
            request,
            agent: None,
            route_time: Duration::ZERO,
            agent_time: Duration::ZERO,
            response: None,
        }
    }

    /// Record routing time measured from `start` until now
    pub fn set_route_time(&mut self, start: Instant) {
        self.route_time = start.elapsed();
    }

    /// Record agent time measured from `start` until now
    pub fn set_agent_time(&mut self, start: Instant) {
        self.agent_time = start.elapsed();
    }

    pub fn set_agent<S: Into<String>>(&mut self, agent: S) {
        self.agent = Some(agent.into());
    }

    pub fn set_response(&mut self, response: Response) {
        self.response = Some(response);
    }
}

/// Sink for reports
pub trait Reporter: Send + Sync {
    fn store(&self, report: Report);
}

/// Reporter that discards every report
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn store(&self, _report: Report) {}
}
