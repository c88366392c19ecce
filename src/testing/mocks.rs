//! Mock implementations for testing
//!
//! Provides scripted agents, a recording reporter, a failing session service
//! and a recording shutdown listener so dispatch cycles can be asserted on
//! without real handlers or storage.

use crate::agent::{Agent, AgentRequest, AgentResponse};
use crate::application::ShutdownListener;
use crate::error::SessionError;
use crate::reporting::{Report, Reporter};
use crate::session::{Session, SessionObject, SessionService};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock agent returning a fixed response (or declining)
#[derive(Debug)]
pub struct MockAgent {
    name: String,
    response: Option<AgentResponse>,
    calls: AtomicUsize,
    received: Mutex<Vec<AgentRequest>>,
}

impl MockAgent {
    pub fn new<S: Into<String>>(name: S, response: Option<AgentResponse>) -> Self {
        Self {
            name: name.into(),
            response,
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Agent that always answers with `text`
    pub fn answering<N: Into<String>, T: Into<String>>(name: N, text: T) -> Self {
        Self::new(name, Some(AgentResponse::text(text)))
    }

    /// Agent that always declines
    pub fn declining<N: Into<String>>(name: N) -> Self {
        Self::new(name, None)
    }

    /// Number of times `process` was invoked
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received_requests(&self) -> Vec<AgentRequest> {
        self.received
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn last_request(&self) -> Option<AgentRequest> {
        self.received_requests().pop()
    }
}

impl Agent for MockAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Scripted test agent"
    }

    fn process(&self, request: &AgentRequest) -> Option<AgentResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut received) = self.received.lock() {
            received.push(request.clone());
        }
        self.response.clone()
    }
}

/// Reporter keeping every stored report in memory
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    reports: Arc<Mutex<Vec<Report>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports
            .lock()
            .map(|reports| reports.clone())
            .unwrap_or_default()
    }

    pub fn last_report(&self) -> Option<Report> {
        self.reports().pop()
    }
}

impl Reporter for RecordingReporter {
    fn store(&self, report: Report) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(report);
        }
    }
}

/// Session service whose every operation fails
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingSessionService;

impl SessionService for FailingSessionService {
    fn create(&self) -> Result<String, SessionError> {
        Err(SessionError::Unavailable("mock session store is down".to_string()))
    }

    fn get_session(&self, session_id: &str) -> Result<Session, SessionError> {
        Err(SessionError::NotFound(session_id.to_string()))
    }

    fn update(&self, _session_id: &str, _object: SessionObject) -> Result<(), SessionError> {
        Err(SessionError::Unavailable("mock session store is down".to_string()))
    }
}

/// Shutdown listener appending its label to a shared log
#[derive(Debug, Clone)]
pub struct RecordingShutdownListener {
    label: String,
    log: Arc<Mutex<Vec<String>>>,
}

impl RecordingShutdownListener {
    pub fn new<S: Into<String>>(label: S, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            label: label.into(),
            log,
        }
    }
}

impl ShutdownListener for RecordingShutdownListener {
    fn shutdown(&self) {
        if let Ok(mut log) = self.log.lock() {
            log.push(self.label.clone());
        }
    }
}
