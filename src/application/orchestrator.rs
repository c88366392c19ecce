//! Request-response dispatch loop
//!
//! [`Application::process`] runs one cycle:
//!
//! 1. resolve (or create) the conversation session
//! 2. apply request filters in registration order
//! 3. route the filtered request to an ordered candidate list
//! 4. invoke candidates one at a time until one answers
//! 5. apply response filters in registration order
//! 6. hand a [`Report`] of the cycle to the reporter
//!
//! The loop never fails. A request nobody routes to ends with
//! `NoAvailableAgent`, a request every candidate declines ends with
//! `NoResponseFromAgent`, and collaborator failures are logged and absorbed.

use super::lifecycle::ShutdownListener;
use crate::agent::{Agent, AgentRequest};
use crate::error::SessionError;
use crate::filters::{apply_request_filters, apply_response_filters, RequestFilter, ResponseFilter};
use crate::observability::metrics::{duration_micros, metrics};
use crate::observability::{request_span, routing_span};
use crate::protocol::{Request, Response, ResponseStatus, StatusCode};
use crate::reporting::{Report, Reporter};
use crate::routing::Router;
use crate::session::{Session, SessionObject, SessionService};
use crate::users::User;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Dispatch orchestrator
///
/// Built once through [`ApplicationBuilder`](super::ApplicationBuilder) and
/// immutable afterwards, so one instance can serve concurrent `process`
/// calls behind an `Arc`.
pub struct Application {
    pub(super) name: String,
    pub(super) router: Arc<dyn Router>,
    pub(super) request_filters: Vec<Box<dyn RequestFilter>>,
    pub(super) response_filters: Vec<Box<dyn ResponseFilter>>,
    pub(super) session_service: Arc<dyn SessionService>,
    pub(super) reporter: Arc<dyn Reporter>,
    pub(super) user: Option<User>,
    pub(super) shutdown_listeners: Vec<Box<dyn ShutdownListener>>,
}

/// Session used for one cycle
struct ResolvedSession {
    session: Session,
    /// False when the session service failed and the session lives only for
    /// this cycle
    stored: bool,
}

impl Application {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn router(&self) -> &Arc<dyn Router> {
        &self.router
    }

    pub fn session_service(&self) -> &Arc<dyn SessionService> {
        &self.session_service
    }

    /// Every agent the router can dispatch to
    pub fn agents(&self) -> Vec<Arc<dyn Agent>> {
        self.router.agents()
    }

    /// Process one request and return the final response
    pub fn process(&self, request: Request) -> Response {
        let span = request_span!(request_id = %request.id, application = %self.name);
        let _enter = span.enter();
        let metrics = metrics();
        metrics.request_received();

        let resolved = self.resolve_session(request.session_id.as_deref());

        let request = apply_request_filters(&self.request_filters, request);
        let mut exchange = SessionObject::new(request.clone());
        let mut report = Report::new(request.clone());
        let mut response = Response::from_status(ResponseStatus::new(StatusCode::NoAvailableAgent));

        let route_start = Instant::now();
        let candidates = {
            let routing = routing_span!(request_id = %request.id);
            let _enter = routing.enter();
            self.router.route(&request)
        };
        report.set_route_time(route_start);
        metrics.record_route_time(report.route_time);
        debug!(candidates = candidates.len(), "Routing complete");

        let mut answered_by = None;
        if !candidates.is_empty() {
            response = Response::from_status(ResponseStatus::new(StatusCode::NoResponseFromAgent));
            let agent_request =
                AgentRequest::new(request.text.clone(), self.user.clone(), resolved.session.clone());

            let agent_start = Instant::now();
            for agent in &candidates {
                report.set_agent(agent.name());
                metrics.agent_invoked();
                match agent.process(&agent_request) {
                    Some(agent_response) => {
                        response = Response::from(agent_response);
                        answered_by = Some(agent.name().to_string());
                        exchange.response = Some(response.clone());
                        self.record_exchange(&resolved, exchange);
                        break;
                    }
                    None => debug!(agent = %agent.name(), "Agent declined request"),
                }
            }
            report.set_agent_time(agent_start);
            metrics.record_agent_time(report.agent_time);
        }

        let outcome = response.status_code();
        let response = apply_response_filters(&self.response_filters, response);

        info!(
            status = ?outcome,
            agent = answered_by.as_deref().unwrap_or("none"),
            route_time_us = duration_micros(report.route_time),
            agent_time_us = duration_micros(report.agent_time),
            "Request processed"
        );
        metrics.request_completed(outcome, answered_by.as_deref());

        report.set_response(response.clone());
        self.reporter.store(report);

        response
    }

    /// Run every shutdown listener in registration order
    pub fn shutdown(&self) {
        info!(
            application = %self.name,
            listeners = self.shutdown_listeners.len(),
            "Shutting down application"
        );
        for listener in &self.shutdown_listeners {
            listener.shutdown();
        }
    }

    fn resolve_session(&self, session_id: Option<&str>) -> ResolvedSession {
        if let Some(id) = session_id {
            match self.session_service.get_session(id) {
                Ok(session) => {
                    return ResolvedSession {
                        session,
                        stored: true,
                    }
                }
                Err(SessionError::NotFound(_)) => {
                    debug!(session_id = %id, "Unknown session, starting a new one");
                }
                Err(e) => {
                    warn!(session_id = %id, error = %e, "Failed to fetch session");
                }
            }
        }

        let created = self
            .session_service
            .create()
            .and_then(|id| self.session_service.get_session(&id));
        match created {
            Ok(session) => ResolvedSession {
                session,
                stored: true,
            },
            Err(e) => {
                warn!(error = %e, "Session service unavailable, using a detached session");
                ResolvedSession {
                    session: Session::new(Uuid::new_v4().to_string()),
                    stored: false,
                }
            }
        }
    }

    fn record_exchange(&self, resolved: &ResolvedSession, exchange: SessionObject) {
        if !resolved.stored {
            return;
        }
        if let Err(e) = self.session_service.update(&resolved.session.id, exchange) {
            warn!(session_id = %resolved.session.id, error = %e, "Failed to update session");
        }
    }
}
