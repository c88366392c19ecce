//! Application construction

use super::lifecycle::ShutdownListener;
use super::orchestrator::Application;
use crate::agent::AgentRegistry;
use crate::config::DispatchConfig;
use crate::error::DispatchResult;
use crate::filters::{RequestFilter, ResponseFilter};
use crate::reporting::{NullReporter, Reporter};
use crate::routing::Router;
use crate::session::{InMemorySessionService, SessionService};
use crate::users::User;
use std::sync::Arc;
use tracing::info;

const DEFAULT_APPLICATION_NAME: &str = "agent-dispatch";

/// Builder for [`Application`]
///
/// Only the router is required. Filters and shutdown listeners keep the order
/// they are added in.
pub struct ApplicationBuilder {
    name: String,
    router: Arc<dyn Router>,
    request_filters: Vec<Box<dyn RequestFilter>>,
    response_filters: Vec<Box<dyn ResponseFilter>>,
    session_service: Arc<dyn SessionService>,
    reporter: Arc<dyn Reporter>,
    user: Option<User>,
    shutdown_listeners: Vec<Box<dyn ShutdownListener>>,
}

impl ApplicationBuilder {
    pub fn new(router: Arc<dyn Router>) -> Self {
        Self {
            name: DEFAULT_APPLICATION_NAME.to_string(),
            router,
            request_filters: Vec::new(),
            response_filters: Vec::new(),
            session_service: Arc::new(InMemorySessionService::new()),
            reporter: Arc::new(NullReporter),
            user: None,
            shutdown_listeners: Vec::new(),
        }
    }

    /// Start from a configuration, resolving agent names through `registry`
    ///
    /// Wires the configured router, an in-memory session store bounded by
    /// the configured history limit, and the configured user.
    pub fn from_config(config: &DispatchConfig, registry: &AgentRegistry) -> DispatchResult<Self> {
        config.validate()?;
        let router = config.routing.build_router(registry)?;

        info!(
            application = %config.application.name,
            strategy = ?config.routing.strategy,
            agents = registry.agent_count(),
            "Building application from configuration"
        );

        let mut builder = Self::new(router)
            .name(config.application.name.clone())
            .session_service(Arc::new(InMemorySessionService::with_history_limit(
                config.session.history_limit,
            )));
        if let Some(user) = &config.user {
            builder = builder.user(user.clone());
        }
        Ok(builder)
    }

    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn session_service(mut self, session_service: Arc<dyn SessionService>) -> Self {
        self.session_service = session_service;
        self
    }

    pub fn user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn add_request_filter<F: RequestFilter + 'static>(mut self, filter: F) -> Self {
        self.request_filters.push(Box::new(filter));
        self
    }

    pub fn add_response_filter<F: ResponseFilter + 'static>(mut self, filter: F) -> Self {
        self.response_filters.push(Box::new(filter));
        self
    }

    pub fn add_shutdown_listener<L: ShutdownListener + 'static>(mut self, listener: L) -> Self {
        self.shutdown_listeners.push(Box::new(listener));
        self
    }

    pub fn build(self) -> Application {
        info!(
            application = %self.name,
            request_filters = self.request_filters.len(),
            response_filters = self.response_filters.len(),
            shutdown_listeners = self.shutdown_listeners.len(),
            "Application built"
        );
        Application {
            name: self.name,
            router: self.router,
            request_filters: self.request_filters,
            response_filters: self.response_filters,
            session_service: self.session_service,
            reporter: self.reporter,
            user: self.user,
            shutdown_listeners: self.shutdown_listeners,
        }
    }
}
