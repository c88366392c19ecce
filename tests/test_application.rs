//! Application dispatch loop tests
//!
//! Each test drives full request-response cycles through `Application` and
//! asserts on what agents saw, what came back and what was reported.

mod test_helpers;

use agent_dispatch::agent::{Agent, AgentRequest, AgentResponse};
use agent_dispatch::application::ApplicationBuilder;
use agent_dispatch::protocol::{Request, Response, ResponseType, StatusCode};
use agent_dispatch::routing::{LeafNode, Node, Router, TreeRouter};
use agent_dispatch::session::{InMemorySessionService, SessionService};
use agent_dispatch::testing::mocks::{MockAgent, RecordingReporter};
use agent_dispatch::users::User;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use test_helpers::TestAgents;

fn leaf_router(agents: Vec<Arc<dyn Agent>>) -> Arc<TreeRouter> {
    Arc::new(TreeRouter::new(Node::from(LeafNode::new(agents))))
}

#[test]
fn test_routes_by_keyword_and_falls_through_declining_agents() {
    let agents = TestAgents::new();
    let reporter = RecordingReporter::new();
    let app = ApplicationBuilder::new(Arc::new(TreeRouter::new(agents.tree())))
        .reporter(Arc::new(reporter.clone()))
        .build();

    let response = app.process(Request::new("What TIME is it?"));

    assert_eq!(response.text.as_deref(), Some("Noon"));
    assert_eq!(agents.clock.calls(), 1);
    assert_eq!(agents.backup_clock.calls(), 1);
    assert_eq!(agents.weather.calls(), 0);
    assert_eq!(agents.fallback.calls(), 0);
    assert_eq!(
        reporter.last_report().unwrap().agent.as_deref(),
        Some("backup-clock")
    );
}

#[test]
fn test_keyword_must_match_whole_token() {
    let agents = TestAgents::new();
    let app = ApplicationBuilder::new(Arc::new(TreeRouter::new(agents.tree()))).build();

    let response = app.process(Request::new("weathering the storm"));

    assert_eq!(response.text.as_deref(), Some("I don't know"));
    assert_eq!(agents.weather.calls(), 0);
}

#[test]
fn test_nothing_after_the_answering_agent_runs() {
    let a = Arc::new(MockAgent::declining("a"));
    let b = Arc::new(MockAgent::answering("b", "R"));
    let c = Arc::new(MockAgent::answering("c", "too late"));
    let app = ApplicationBuilder::new(leaf_router(vec![
        a.clone() as Arc<dyn Agent>,
        b.clone(),
        c.clone(),
    ]))
    .build();

    let response = app.process(Request::new("anything"));

    assert_eq!(response.text.as_deref(), Some("R"));
    assert_eq!((a.calls(), b.calls(), c.calls()), (1, 1, 0));
}

#[test]
fn test_empty_leaf_yields_no_available_agent() {
    let reporter = RecordingReporter::new();
    let app = ApplicationBuilder::new(leaf_router(vec![]))
        .reporter(Arc::new(reporter.clone()))
        .build();

    let response = app.process(Request::new("hello"));

    assert_eq!(response.status_code(), StatusCode::NoAvailableAgent);
    assert_eq!(response.response_type, ResponseType::Error);
    assert!(!response.is_success());

    let report = reporter.last_report().unwrap();
    assert!(report.agent.is_none());
    assert_eq!(report.agent_time, Duration::ZERO);
}

/// Router that takes a fixed time and never finds a candidate
struct SlowEmptyRouter(Duration);

impl Router for SlowEmptyRouter {
    fn route(&self, _request: &Request) -> Vec<Arc<dyn Agent>> {
        std::thread::sleep(self.0);
        Vec::new()
    }

    fn agents(&self) -> Vec<Arc<dyn Agent>> {
        Vec::new()
    }
}

#[test]
fn test_route_time_recorded_without_candidates() {
    let reporter = RecordingReporter::new();
    let app = ApplicationBuilder::new(Arc::new(SlowEmptyRouter(Duration::from_millis(2))))
        .reporter(Arc::new(reporter.clone()))
        .build();

    let response = app.process(Request::new("nobody handles this"));

    assert_eq!(response.status_code(), StatusCode::NoAvailableAgent);
    let report = reporter.last_report().unwrap();
    assert!(
        report.route_time >= Duration::from_millis(2),
        "route time was {:?}",
        report.route_time
    );
    assert_eq!(report.agent_time, Duration::ZERO);
}

#[test]
fn test_declining_candidate_yields_no_response_from_agent() {
    let quiet = Arc::new(MockAgent::declining("quiet"));
    let app = ApplicationBuilder::new(leaf_router(vec![quiet.clone() as Arc<dyn Agent>])).build();

    let response = app.process(Request::new("hello"));

    assert_eq!(response.status_code(), StatusCode::NoResponseFromAgent);
    assert_eq!(quiet.calls(), 1);
}

#[test]
fn test_request_filters_apply_in_registration_order() {
    let echo = Arc::new(MockAgent::answering("echo", "ok"));
    let app = ApplicationBuilder::new(leaf_router(vec![echo.clone() as Arc<dyn Agent>]))
        .add_request_filter(|r: Request| {
            let text = r.text.to_uppercase();
            r.with_text(text)
        })
        .add_request_filter(|r: Request| {
            let text = format!("{} suffix", r.text);
            r.with_text(text)
        })
        .build();

    app.process(Request::new("hello"));

    assert_eq!(echo.last_request().unwrap().text, "HELLO suffix");
}

#[test]
fn test_request_filter_can_change_the_route() {
    let agents = TestAgents::new();
    let app = ApplicationBuilder::new(Arc::new(TreeRouter::new(agents.tree())))
        .add_request_filter(|r: Request| {
            let text = r.text.replace("forecast", "weather");
            r.with_text(text)
        })
        .build();

    let response = app.process(Request::new("forecast for tomorrow"));

    assert_eq!(response.text.as_deref(), Some("Sunny"));
}

#[test]
fn test_report_describes_the_cycle() {
    let reporter = RecordingReporter::new();
    let echo = Arc::new(MockAgent::answering("echo", "pong"));
    let app = ApplicationBuilder::new(leaf_router(vec![echo as Arc<dyn Agent>]))
        .reporter(Arc::new(reporter.clone()))
        .add_request_filter(|r: Request| r.with_text("filtered"))
        .add_response_filter(|r: Response| r.with_text("pong!"))
        .build();

    let request = Request::new("ping");
    let request_id = request.id.clone();
    app.process(request);
    app.process(Request::new("again"));

    let reports = reporter.reports();
    assert_eq!(reports.len(), 2);

    let first = &reports[0];
    assert_eq!(first.request.id, request_id);
    assert_eq!(first.request.text, "filtered");
    assert_eq!(first.agent.as_deref(), Some("echo"));
    assert_eq!(
        first.response.as_ref().and_then(|r| r.text.as_deref()),
        Some("pong!")
    );

    let json = serde_json::to_value(first).unwrap();
    assert_eq!(json["agent"], "echo");
    assert!(json["route_time"].is_object());
}

#[test]
fn test_agent_receives_user_and_json_payload_survives() {
    struct Profile;

    impl Agent for Profile {
        fn name(&self) -> &str {
            "profile"
        }

        fn process(&self, request: &AgentRequest) -> Option<AgentResponse> {
            let user = request.user.as_ref()?;
            Some(AgentResponse::json(
                format!("Hello {}", user.name.clone().unwrap_or_default()),
                json!({ "location": user.attribute("location") }),
            ))
        }
    }

    let app = ApplicationBuilder::new(leaf_router(vec![Arc::new(Profile) as Arc<dyn Agent>]))
        .user(User::new("u-1").with_name("Ada").with_attribute("location", "London"))
        .build();

    let response = app.process(Request::new("who am I"));

    assert_eq!(response.text.as_deref(), Some("Hello Ada"));
    assert_eq!(response.response_type, ResponseType::Json);
    assert_eq!(response.payload, Some(json!({ "location": "London" })));
}

#[test]
fn test_session_history_accumulates_across_requests() {
    let sessions = Arc::new(InMemorySessionService::with_history_limit(2));
    let echo = Arc::new(MockAgent::answering("echo", "ok"));
    let app = ApplicationBuilder::new(leaf_router(vec![echo.clone() as Arc<dyn Agent>]))
        .session_service(sessions.clone())
        .build();

    let session_id = sessions.create().unwrap();
    for text in ["one", "two", "three"] {
        app.process(Request::with_session(text, session_id.as_str()));
    }

    let session = sessions.get_session(&session_id).unwrap();
    let texts: Vec<_> = session.history.iter().map(|o| o.request.text.as_str()).collect();
    assert_eq!(texts, vec!["two", "three"]);
    assert!(session.history.iter().all(|o| o.response.is_some()));
}

#[test]
fn test_unanswered_requests_are_not_recorded_in_session() {
    let sessions = Arc::new(InMemorySessionService::new());
    let app = ApplicationBuilder::new(leaf_router(vec![
        Arc::new(MockAgent::declining("quiet")) as Arc<dyn Agent>
    ]))
    .session_service(sessions.clone())
    .build();

    let session_id = sessions.create().unwrap();
    app.process(Request::with_session("hello", session_id.as_str()));

    assert!(sessions.get_session(&session_id).unwrap().history.is_empty());
}

#[test]
fn test_agents_lists_router_agents() {
    let agents = TestAgents::new();
    let app = ApplicationBuilder::new(Arc::new(TreeRouter::new(agents.tree()))).build();

    let names: Vec<String> = app.agents().iter().map(|a| a.name().to_string()).collect();
    assert_eq!(names, vec!["weather", "clock", "backup-clock", "fallback"]);
}
