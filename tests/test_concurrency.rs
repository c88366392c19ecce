//! Concurrent dispatch tests
//!
//! `Application::process` is synchronous; these tests share one application
//! across blocking tasks and check that sessions, reports and routing stay
//! consistent.

mod test_helpers;

use agent_dispatch::application::{Application, ApplicationBuilder};
use agent_dispatch::protocol::Request;
use agent_dispatch::routing::TreeRouter;
use agent_dispatch::session::{InMemorySessionService, SessionService};
use agent_dispatch::testing::mocks::RecordingReporter;
use futures::future::join_all;
use std::sync::Arc;
use test_helpers::TestAgents;

fn shared_app(
    agents: &TestAgents,
) -> (Arc<Application>, RecordingReporter, Arc<InMemorySessionService>) {
    let reporter = RecordingReporter::new();
    let sessions = Arc::new(InMemorySessionService::new());
    let app = ApplicationBuilder::new(Arc::new(TreeRouter::new(agents.tree())))
        .reporter(Arc::new(reporter.clone()))
        .session_service(sessions.clone())
        .build();
    (Arc::new(app), reporter, sessions)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_are_routed_independently() {
    let agents = TestAgents::new();
    let (app, reporter, _) = shared_app(&agents);

    let handles = (0..50).map(|i| {
        let app = Arc::clone(&app);
        tokio::task::spawn_blocking(move || {
            let text = if i % 2 == 0 { "weather today" } else { "time now" };
            app.process(Request::new(text))
        })
    });

    let responses: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|result| result.unwrap())
        .collect();

    let sunny = responses
        .iter()
        .filter(|r| r.text.as_deref() == Some("Sunny"))
        .count();
    let noon = responses
        .iter()
        .filter(|r| r.text.as_deref() == Some("Noon"))
        .count();

    assert_eq!((sunny, noon), (25, 25));
    assert_eq!(agents.weather.calls(), 25);
    assert_eq!(agents.clock.calls(), 25);
    assert_eq!(reporter.reports().len(), 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_to_one_session() {
    let agents = TestAgents::new();
    let (app, _, sessions) = shared_app(&agents);
    let session_id = sessions.create().unwrap();

    let handles = (0..20).map(|i| {
        let app = Arc::clone(&app);
        let session_id = session_id.clone();
        tokio::task::spawn_blocking(move || {
            app.process(Request::with_session(format!("weather {i}"), session_id))
        })
    });

    for result in join_all(handles).await {
        assert!(result.unwrap().is_success());
    }

    let session = sessions.get_session(&session_id).unwrap();
    assert_eq!(session.history.len(), 20);
    assert_eq!(sessions.session_count(), 1);
}
