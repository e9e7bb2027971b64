use std::sync::Arc;
use std::time::Duration;

use agentic_chat_protocol::{ToolCall, ToolResult, ToolResultsRequest};
use agentic_chat_test_backend::{PresetResponse, ScriptedBackend};
use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::timeout;

use super::*;
use crate::config::ClientConfigBuilder;
use crate::test_support::{RecordingView, ViewEvent};

struct Fixture {
    manager: ToolCallManager,
    view: Arc<RecordingView>,
    backend: ScriptedBackend,
    settled_rx: mpsc::UnboundedReceiver<(String, SubmitOutcome)>,
}

impl Fixture {
    fn new() -> Self {
        let backend = ScriptedBackend::default();
        let view = Arc::new(RecordingView::default());
        let config =
            ClientConfigBuilder::new().with_typing_effect(false).build();
        let renderer = MessageRenderer::new(view.clone(), config);
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        let manager = ToolCallManagerBuilder::new(
            BackendClient::new(backend.clone()),
            renderer,
            view.clone(),
        )
        .on_settled(move |id, outcome| {
            settled_tx.send((id.to_owned(), outcome)).ok();
        })
        .build();
        Self {
            manager,
            view,
            backend,
            settled_rx,
        }
    }

    async fn settled(&mut self) -> (String, SubmitOutcome) {
        timeout(Duration::from_secs(10), self.settled_rx.recv())
            .await
            .expect("timed out waiting for a submission to settle")
            .expect("manager dropped")
    }

    async fn pending_ids(&self) -> Vec<String> {
        self.manager.pending_tool_call_ids().await.unwrap()
    }
}

fn call(id: &str) -> ToolCall {
    ToolCall {
        id: id.to_owned(),
        name: "lookup".to_owned(),
        input: json!({ "q": "x" }),
    }
}

fn result(id: &str, text: &str) -> ToolResult {
    ToolResult {
        tool_call_id: id.to_owned(),
        result: text.to_owned(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_empty_result_is_rejected() {
    let mut fixture = Fixture::new();
    fixture
        .manager
        .display_tool_calls(vec![call("t1")], "abc123")
        .unwrap();
    assert_eq!(fixture.pending_ids().await, vec!["t1"]);
    assert!(fixture.view.tool_section_visible());
    assert_eq!(fixture.view.rendered_tool_ids(), vec!["t1"]);

    fixture.manager.handle_tool_result("t1", "   ").unwrap();
    assert_eq!(
        fixture.settled().await,
        (
            "t1".to_owned(),
            SubmitOutcome::Rejected(SubmitError::EmptyResult)
        )
    );
    assert_eq!(
        fixture.view.alerts(),
        vec!["Please enter a result for this tool call."]
    );
    assert!(fixture.backend.requests().is_empty());
    assert_eq!(fixture.pending_ids().await, vec!["t1"]);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_id_is_a_no_op() {
    let mut fixture = Fixture::new();
    fixture
        .manager
        .display_tool_calls(vec![call("t1")], "abc123")
        .unwrap();
    fixture.pending_ids().await;
    let events_before = fixture.view.events();

    fixture.manager.handle_tool_result("nope", "42").unwrap();
    assert_eq!(
        fixture.settled().await,
        (
            "nope".to_owned(),
            SubmitOutcome::Rejected(SubmitError::NotFound)
        )
    );
    assert_eq!(fixture.view.events(), events_before);
    assert!(fixture.backend.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_successful_submission() {
    let mut fixture = Fixture::new();
    fixture.backend.push_tool_results(PresetResponse::with_parts(
        Some("abc123"),
        Some("done"),
        vec![],
    ));
    fixture
        .manager
        .display_tool_calls(vec![call("t1")], "abc123")
        .unwrap();

    fixture.manager.handle_tool_result("t1", " 42 ").unwrap();
    assert_eq!(
        fixture.settled().await,
        ("t1".to_owned(), SubmitOutcome::Resolved)
    );

    assert_eq!(
        fixture.backend.tool_results_requests(),
        vec![ToolResultsRequest {
            conversation_id: "abc123".to_owned(),
            tool_results: vec![result("t1", "42")],
        }]
    );
    let events = fixture.view.events();
    assert!(events.contains(&ViewEvent::ToolSubmitting("t1".to_owned(), true)));
    assert!(events.contains(&ViewEvent::ToolResult(
        "t1".to_owned(),
        "42".to_owned()
    )));
    assert!(!fixture.view.tool_section_visible());
    assert_eq!(fixture.view.assistant_messages(), vec!["done"]);
    assert!(!fixture.manager.has_pending_tool_calls().await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_chained_tool_calls() {
    let mut fixture = Fixture::new();
    fixture.backend.push_tool_results(PresetResponse::with_parts(
        Some("abc999"),
        Some("one more"),
        vec![call("t2")],
    ));
    fixture
        .backend
        .push_tool_results(PresetResponse::message("done"));
    fixture
        .manager
        .display_tool_calls(vec![call("t1")], "abc123")
        .unwrap();

    fixture.manager.handle_tool_result("t1", "42").unwrap();
    assert_eq!(
        fixture.settled().await,
        ("t1".to_owned(), SubmitOutcome::Resolved)
    );
    assert_eq!(fixture.pending_ids().await, vec!["t2"]);
    assert!(fixture.view.tool_section_visible());
    assert_eq!(fixture.view.rendered_tool_ids(), vec!["t2"]);

    // The follow-up call is answered in the rotated conversation.
    fixture.manager.handle_tool_result("t2", "7").unwrap();
    assert_eq!(
        fixture.settled().await,
        ("t2".to_owned(), SubmitOutcome::Resolved)
    );
    let requests = fixture.backend.tool_results_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].conversation_id, "abc999");
    assert_eq!(requests[1].tool_results, vec![result("t2", "7")]);
    assert_eq!(fixture.view.assistant_messages(), vec!["one more", "done"]);
    assert!(!fixture.view.tool_section_visible());
}

#[tokio::test(start_paused = true)]
async fn test_failed_submission_can_be_retried() {
    let mut fixture = Fixture::new();
    fixture
        .backend
        .push_tool_results(PresetResponse::network_error("connection refused"));
    fixture
        .backend
        .push_tool_results(PresetResponse::message("done"));
    fixture
        .manager
        .display_tool_calls(vec![call("t1")], "abc123")
        .unwrap();

    fixture.manager.handle_tool_result("t1", "42").unwrap();
    assert_eq!(
        fixture.settled().await,
        (
            "t1".to_owned(),
            SubmitOutcome::Failed("connection refused".to_owned())
        )
    );
    assert_eq!(
        fixture.view.alerts(),
        vec!["Error submitting result: connection refused"]
    );
    assert!(
        fixture
            .view
            .events()
            .contains(&ViewEvent::ToolSubmitting("t1".to_owned(), false))
    );
    assert_eq!(fixture.pending_ids().await, vec!["t1"]);
    assert!(fixture.view.tool_section_visible());

    fixture.manager.handle_tool_result("t1", "42").unwrap();
    assert_eq!(
        fixture.settled().await,
        ("t1".to_owned(), SubmitOutcome::Resolved)
    );
    assert!(fixture.pending_ids().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_submissions() {
    let mut fixture = Fixture::new();
    fixture
        .backend
        .push_tool_results(PresetResponse::message("first"));
    fixture
        .backend
        .push_tool_results(PresetResponse::message("second"));
    fixture
        .manager
        .display_tool_calls(vec![call("t1"), call("t2")], "abc123")
        .unwrap();

    fixture.manager.handle_tool_result("t1", "a").unwrap();
    fixture.manager.handle_tool_result("t1", "a").unwrap();
    fixture.manager.handle_tool_result("t2", "b").unwrap();

    // The duplicate is rejected before any response comes back.
    assert_eq!(
        fixture.settled().await,
        (
            "t1".to_owned(),
            SubmitOutcome::Rejected(SubmitError::InFlight)
        )
    );
    let mut resolved = vec![fixture.settled().await, fixture.settled().await];
    resolved.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(
        resolved,
        vec![
            ("t1".to_owned(), SubmitOutcome::Resolved),
            ("t2".to_owned(), SubmitOutcome::Resolved),
        ]
    );

    assert_eq!(fixture.backend.tool_results_requests().len(), 2);
    assert!(!fixture.manager.has_pending_tool_calls().await.unwrap());
    assert!(!fixture.view.tool_section_visible());
}

#[tokio::test(start_paused = true)]
async fn test_clear_tool_calls() {
    let fixture = Fixture::new();
    fixture
        .manager
        .display_tool_calls(vec![call("t1"), call("t2")], "abc123")
        .unwrap();
    fixture.manager.clear_tool_calls().unwrap();

    assert!(!fixture.manager.has_pending_tool_calls().await.unwrap());
    assert!(!fixture.view.tool_section_visible());
    assert!(fixture.view.rendered_tool_ids().is_empty());
}
