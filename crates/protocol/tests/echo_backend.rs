use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::future::ready;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use agentic_chat_protocol::{
    Backend, BackendError, ChatMessage, ChatRequest, ChatResponse, ErrorKind,
    ToolCall, ToolResultsRequest,
};
use serde_json::json;

#[derive(Debug)]
struct EchoBackendError;

impl Display for EchoBackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Conversation not found")
    }
}

impl Error for EchoBackendError {}

impl BackendError for EchoBackendError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Api
    }

    fn status(&self) -> Option<u16> {
        Some(404)
    }
}

/// Echoes user text back, and asks for a tool result whenever the user
/// says "lookup".
#[derive(Default)]
struct EchoBackend {
    next_id: Arc<AtomicU64>,
}

impl Backend for EchoBackend {
    type Error = EchoBackendError;

    fn send_message(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatResponse, Self::Error>> + Send + 'static
    {
        let conversation_id = req.conversation_id.clone().unwrap_or_else(|| {
            format!("conv:{}", self.next_id.fetch_add(1, Ordering::Relaxed))
        });
        let said = req
            .messages
            .iter()
            .map(|msg| msg.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let tool_calls = if said == "lookup" {
            vec![ToolCall {
                id: "t1".to_owned(),
                name: "lookup".to_owned(),
                input: json!({ "q": "x" }),
            }]
        } else {
            vec![]
        };
        ready(Ok(ChatResponse {
            conversation_id: Some(conversation_id),
            message: Some(ChatMessage::assistant(format!("You said {said}"))),
            tool_calls,
        }))
    }

    fn send_tool_results(
        &self,
        req: &ToolResultsRequest,
    ) -> impl Future<Output = Result<ChatResponse, Self::Error>> + Send + 'static
    {
        if !req.conversation_id.starts_with("conv:") {
            return ready(Err(EchoBackendError));
        }
        let results = req
            .tool_results
            .iter()
            .map(|r| format!("{}={}", r.tool_call_id, r.result))
            .collect::<Vec<_>>()
            .join(",");
        ready(Ok(ChatResponse {
            conversation_id: Some(req.conversation_id.clone()),
            message: Some(ChatMessage::assistant(results)),
            tool_calls: vec![],
        }))
    }
}

#[tokio::test]
async fn test_backend_contract() {
    let backend = EchoBackend::default();

    let resp = backend
        .send_message(&ChatRequest {
            messages: vec![ChatMessage::user("lookup")],
            conversation_id: None,
        })
        .await
        .unwrap();
    let conversation_id = resp.conversation_id.clone().unwrap();
    assert_eq!(conversation_id, "conv:0");
    assert_eq!(resp.message_content(), Some("You said lookup"));
    assert!(resp.has_tool_calls());

    let resp = backend
        .send_tool_results(&ToolResultsRequest {
            conversation_id,
            tool_results: vec![agentic_chat_protocol::ToolResult {
                tool_call_id: "t1".to_owned(),
                result: "42".to_owned(),
            }],
        })
        .await
        .unwrap();
    assert_eq!(resp.message_content(), Some("t1=42"));
    assert!(!resp.has_tool_calls());

    let err = backend
        .send_tool_results(&ToolResultsRequest {
            conversation_id: "unknown".to_owned(),
            tool_results: vec![],
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status(), Some(404));
}
