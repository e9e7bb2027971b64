use std::pin::Pin;
use std::sync::Arc;

use agentic_chat_protocol::{
    Backend, BackendError, ChatMessage, ChatRequest, ChatResponse, ToolResult,
    ToolResultsRequest,
};
use tracing::Instrument;

/// The result of a backend request, with the error type erased.
pub type ClientResult = Result<ChatResponse, Box<dyn BackendError>>;

type BoxedClientFuture = Pin<Box<dyn Future<Output = ClientResult> + Send>>;
type SendMessageFn =
    Arc<dyn Fn(ChatRequest) -> BoxedClientFuture + Send + Sync>;
type SendToolResultsFn =
    Arc<dyn Fn(ToolResultsRequest) -> BoxedClientFuture + Send + Sync>;

/// A wrapper around a backend that provides a type-erased interface for
/// the other components.
///
/// Cloning is cheap, every clone talks to the same backend.
#[derive(Clone)]
pub struct BackendClient {
    send_message_fn: SendMessageFn,
    send_tool_results_fn: SendToolResultsFn,
}

impl BackendClient {
    /// Wraps `backend`.
    pub fn new<B: Backend + 'static>(backend: B) -> Self {
        // Erase `B` here, so the components holding a client don't need a
        // generic parameter.
        let backend = Arc::new(backend);

        let send_message_fn: SendMessageFn = {
            let backend = Arc::clone(&backend);
            Arc::new(move |req| {
                let fut = backend.send_message(&req);
                Box::pin(
                    async move {
                        trace!("sending a chat request: {req:?}");
                        fut.await.map_err(|err| {
                            error!("error sending message: {err}");
                            Box::new(err) as Box<dyn BackendError>
                        })
                    }
                    .instrument(debug_span!("send message")),
                )
            })
        };

        let send_tool_results_fn: SendToolResultsFn = Arc::new(move |req| {
            let fut = backend.send_tool_results(&req);
            Box::pin(
                async move {
                    trace!("sending tool results: {req:?}");
                    fut.await.map_err(|err| {
                        error!("error sending tool results: {err}");
                        Box::new(err) as Box<dyn BackendError>
                    })
                }
                .instrument(debug_span!("send tool results")),
            )
        });

        Self {
            send_message_fn,
            send_tool_results_fn,
        }
    }

    /// Sends a single user message, starting a new conversation when
    /// `conversation_id` is `None`.
    ///
    /// The returned future does not borrow `self`.
    #[inline]
    pub fn send_message(
        &self,
        message: &str,
        conversation_id: Option<&str>,
    ) -> impl Future<Output = ClientResult> + Send + 'static {
        (self.send_message_fn)(ChatRequest {
            messages: vec![ChatMessage::user(message)],
            conversation_id: conversation_id.map(ToOwned::to_owned),
        })
    }

    /// Sends tool results for a conversation.
    ///
    /// The returned future does not borrow `self`.
    #[inline]
    pub fn send_tool_results(
        &self,
        conversation_id: &str,
        results: Vec<ToolResult>,
    ) -> impl Future<Output = ClientResult> + Send + 'static {
        (self.send_tool_results_fn)(ToolResultsRequest {
            conversation_id: conversation_id.to_owned(),
            tool_results: results,
        })
    }
}
