use std::error::Error;

use crate::error::ErrorKind;
use crate::request::{ChatRequest, ToolResultsRequest};
use crate::response::ChatResponse;

/// The error type for a backend.
///
/// The `Display` output is the human-readable message shown to users.
pub trait BackendError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns the HTTP status, if the server responded at all.
    fn status(&self) -> Option<u16> {
        None
    }
}

/// A chat backend that accepts user messages and tool results.
///
/// Backends are expected to be cheap to share. Futures returned by the
/// methods must not borrow the backend, so callers can move them into
/// spawned tasks.
pub trait Backend: Send + Sync {
    /// The error type that may be returned by the backend.
    type Error: BackendError;

    /// Sends user messages, starting a conversation when
    /// `req.conversation_id` is `None`.
    fn send_message(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatResponse, Self::Error>> + Send + 'static;

    /// Sends human-supplied results for pending tool calls.
    fn send_tool_results(
        &self,
        req: &ToolResultsRequest,
    ) -> impl Future<Output = Result<ChatResponse, Self::Error>> + Send + 'static;
}
