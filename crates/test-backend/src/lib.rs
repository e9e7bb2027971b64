//! A local scripted backend for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use agentic_chat_protocol::{
    Backend, BackendError, ChatRequest, ChatResponse, ErrorKind,
    ToolResultsRequest,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
    status: Option<u16>,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl BackendError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    fn status(&self) -> Option<u16> {
        self.status
    }
}

/// A request received by a [`ScriptedBackend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedRequest {
    /// A chat request.
    Chat(ChatRequest),
    /// A tool results request.
    ToolResults(ToolResultsRequest),
}

#[derive(Default)]
struct Script {
    chat: VecDeque<PresetResponse>,
    tool_results: VecDeque<PresetResponse>,
    requests: Vec<RecordedRequest>,
    delay: Option<Duration>,
}

/// A local scripted backend for testing purpose.
///
/// Responses are queued per endpoint and consumed in order. If a
/// request arrives when its queue is empty, an error is returned. All
/// clones share the same script, so a test can keep one clone to
/// inspect the recorded requests after handing another one out.
#[derive(Clone, Default)]
pub struct ScriptedBackend {
    script: Arc<Mutex<Script>>,
}

impl ScriptedBackend {
    /// Queues the answer to the next chat request.
    #[inline]
    pub fn push_chat(&self, preset: PresetResponse) {
        self.lock().chat.push_back(preset);
    }

    /// Queues the answer to the next tool results request.
    #[inline]
    pub fn push_tool_results(&self, preset: PresetResponse) {
        self.lock().tool_results.push_back(preset);
    }

    /// Delays every response by `duration`.
    #[inline]
    pub fn set_delay(&self, duration: Duration) {
        self.lock().delay = Some(duration);
    }

    /// Returns every request received so far.
    #[inline]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Returns the tool results requests received so far.
    pub fn tool_results_requests(&self) -> Vec<ToolResultsRequest> {
        self.lock()
            .requests
            .iter()
            .filter_map(|req| match req {
                RecordedRequest::ToolResults(req) => Some(req.clone()),
                RecordedRequest::Chat(_) => None,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        // A panicking test must not poison the other assertions.
        self.script.lock().unwrap_or_else(|err| err.into_inner())
    }

    fn answer(
        &self,
        request: RecordedRequest,
    ) -> impl Future<Output = Result<ChatResponse, Error>> + Send + 'static {
        let mut script = self.lock();
        let preset = match &request {
            RecordedRequest::Chat(_) => script.chat.pop_front(),
            RecordedRequest::ToolResults(_) => script.tool_results.pop_front(),
        };
        script.requests.push(request);
        let delay = script.delay.unwrap_or(Duration::from_millis(1));
        drop(script);

        async move {
            sleep(delay).await;
            match preset {
                Some(PresetResponse::Respond(resp)) => Ok(resp),
                Some(PresetResponse::Fail(failure)) => Err(Error {
                    kind: failure.kind(),
                    status: failure.status,
                    message: failure.message,
                }),
                None => Err(Error {
                    message: "no enough steps".to_owned(),
                    kind: ErrorKind::InvalidResponse,
                    status: None,
                }),
            }
        }
    }
}

impl Backend for ScriptedBackend {
    type Error = crate::Error;

    fn send_message(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatResponse, Self::Error>> + Send + 'static
    {
        self.answer(RecordedRequest::Chat(req.clone()))
    }

    fn send_tool_results(
        &self,
        req: &ToolResultsRequest,
    ) -> impl Future<Output = Result<ChatResponse, Self::Error>> + Send + 'static
    {
        self.answer(RecordedRequest::ToolResults(req.clone()))
    }
}
