use std::fmt::{self, Debug};
use std::sync::Arc;

use agentic_chat_actor::{Actor, ActorDeadError, Message};
use agentic_chat_protocol::ToolCall;

use super::{DisplayDecision, PendingToolCalls, SubmitError, Submission};
use crate::backend_client::{BackendClient, ClientResult};
use crate::renderer::MessageRenderer;
use crate::view::View;

/// How a call to [`ToolCallManager::handle_tool_result`] ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was sent.
    Rejected(SubmitError),
    /// The backend request failed, the call is pending again.
    Failed(String),
    /// The result was accepted and the response fully handled.
    Resolved,
}

type OnSettled = Arc<dyn Fn(&str, SubmitOutcome) + Send + Sync>;

/// [`ToolCallManager`] builder.
pub struct ToolCallManagerBuilder {
    client: BackendClient,
    renderer: MessageRenderer,
    view: Arc<dyn View>,
    on_settled: Option<OnSettled>,
}

impl ToolCallManagerBuilder {
    /// Creates a builder from the collaborators of the manager.
    #[inline]
    pub fn new(
        client: BackendClient,
        renderer: MessageRenderer,
        view: Arc<dyn View>,
    ) -> Self {
        Self {
            client,
            renderer,
            view,
            on_settled: None,
        }
    }

    /// Attaches a callback invoked once per submission attempt, when it
    /// has settled.
    #[inline]
    pub fn on_settled(
        mut self,
        on_settled: impl Fn(&str, SubmitOutcome) + Send + Sync + 'static,
    ) -> Self {
        self.on_settled = Some(Arc::new(on_settled));
        self
    }

    /// Spawns the manager. Must be called within a tokio runtime.
    pub fn build(self) -> ToolCallManager {
        let state = ManagerState {
            pending: PendingToolCalls::new(),
            client: self.client,
            renderer: self.renderer,
            view: self.view,
            on_settled: self.on_settled,
        };
        ToolCallManager {
            handle: Actor::spawn(state, Some("tool calls")),
        }
    }
}

impl Debug for ToolCallManagerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolCallManagerBuilder")
            .field("on_settled", &self.on_settled.is_some())
            .finish_non_exhaustive()
    }
}

/// Tracks the tool calls awaiting a human-supplied result and submits
/// those results.
///
/// Results for different calls may be submitted concurrently, each one
/// settles on its own.
#[derive(Clone)]
pub struct ToolCallManager {
    handle: Actor<ManagerState>,
}

impl ToolCallManager {
    /// Replaces the displayed tool calls with `calls`.
    ///
    /// An empty list only hides the tool section.
    pub fn display_tool_calls(
        &self,
        calls: Vec<ToolCall>,
        conversation_id: &str,
    ) -> Result<(), ActorDeadError> {
        self.handle.send(DisplayToolCalls {
            calls,
            conversation_id: conversation_id.to_owned(),
        })
    }

    /// Submits `text` as the result of the tool call `id`.
    pub fn handle_tool_result(
        &self,
        id: &str,
        text: &str,
    ) -> Result<(), ActorDeadError> {
        self.handle.send(HandleToolResult {
            id: id.to_owned(),
            text: text.to_owned(),
        })
    }

    /// Returns whether any tool call is awaiting its result.
    pub async fn has_pending_tool_calls(&self) -> Result<bool, ActorDeadError> {
        self.handle
            .query(|state, _| state.pending.has_pending())
            .await
    }

    /// Returns the ids of the tool calls awaiting their result, in display
    /// order.
    pub async fn pending_tool_call_ids(
        &self,
    ) -> Result<Vec<String>, ActorDeadError> {
        self.handle
            .query(|state, _| {
                state.pending.ids().map(ToOwned::to_owned).collect()
            })
            .await
    }

    /// Removes every tool call, pending or not, and hides the section.
    pub fn clear_tool_calls(&self) -> Result<(), ActorDeadError> {
        self.handle.send(ClearToolCalls)
    }
}

impl Debug for ToolCallManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolCallManager").finish_non_exhaustive()
    }
}

struct ManagerState {
    pending: PendingToolCalls,
    client: BackendClient,
    renderer: MessageRenderer,
    view: Arc<dyn View>,
    on_settled: Option<OnSettled>,
}

impl ManagerState {
    fn display(&mut self, calls: Vec<ToolCall>, conversation_id: &str) {
        match self.pending.display(calls, conversation_id) {
            DisplayDecision::Hide => self.view.set_tool_section_visible(false),
            DisplayDecision::Render(forms) => {
                debug!("displaying {} tool call(s)", forms.len());
                self.view.set_tool_section_visible(true);
                self.view.render_tool_calls(&forms);
            }
        }
    }

    fn submit(&mut self, id: String, text: &str, handle: &Actor<Self>) {
        let Submission {
            conversation_id,
            result,
        } = match self.pending.begin_submit(&id, text) {
            Ok(submission) => submission,
            Err(err) => {
                match err {
                    SubmitError::NotFound => {
                        error!("tool call not found: {id}");
                    }
                    SubmitError::EmptyResult => {
                        self.view.alert(&err.to_string());
                    }
                    SubmitError::InFlight => {
                        debug!("tool call {id} is already being submitted");
                    }
                }
                self.settle(&id, SubmitOutcome::Rejected(err));
                return;
            }
        };

        self.view.set_tool_submitting(&id, true);

        let result_text = result.result.clone();
        let fut = self
            .client
            .send_tool_results(&conversation_id, vec![result]);
        let handle = handle.clone();
        tokio::spawn(async move {
            let response = fut.await;
            handle
                .send(SubmissionFinished {
                    id,
                    conversation_id,
                    result_text,
                    response,
                })
                .ok();
        });
    }

    fn finish_submission(
        &mut self,
        msg: SubmissionFinished,
        handle: &Actor<Self>,
    ) {
        let SubmissionFinished {
            id,
            conversation_id,
            result_text,
            response,
        } = msg;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                if self.pending.fail(&id) {
                    self.view.set_tool_submitting(&id, false);
                }
                let message = err.to_string();
                self.view
                    .alert(&format!("Error submitting result: {message}"));
                self.settle(&id, SubmitOutcome::Failed(message));
                return;
            }
        };

        let completion = self.pending.complete(&id);
        if completion.was_tracked {
            self.view.show_tool_result(&id, &result_text);
            if completion.hide_section {
                self.view.set_tool_section_visible(false);
            }
        } else {
            debug!("tool call {id} was replaced while being submitted");
        }

        // Follow-up calls belong to the conversation the backend answered
        // for, which may have been rotated.
        let follow_up = ResponseRendered {
            id,
            conversation_id: response
                .conversation_id
                .unwrap_or(conversation_id),
            tool_calls: response.tool_calls,
        };
        match response.message {
            Some(message) => {
                let render = self
                    .renderer
                    .add_assistant_message_default(&message.content);
                let handle = handle.clone();
                tokio::spawn(async move {
                    render.await;
                    handle.send(follow_up).ok();
                });
            }
            None => self.show_follow_up(follow_up),
        }
    }

    fn show_follow_up(&mut self, msg: ResponseRendered) {
        if !msg.tool_calls.is_empty() {
            self.display(msg.tool_calls, &msg.conversation_id);
        }
        self.settle(&msg.id, SubmitOutcome::Resolved);
    }

    fn clear(&mut self) {
        self.pending.clear();
        self.view.clear_tool_calls();
        self.view.set_tool_section_visible(false);
    }

    fn settle(&self, id: &str, outcome: SubmitOutcome) {
        trace!("tool call {id} settled: {outcome:?}");
        if let Some(on_settled) = &self.on_settled {
            on_settled(id, outcome);
        }
    }
}

#[derive(Debug)]
struct DisplayToolCalls {
    calls: Vec<ToolCall>,
    conversation_id: String,
}

impl Message<ManagerState> for DisplayToolCalls {
    fn handle(self, state: &mut ManagerState, _handle: &Actor<ManagerState>) {
        state.display(self.calls, &self.conversation_id);
    }
}

#[derive(Debug)]
struct HandleToolResult {
    id: String,
    text: String,
}

impl Message<ManagerState> for HandleToolResult {
    fn handle(self, state: &mut ManagerState, handle: &Actor<ManagerState>) {
        state.submit(self.id, &self.text, handle);
    }
}

struct SubmissionFinished {
    id: String,
    conversation_id: String,
    result_text: String,
    response: ClientResult,
}

impl Debug for SubmissionFinished {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionFinished")
            .field("id", &self.id)
            .field("ok", &self.response.is_ok())
            .finish_non_exhaustive()
    }
}

impl Message<ManagerState> for SubmissionFinished {
    fn handle(self, state: &mut ManagerState, handle: &Actor<ManagerState>) {
        state.finish_submission(self, handle);
    }
}

#[derive(Debug)]
struct ResponseRendered {
    id: String,
    conversation_id: String,
    tool_calls: Vec<ToolCall>,
}

impl Message<ManagerState> for ResponseRendered {
    fn handle(self, state: &mut ManagerState, _handle: &Actor<ManagerState>) {
        state.show_follow_up(self);
    }
}

#[derive(Debug)]
struct ClearToolCalls;

impl Message<ManagerState> for ClearToolCalls {
    fn handle(self, state: &mut ManagerState, _handle: &Actor<ManagerState>) {
        state.clear();
    }
}

#[cfg(test)]
mod tests;
