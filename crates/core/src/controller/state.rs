use std::fmt::{self, Debug};

use agentic_chat_actor::{Actor, Message};
use agentic_chat_protocol::ToolCall;

use super::ChatState;
use crate::backend_client::ClientResult;
use crate::view::Status;

const NEW_CONVERSATION_LABEL: &str = "New conversation";

impl ChatState {
    fn send_message(&mut self, text: &str, handle: &Actor<Self>) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if self.is_processing {
            debug!("a message is being processed, dropping the new one");
            return;
        }

        self.is_processing = true;
        self.view.set_input_enabled(false);
        self.renderer.add_user_message(text);
        self.view.set_status(Status::Sending);

        let fut = self
            .client
            .send_message(text, self.conversation_id.as_deref());
        let handle = handle.clone();
        tokio::spawn(async move {
            let response = fut.await;
            handle.send(ChatFinished { response }).ok();
        });
    }

    fn finish_chat(&mut self, response: ClientResult, handle: &Actor<Self>) {
        let response = match response {
            Ok(response) => response,
            Err(err) => {
                // The error message is typed out while the input is
                // already enabled again.
                let text = format!("Error: {err}");
                let render = self.renderer.add_assistant_message_default(&text);
                tokio::spawn(render);
                self.view.set_status(Status::Error);
                self.finish_turn();
                return;
            }
        };

        if let Some(conversation_id) = response.conversation_id {
            self.view
                .set_conversation_label(&conversation_label(&conversation_id));
            self.conversation_id = Some(conversation_id);
        }

        let tool_calls = response.tool_calls;
        match response.message {
            Some(message) => {
                let render = self
                    .renderer
                    .add_assistant_message_default(&message.content);
                let handle = handle.clone();
                tokio::spawn(async move {
                    render.await;
                    handle.send(ChatRendered { tool_calls }).ok();
                });
            }
            None => self.show_tool_calls(tool_calls),
        }
    }

    fn show_tool_calls(&mut self, tool_calls: Vec<ToolCall>) {
        if !tool_calls.is_empty() {
            let conversation_id = match &self.conversation_id {
                Some(conversation_id) => conversation_id.as_str(),
                None => {
                    warn!("received tool calls without a conversation id");
                    ""
                }
            };
            if let Err(err) = self
                .tool_calls
                .display_tool_calls(tool_calls, conversation_id)
            {
                error!("failed to display tool calls: {err}");
            }
        }
        self.view.set_status(Status::Connected);
        self.finish_turn();
    }

    fn finish_turn(&mut self) {
        self.is_processing = false;
        self.view.set_input_enabled(true);
        if let Some(on_idle) = &self.on_idle {
            on_idle();
        }
    }

    fn clear(&mut self) {
        self.renderer.clear_messages();
        if let Err(err) = self.tool_calls.clear_tool_calls() {
            error!("failed to clear tool calls: {err}");
        }
        self.conversation_id = None;
        self.view.set_conversation_label(NEW_CONVERSATION_LABEL);
    }
}

/// `Conversation: ` followed by the first 8 characters of the id.
fn conversation_label(conversation_id: &str) -> String {
    let prefix: String = conversation_id.chars().take(8).collect();
    format!("Conversation: {prefix}...")
}

#[derive(Debug)]
pub(super) struct SendMessage(pub String);

impl Message<ChatState> for SendMessage {
    fn handle(self, state: &mut ChatState, handle: &Actor<ChatState>) {
        state.send_message(&self.0, handle);
    }
}

struct ChatFinished {
    response: ClientResult,
}

impl Debug for ChatFinished {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatFinished")
            .field("ok", &self.response.is_ok())
            .finish()
    }
}

impl Message<ChatState> for ChatFinished {
    fn handle(self, state: &mut ChatState, handle: &Actor<ChatState>) {
        state.finish_chat(self.response, handle);
    }
}

#[derive(Debug)]
struct ChatRendered {
    tool_calls: Vec<ToolCall>,
}

impl Message<ChatState> for ChatRendered {
    fn handle(self, state: &mut ChatState, _handle: &Actor<ChatState>) {
        state.show_tool_calls(self.tool_calls);
    }
}

#[derive(Debug)]
pub(super) struct ClearConversation;

impl Message<ChatState> for ClearConversation {
    fn handle(self, state: &mut ChatState, _handle: &Actor<ChatState>) {
        state.clear();
    }
}
