mod builder;
mod state;

use std::sync::Arc;

use agentic_chat_actor::{Actor, ActorDeadError};

use crate::backend_client::BackendClient;
use crate::renderer::MessageRenderer;
use crate::tool_call::ToolCallManager;
use crate::view::View;
pub use builder::ChatBuilder;
use state::{ClearConversation, SendMessage};

/// A chat session: the conversation with the backend as seen through a
/// [`View`].
///
/// At most one chat request is in flight at any time. Messages sent
/// meanwhile are dropped, the view is expected to keep its input
/// disabled until the controller enables it again.
#[derive(Clone)]
pub struct ChatController {
    handle: Actor<ChatState>,
    tool_calls: ToolCallManager,
}

impl ChatController {
    /// Sends a user message.
    ///
    /// Empty messages and messages sent while a request is in flight are
    /// ignored.
    pub fn send_message<S: Into<String>>(
        &self,
        text: S,
    ) -> Result<(), ActorDeadError> {
        self.handle.send(SendMessage(text.into()))
    }

    /// Clears the view and starts a new conversation.
    pub fn clear_conversation(&self) -> Result<(), ActorDeadError> {
        self.handle.send(ClearConversation)
    }

    /// Returns the id of the current conversation, `None` before the
    /// backend created one.
    pub async fn conversation_id(
        &self,
    ) -> Result<Option<String>, ActorDeadError> {
        self.handle
            .query(|state, _| state.conversation_id.clone())
            .await
    }

    /// Returns whether a chat request is being processed.
    pub async fn is_processing(&self) -> Result<bool, ActorDeadError> {
        self.handle.query(|state, _| state.is_processing).await
    }

    /// The tool call workflow of this session, where the view routes the
    /// results entered by the human.
    #[inline]
    pub fn tool_calls(&self) -> &ToolCallManager {
        &self.tool_calls
    }
}

struct ChatState {
    client: BackendClient,
    renderer: MessageRenderer,
    view: Arc<dyn View>,
    tool_calls: ToolCallManager,
    conversation_id: Option<String>,
    is_processing: bool,

    on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}
