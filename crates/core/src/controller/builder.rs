use std::fmt::{self, Debug};
use std::sync::Arc;

use agentic_chat_actor::Actor;
use agentic_chat_protocol::Backend;

use super::{ChatController, ChatState};
use crate::backend_client::BackendClient;
use crate::config::ClientConfig;
use crate::renderer::MessageRenderer;
use crate::tool_call::{SubmitOutcome, ToolCallManagerBuilder};
use crate::view::{Status, View};

type OnToolSettled = Box<dyn Fn(&str, SubmitOutcome) + Send + Sync>;

/// [`ChatController`] builder.
pub struct ChatBuilder {
    client: BackendClient,
    view: Arc<dyn View>,
    config: ClientConfig,
    on_idle: Option<Box<dyn Fn() + Send + Sync>>,
    on_tool_settled: Option<OnToolSettled>,
}

impl ChatBuilder {
    /// Creates a new builder talking to `backend` and drawing on `view`.
    #[inline]
    pub fn with_backend<B: Backend + 'static>(
        backend: B,
        view: Arc<dyn View>,
    ) -> Self {
        Self {
            client: BackendClient::new(backend),
            view,
            config: ClientConfig::default(),
            on_idle: None,
            on_tool_settled: None,
        }
    }

    /// Sets the display settings.
    #[inline]
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Attaches a callback to be invoked when a chat turn has ended and
    /// the input is enabled again.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Attaches a callback to be invoked when a tool result submission
    /// has settled.
    #[inline]
    pub fn on_tool_settled(
        mut self,
        on_tool_settled: impl Fn(&str, SubmitOutcome) + Send + Sync + 'static,
    ) -> Self {
        self.on_tool_settled = Some(Box::new(on_tool_settled));
        self
    }

    /// Builds the controller. Must be called within a tokio runtime.
    pub fn build(self) -> ChatController {
        let ChatBuilder {
            client,
            view,
            config,
            on_idle,
            on_tool_settled,
        } = self;

        let renderer = MessageRenderer::new(Arc::clone(&view), config);
        let mut tool_calls = ToolCallManagerBuilder::new(
            client.clone(),
            renderer.clone(),
            Arc::clone(&view),
        );
        if let Some(on_tool_settled) = on_tool_settled {
            tool_calls = tool_calls.on_settled(on_tool_settled);
        }
        let tool_calls = tool_calls.build();

        view.set_status(Status::Connected);
        let state = ChatState {
            client,
            renderer,
            view,
            tool_calls: tool_calls.clone(),
            conversation_id: None,
            is_processing: false,
            on_idle,
        };
        ChatController {
            handle: Actor::spawn(state, Some("chat")),
            tool_calls,
        }
    }
}

impl Debug for ChatBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatBuilder")
            .field("config", &self.config)
            .field("on_idle", &self.on_idle.is_some())
            .field("on_tool_settled", &self.on_tool_settled.is_some())
            .finish_non_exhaustive()
    }
}
