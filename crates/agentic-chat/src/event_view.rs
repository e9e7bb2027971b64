use std::sync::atomic::{AtomicU64, Ordering};

use agentic_chat_core::tool_call::SubmitOutcome;
use agentic_chat_core::{MessageId, Status, ToolCallForm, View};
use tokio::sync::mpsc;

/// Everything the terminal reacts to, in the order it happened.
#[derive(Debug)]
pub enum UiEvent {
    UserMessage,
    AssistantAppended(MessageId),
    AssistantUpdated(MessageId, String),
    Scrolled,
    MessagesCleared,
    ToolSectionVisible(bool),
    ToolCallsRendered(Vec<ToolCallForm>),
    ToolCallsCleared,
    ToolSubmitting(String, bool),
    ToolResultShown(String, String),
    Alert(String),
    Status(Status),
    ConversationLabel(String),
    InputEnabled(bool),
    Idle,
    ToolSettled(String, SubmitOutcome),
}

/// A [`View`] forwarding every call to the terminal loop.
pub struct EventView {
    event_tx: mpsc::UnboundedSender<UiEvent>,
    next_id: AtomicU64,
}

impl EventView {
    pub fn new(event_tx: mpsc::UnboundedSender<UiEvent>) -> Self {
        Self {
            event_tx,
            next_id: AtomicU64::new(0),
        }
    }

    fn send(&self, event: UiEvent) {
        // The loop is gone once the program is quitting.
        self.event_tx.send(event).ok();
    }
}

impl View for EventView {
    fn append_user_message(&self, _text: &str) {
        // The terminal already shows what the user typed.
        self.send(UiEvent::UserMessage);
    }

    fn append_assistant_message(&self) -> MessageId {
        let id = MessageId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.send(UiEvent::AssistantAppended(id));
        id
    }

    fn update_assistant_message(&self, id: MessageId, html: &str) {
        self.send(UiEvent::AssistantUpdated(id, html.to_owned()));
    }

    fn scroll_to_bottom(&self) {
        self.send(UiEvent::Scrolled);
    }

    fn clear_messages(&self) {
        self.send(UiEvent::MessagesCleared);
    }

    fn set_tool_section_visible(&self, visible: bool) {
        self.send(UiEvent::ToolSectionVisible(visible));
    }

    fn render_tool_calls(&self, forms: &[ToolCallForm]) {
        self.send(UiEvent::ToolCallsRendered(forms.to_vec()));
    }

    fn clear_tool_calls(&self) {
        self.send(UiEvent::ToolCallsCleared);
    }

    fn set_tool_submitting(&self, id: &str, submitting: bool) {
        self.send(UiEvent::ToolSubmitting(id.to_owned(), submitting));
    }

    fn show_tool_result(&self, id: &str, result: &str) {
        self.send(UiEvent::ToolResultShown(id.to_owned(), result.to_owned()));
    }

    fn alert(&self, text: &str) {
        self.send(UiEvent::Alert(text.to_owned()));
    }

    fn set_status(&self, status: Status) {
        self.send(UiEvent::Status(status));
    }

    fn set_conversation_label(&self, text: &str) {
        self.send(UiEvent::ConversationLabel(text.to_owned()));
    }

    fn set_input_enabled(&self, enabled: bool) {
        self.send(UiEvent::InputEnabled(enabled));
    }
}
