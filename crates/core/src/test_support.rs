use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::view::{MessageId, Status, ToolCallForm, View};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    AppendUser(String),
    AppendAssistant(MessageId),
    UpdateAssistant(MessageId, String),
    ScrollToBottom,
    ClearMessages,
    ToolSectionVisible(bool),
    RenderToolCalls(Vec<ToolCallForm>),
    ClearToolCalls,
    ToolSubmitting(String, bool),
    ToolResult(String, String),
    Alert(String),
    Status(Status),
    ConversationLabel(String),
    InputEnabled(bool),
}

/// A view that records every call.
#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
    next_id: AtomicU64,
}

impl RecordingView {
    fn push(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn user_messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::AppendUser(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    /// The latest content of every assistant message since the last clear.
    pub fn assistant_messages(&self) -> Vec<String> {
        let mut messages = BTreeMap::new();
        for event in self.events() {
            match event {
                ViewEvent::AppendAssistant(id) => {
                    messages.insert(id, String::new());
                }
                ViewEvent::UpdateAssistant(id, html) => {
                    messages.insert(id, html);
                }
                ViewEvent::ClearMessages => messages.clear(),
                _ => {}
            }
        }
        messages.into_values().collect()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Alert(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn tool_section_visible(&self) -> bool {
        self.events()
            .into_iter()
            .rev()
            .find_map(|event| match event {
                ViewEvent::ToolSectionVisible(visible) => Some(visible),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Ids of the forms currently rendered.
    pub fn rendered_tool_ids(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .rev()
            .find_map(|event| match event {
                ViewEvent::RenderToolCalls(forms) => {
                    Some(forms.into_iter().map(|form| form.id).collect())
                }
                ViewEvent::ClearToolCalls => Some(vec![]),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn status(&self) -> Option<Status> {
        self.events().into_iter().rev().find_map(|event| match event {
            ViewEvent::Status(status) => Some(status),
            _ => None,
        })
    }

    pub fn conversation_label(&self) -> Option<String> {
        self.events().into_iter().rev().find_map(|event| match event {
            ViewEvent::ConversationLabel(label) => Some(label),
            _ => None,
        })
    }

    pub fn input_enabled(&self) -> Option<bool> {
        self.events().into_iter().rev().find_map(|event| match event {
            ViewEvent::InputEnabled(enabled) => Some(enabled),
            _ => None,
        })
    }
}

impl View for RecordingView {
    fn append_user_message(&self, text: &str) {
        self.push(ViewEvent::AppendUser(text.to_owned()));
    }

    fn append_assistant_message(&self) -> MessageId {
        let id = MessageId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.push(ViewEvent::AppendAssistant(id));
        id
    }

    fn update_assistant_message(&self, id: MessageId, html: &str) {
        self.push(ViewEvent::UpdateAssistant(id, html.to_owned()));
    }

    fn scroll_to_bottom(&self) {
        self.push(ViewEvent::ScrollToBottom);
    }

    fn clear_messages(&self) {
        self.push(ViewEvent::ClearMessages);
    }

    fn set_tool_section_visible(&self, visible: bool) {
        self.push(ViewEvent::ToolSectionVisible(visible));
    }

    fn render_tool_calls(&self, forms: &[ToolCallForm]) {
        self.push(ViewEvent::RenderToolCalls(forms.to_vec()));
    }

    fn clear_tool_calls(&self) {
        self.push(ViewEvent::ClearToolCalls);
    }

    fn set_tool_submitting(&self, id: &str, submitting: bool) {
        self.push(ViewEvent::ToolSubmitting(id.to_owned(), submitting));
    }

    fn show_tool_result(&self, id: &str, result: &str) {
        self.push(ViewEvent::ToolResult(id.to_owned(), result.to_owned()));
    }

    fn alert(&self, text: &str) {
        self.push(ViewEvent::Alert(text.to_owned()));
    }

    fn set_status(&self, status: Status) {
        self.push(ViewEvent::Status(status));
    }

    fn set_conversation_label(&self, text: &str) {
        self.push(ViewEvent::ConversationLabel(text.to_owned()));
    }

    fn set_input_enabled(&self, enabled: bool) {
        self.push(ViewEvent::InputEnabled(enabled));
    }
}
