//! The rendering surface the client writes to.

use std::fmt::{self, Display};

use agentic_chat_protocol::ToolCall;

/// Identifies an assistant message node appended to a [`View`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(
    /// The value assigned by the view.
    pub u64,
);

/// The connection indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Status {
    /// Ready for input.
    #[default]
    Connected,
    /// A chat request is in flight.
    Sending,
    /// The last chat request failed.
    Error,
}

impl Status {
    /// The text shown in the indicator.
    #[inline]
    pub fn label(&self) -> &'static str {
        match self {
            Status::Connected => "Connected",
            Status::Sending => "Sending...",
            Status::Error => "Error",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a view needs to draw the form of a pending tool call.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ToolCallForm {
    /// The tool call id, passed back with the submitted result.
    pub id: String,
    /// Name of the requested tool.
    pub name: String,
    /// The requested input, as pretty-printed JSON.
    pub input: String,
}

impl ToolCallForm {
    /// Builds the form of `call`.
    pub fn from_call(call: &ToolCall) -> Self {
        let input = serde_json::to_string_pretty(&call.input)
            .unwrap_or_else(|_| call.input.to_string());
        Self {
            id: call.id.clone(),
            name: call.name.clone(),
            input,
        }
    }
}

/// A conversation view.
///
/// Methods are called from the client's tasks, implementations must not
/// block for long. Nothing here is fallible: a view that can fail should
/// log and carry on.
pub trait View: Send + Sync + 'static {
    /// Appends a plain-text user message. The text is never markup.
    fn append_user_message(&self, text: &str);

    /// Appends an empty assistant message node.
    fn append_assistant_message(&self) -> MessageId;

    /// Replaces the content of an assistant message node with `html`.
    fn update_assistant_message(&self, id: MessageId, html: &str);

    /// Scrolls the conversation to its latest message.
    fn scroll_to_bottom(&self);

    /// Removes every message.
    fn clear_messages(&self);

    /// Shows or hides the tool call section.
    fn set_tool_section_visible(&self, visible: bool);

    /// Replaces every rendered tool call form with `forms`, in order.
    fn render_tool_calls(&self, forms: &[ToolCallForm]);

    /// Removes every rendered tool call form.
    fn clear_tool_calls(&self);

    /// Switches the submit control of a form between its busy state and
    /// its idle, enabled state.
    fn set_tool_submitting(&self, id: &str, submitting: bool);

    /// Replaces the form of `id` with a read-only display of the
    /// submitted result.
    fn show_tool_result(&self, id: &str, result: &str);

    /// Shows a blocking notice.
    fn alert(&self, text: &str);

    /// Updates the connection indicator.
    fn set_status(&self, status: Status);

    /// Updates the label naming the current conversation.
    fn set_conversation_label(&self, text: &str);

    /// Enables or disables the message input.
    fn set_input_enabled(&self, enabled: bool);
}
