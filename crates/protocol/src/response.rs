use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::request::ChatMessage;

/// Describes a tool call requested by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireToolCall")]
pub struct ToolCall {
    /// Identifier, unique among the calls pending at the same time.
    pub id: String,
    /// Name of the tool to run, empty if the backend gave none.
    pub name: String,
    /// Arbitrary structured input for the tool.
    pub input: Value,
}

/// Tool calls come either as `{id, name, input}` or with the name nested
/// in a tool descriptor, `{id, type, tool: {name, ..}, input}`.
#[derive(Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    tool: Option<WireTool>,
    #[serde(default)]
    input: Value,
}

#[derive(Deserialize)]
struct WireTool {
    #[serde(default)]
    name: Option<String>,
}

impl From<WireToolCall> for ToolCall {
    fn from(wire: WireToolCall) -> Self {
        let name = wire
            .name
            .or_else(|| wire.tool.and_then(|tool| tool.name))
            .unwrap_or_default();
        Self {
            id: wire.id,
            name,
            input: wire.input,
        }
    }
}

/// A response from the backend, for both chat and tool results requests.
///
/// Every field may be absent. A missing `tool_calls` means there is
/// nothing left for the human to do.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The conversation id, possibly newly created or rotated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    /// The assistant reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<ChatMessage>,
    /// Tool calls awaiting human-supplied results.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tool_calls: Vec<ToolCall>,
}

impl ChatResponse {
    /// Returns the assistant text, if any.
    #[inline]
    pub fn message_content(&self) -> Option<&str> {
        self.message.as_ref().map(|msg| msg.content.as_str())
    }

    /// Returns `true` if the response asks for more tool results.
    #[inline]
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
