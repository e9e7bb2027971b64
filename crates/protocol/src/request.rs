use serde::{Deserialize, Serialize};

/// The author of a chat message.
///
/// Defaults to [`Role::Assistant`], which is what a backend reply
/// without a role stands for.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human using the client.
    User,
    /// The conversational model behind the backend.
    #[default]
    Assistant,
}

/// A single chat message.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote the message.
    #[serde(default)]
    pub role: Role,
    /// Text of the message.
    pub content: String,
}

impl ChatMessage {
    /// Creates a user message.
    #[inline]
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates an assistant message.
    #[inline]
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of a chat request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Messages to append to the conversation.
    pub messages: Vec<ChatMessage>,
    /// The conversation to continue, `None` starts a new one.
    ///
    /// Always serialized, as `null` when absent.
    pub conversation_id: Option<String>,
}

/// A human-supplied result for a tool call.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolResult {
    /// The id of the tool call this result answers.
    pub tool_call_id: String,
    /// The result text.
    pub result: String,
}

/// Body of a tool results request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolResultsRequest {
    /// The conversation the tool calls belong to.
    pub conversation_id: String,
    /// Results for one or more tool calls.
    pub tool_results: Vec<ToolResult>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_new_conversation_serializes_null_id() {
        let req = ChatRequest {
            messages: vec![ChatMessage::user("hello")],
            conversation_id: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "messages": [{ "role": "user", "content": "hello" }],
                "conversation_id": null
            })
        );
    }

    #[test]
    fn test_tool_results_shape() {
        let req = ToolResultsRequest {
            conversation_id: "abc123".to_owned(),
            tool_results: vec![ToolResult {
                tool_call_id: "t1".to_owned(),
                result: "42".to_owned(),
            }],
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "conversation_id": "abc123",
                "tool_results": [{ "tool_call_id": "t1", "result": "42" }]
            })
        );
    }
}
