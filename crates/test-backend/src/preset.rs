use agentic_chat_protocol::{ChatMessage, ChatResponse, ErrorKind, ToolCall};
use serde::{Deserialize, Serialize};

/// A scripted answer for one backend request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetResponse {
    /// The request succeeds with this response.
    #[serde(rename = "respond")]
    Respond(ChatResponse),
    /// The request fails.
    #[serde(rename = "fail")]
    Fail(PresetFailure),
}

/// A scripted failure.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresetFailure {
    /// `true` for an API failure, `false` for a network failure.
    pub api: bool,
    /// The HTTP status of an API failure.
    pub status: Option<u16>,
    /// The user-facing error message.
    pub message: String,
}

impl PresetFailure {
    #[inline]
    pub(crate) fn kind(&self) -> ErrorKind {
        if self.api {
            ErrorKind::Api
        } else {
            ErrorKind::Network
        }
    }
}

impl PresetResponse {
    /// A response carrying only assistant text.
    #[inline]
    pub fn message<S: Into<String>>(content: S) -> Self {
        Self::Respond(ChatResponse {
            conversation_id: None,
            message: Some(ChatMessage::assistant(content)),
            tool_calls: vec![],
        })
    }

    /// A full response.
    #[inline]
    pub fn with_parts(
        conversation_id: Option<&str>,
        content: Option<&str>,
        tool_calls: Vec<ToolCall>,
    ) -> Self {
        Self::Respond(ChatResponse {
            conversation_id: conversation_id.map(ToOwned::to_owned),
            message: content.map(ChatMessage::assistant),
            tool_calls,
        })
    }

    /// An API failure with the given status and message.
    #[inline]
    pub fn api_error<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Fail(PresetFailure {
            api: true,
            status: Some(status),
            message: message.into(),
        })
    }

    /// A transport failure.
    #[inline]
    pub fn network_error<S: Into<String>>(message: S) -> Self {
        Self::Fail(PresetFailure {
            api: false,
            status: None,
            message: message.into(),
        })
    }
}
