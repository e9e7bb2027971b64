use agentic_chat_protocol::ChatResponse;
use mime::Mime;
use reqwest::{Response, header};
use serde::Deserialize;
use serde_json::Value;

use crate::Error;

/// Error body returned by the server, only `detail` is interesting.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
}

pub async fn read_chat_response(resp: Response) -> Result<ChatResponse, Error> {
    let status = resp.status();
    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or("Unknown status");
        // The body is best-effort, a broken body still yields an API error.
        let body = resp.bytes().await.unwrap_or_default();
        let detail = error_detail(&body);
        let err = Error::api(status.as_u16(), detail.as_deref().unwrap_or(reason));
        warn!("{err}");
        return Err(err);
    }

    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);
    if let Some(content_type) = &content_type {
        if !is_json(content_type) {
            return Err(Error::invalid_response(
                status.as_u16(),
                format!("unexpected content type: {content_type}"),
            ));
        }
    }

    let body = resp.bytes().await.map_err(Error::network)?;
    let chat_resp = serde_json::from_slice::<ChatResponse>(&body)
        .map_err(|err| Error::invalid_response(status.as_u16(), err))?;
    trace!("got a response: {chat_resp:?}");
    Ok(chat_resp)
}

/// Accepts `*/json` and any `+json` media type.
fn is_json(content_type: &str) -> bool {
    content_type
        .parse::<Mime>()
        .map(|m| m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON))
        .unwrap_or(false)
}

/// Extracts a human-readable `detail` from an error body.
///
/// Non-string details (e.g. validation error lists) are rendered as JSON.
fn error_detail(body: &[u8]) -> Option<String> {
    let detail = serde_json::from_slice::<ErrorBody>(body).ok()?.detail?;
    match detail {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
