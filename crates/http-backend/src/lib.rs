//! A chat backend talking JSON over HTTP.

#[macro_use]
extern crate tracing;

mod config;
mod response;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use agentic_chat_protocol::{
    Backend, BackendError, ChatRequest, ChatResponse, ErrorKind,
    ToolResultsRequest,
};
use reqwest::{Client, RequestBuilder, header};
use serde::Serialize;

pub use config::{HttpBackendConfig, HttpBackendConfigBuilder};

/// Error type for [`HttpBackend`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
    status: Option<u16>,
}

impl Error {
    fn network(err: reqwest::Error) -> Self {
        Self {
            message: format!("{err}"),
            kind: ErrorKind::Network,
            status: None,
        }
    }

    fn api(status: u16, detail: &str) -> Self {
        Self {
            message: format!("API error: {status} - {detail}"),
            kind: ErrorKind::Api,
            status: Some(status),
        }
    }

    fn invalid_response(status: u16, reason: impl Display) -> Self {
        Self {
            message: format!("Invalid response: {reason}"),
            kind: ErrorKind::InvalidResponse,
            status: Some(status),
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl BackendError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    fn status(&self) -> Option<u16> {
        self.status
    }
}

/// HTTP chat backend.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    config: Arc<HttpBackendConfig>,
}

impl HttpBackend {
    /// Creates a new `HttpBackend` with the given configuration.
    #[inline]
    pub fn new(config: HttpBackendConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Creates a new `HttpBackend` sharing an existing HTTP client.
    #[inline]
    pub fn with_client(client: Client, config: HttpBackendConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    /// Returns the configuration of this backend.
    #[inline]
    pub fn config(&self) -> &HttpBackendConfig {
        &self.config
    }

    fn post_json<T: Serialize>(&self, url: String, body: &T) -> RequestBuilder {
        self.client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .json(body)
    }
}

impl Backend for HttpBackend {
    type Error = Error;

    fn send_message(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatResponse, Self::Error>> + Send + 'static
    {
        let url = self.config.chat_url();
        debug!("sending {} message(s) to {url}", req.messages.len());
        let resp_fut = self.post_json(url, req).send();
        async move {
            let resp = resp_fut.await.map_err(|err| {
                error!("error sending message: {err}");
                Error::network(err)
            })?;
            response::read_chat_response(resp).await
        }
    }

    fn send_tool_results(
        &self,
        req: &ToolResultsRequest,
    ) -> impl Future<Output = Result<ChatResponse, Self::Error>> + Send + 'static
    {
        let url = self.config.tool_results_url();
        debug!(
            "sending {} tool result(s) for {} to {url}",
            req.tool_results.len(),
            req.conversation_id
        );
        let resp_fut = self.post_json(url, req).send();
        async move {
            let resp = resp_fut.await.map_err(|err| {
                error!("error sending tool results: {err}");
                Error::network(err)
            })?;
            response::read_chat_response(resp).await
        }
    }
}
