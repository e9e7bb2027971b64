use std::fmt::Debug;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_CHAT_PATH: &str = "/api/chat";
const DEFAULT_TOOL_RESULTS_PATH: &str = "/api/tool-results";

/// Builder for [`HttpBackendConfig`].
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct HttpBackendConfigBuilder {
    base_url: Option<String>,
    chat_path: Option<String>,
    tool_results_path: Option<String>,
}

impl HttpBackendConfigBuilder {
    /// Creates a builder with every option left at its default.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the server origin, e.g. `http://localhost:8000`.
    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the path of the chat endpoint.
    #[inline]
    pub fn with_chat_path<S: Into<String>>(mut self, path: S) -> Self {
        self.chat_path = Some(path.into());
        self
    }

    /// Sets the path of the tool results endpoint.
    #[inline]
    pub fn with_tool_results_path<S: Into<String>>(mut self, path: S) -> Self {
        self.tool_results_path = Some(path.into());
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> HttpBackendConfig {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        HttpBackendConfig {
            base_url: base_url.trim_end_matches('/').to_owned(),
            chat_path: normalize_path(self.chat_path, DEFAULT_CHAT_PATH),
            tool_results_path: normalize_path(
                self.tool_results_path,
                DEFAULT_TOOL_RESULTS_PATH,
            ),
        }
    }
}

impl Debug for HttpBackendConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackendConfigBuilder")
            .field("base_url", &self.base_url)
            .field("chat_path", &self.chat_path)
            .field("tool_results_path", &self.tool_results_path)
            .finish()
    }
}

/// Configuration for [`crate::HttpBackend`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HttpBackendConfig {
    pub(crate) base_url: String,
    pub(crate) chat_path: String,
    pub(crate) tool_results_path: String,
}

impl HttpBackendConfig {
    /// Full URL of the chat endpoint.
    #[inline]
    pub fn chat_url(&self) -> String {
        format!("{}{}", self.base_url, self.chat_path)
    }

    /// Full URL of the tool results endpoint.
    #[inline]
    pub fn tool_results_url(&self) -> String {
        format!("{}{}", self.base_url, self.tool_results_path)
    }
}

impl Default for HttpBackendConfig {
    #[inline]
    fn default() -> Self {
        HttpBackendConfigBuilder::new().build()
    }
}

impl Debug for HttpBackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackendConfig")
            .field("chat_url", &self.chat_url())
            .field("tool_results_url", &self.tool_results_url())
            .finish()
    }
}

fn normalize_path(path: Option<String>, default: &str) -> String {
    match path {
        Some(path) if path.starts_with('/') => path,
        Some(path) => format!("/{path}"),
        None => default.to_owned(),
    }
}
