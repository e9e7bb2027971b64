//! Settings read from the environment.

use std::time::Duration;

use agentic_chat_core::{ClientConfig, ClientConfigBuilder};
use agentic_chat_http_backend::{HttpBackendConfig, HttpBackendConfigBuilder};

const BASE_URL_VAR: &str = "AGENTIC_CHAT_BASE_URL";
const CHAT_PATH_VAR: &str = "AGENTIC_CHAT_CHAT_PATH";
const TOOL_RESULTS_PATH_VAR: &str = "AGENTIC_CHAT_TOOL_RESULTS_PATH";
const TYPING_DELAY_VAR: &str = "AGENTIC_CHAT_TYPING_DELAY_MS";
const TYPING_EFFECT_VAR: &str = "AGENTIC_CHAT_TYPING_EFFECT";

#[derive(Debug)]
pub struct AppConfig {
    pub backend: HttpBackendConfig,
    pub client: ClientConfig,
    /// Problems found while reading the variables. The defaults were used
    /// instead.
    pub warnings: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut warnings = vec![];

        let mut backend = HttpBackendConfigBuilder::new();
        if let Some(base_url) = lookup(BASE_URL_VAR) {
            backend = backend.with_base_url(base_url);
        }
        if let Some(path) = lookup(CHAT_PATH_VAR) {
            backend = backend.with_chat_path(path);
        }
        if let Some(path) = lookup(TOOL_RESULTS_PATH_VAR) {
            backend = backend.with_tool_results_path(path);
        }

        let mut client = ClientConfigBuilder::new();
        if let Some(value) = lookup(TYPING_DELAY_VAR) {
            match value.trim().parse::<u64>() {
                Ok(millis) => {
                    client =
                        client.with_typing_delay(Duration::from_millis(millis));
                }
                Err(err) => warnings.push(format!(
                    "ignoring {TYPING_DELAY_VAR}={value:?}: {err}"
                )),
            }
        }
        if let Some(value) = lookup(TYPING_EFFECT_VAR) {
            match parse_bool(&value) {
                Some(enabled) => client = client.with_typing_effect(enabled),
                None => warnings.push(format!(
                    "ignoring {TYPING_EFFECT_VAR}={value:?}: \
                     expected `true` or `false`"
                )),
            }
        }

        Self {
            backend: backend.build(),
            client: client.build(),
            warnings,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
