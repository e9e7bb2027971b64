use std::fmt::Debug;
use std::time::Duration;

const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(30);
const DEFAULT_MAX_HISTORY: usize = 100;

/// Builder for [`ClientConfig`].
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ClientConfigBuilder {
    typing_delay: Option<Duration>,
    use_typing_effect: Option<bool>,
    max_history: Option<usize>,
}

impl ClientConfigBuilder {
    /// Creates a builder with every option left at its default.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pause after each revealed character.
    #[inline]
    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = Some(delay);
        self
    }

    /// Sets whether assistant messages are revealed character by
    /// character by default.
    #[inline]
    pub fn with_typing_effect(mut self, enabled: bool) -> Self {
        self.use_typing_effect = Some(enabled);
        self
    }

    /// Sets the maximum number of messages the view should keep.
    #[inline]
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = Some(max_history);
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> ClientConfig {
        ClientConfig {
            typing_delay: self.typing_delay.unwrap_or(DEFAULT_TYPING_DELAY),
            use_typing_effect: self.use_typing_effect.unwrap_or(true),
            max_history: self.max_history.unwrap_or(DEFAULT_MAX_HISTORY),
        }
    }
}

impl Debug for ClientConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfigBuilder")
            .field("typing_delay", &self.typing_delay)
            .field("use_typing_effect", &self.use_typing_effect)
            .field("max_history", &self.max_history)
            .finish()
    }
}

/// Display settings of the chat client.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientConfig {
    typing_delay: Duration,
    use_typing_effect: bool,
    max_history: usize,
}

impl ClientConfig {
    /// The pause after each revealed character.
    #[inline]
    pub fn typing_delay(&self) -> Duration {
        self.typing_delay
    }

    /// Whether assistant messages are animated by default.
    #[inline]
    pub fn use_typing_effect(&self) -> bool {
        self.use_typing_effect
    }

    /// The maximum number of messages a view is expected to keep.
    ///
    /// Views may use it to trim old messages, the client itself does
    /// not enforce it.
    #[inline]
    pub fn max_history(&self) -> usize {
        self.max_history
    }
}

impl Default for ClientConfig {
    #[inline]
    fn default() -> Self {
        ClientConfigBuilder::new().build()
    }
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("typing_delay_ms", &self.typing_delay.as_millis())
            .field("use_typing_effect", &self.use_typing_effect)
            .field("max_history", &self.max_history)
            .finish()
    }
}
