use std::sync::Arc;

use tokio::time::sleep;

use crate::config::ClientConfig;
use crate::format::format_message;
use crate::typing::reveal_steps;
use crate::view::View;

/// Appends messages to a [`View`], formatting and animating assistant
/// text.
#[derive(Clone)]
pub struct MessageRenderer {
    view: Arc<dyn View>,
    config: Arc<ClientConfig>,
}

impl MessageRenderer {
    /// Creates a renderer drawing on `view`.
    #[inline]
    pub fn new(view: Arc<dyn View>, config: ClientConfig) -> Self {
        Self {
            view,
            config: Arc::new(config),
        }
    }

    /// The display settings in use.
    #[inline]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Appends a user message and scrolls to it.
    pub fn add_user_message(&self, text: &str) {
        self.view.append_user_message(text);
        self.view.scroll_to_bottom();
    }

    /// Appends an assistant message.
    ///
    /// The message node is appended before this returns. The returned
    /// future fills it in, revealing the text character by character
    /// when `animate` is set, and resolves once the whole text is shown.
    /// It cannot be cancelled: dropping it leaves the node partially
    /// filled.
    pub fn add_assistant_message(
        &self,
        text: &str,
        animate: bool,
    ) -> impl Future<Output = ()> + Send + 'static {
        let html = format_message(text);
        let view = Arc::clone(&self.view);
        let delay = self.config.typing_delay();
        let id = view.append_assistant_message();

        async move {
            if animate {
                for step in reveal_steps(&html) {
                    view.update_assistant_message(id, &html[..step.end()]);
                    if step.pauses() {
                        sleep(delay).await;
                    }
                }
            } else {
                view.update_assistant_message(id, &html);
            }
            view.scroll_to_bottom();
        }
    }

    /// Appends an assistant message with the configured typing effect.
    #[inline]
    pub fn add_assistant_message_default(
        &self,
        text: &str,
    ) -> impl Future<Output = ()> + Send + 'static {
        self.add_assistant_message(text, self.config.use_typing_effect())
    }

    /// Removes every message from the view.
    #[inline]
    pub fn clear_messages(&self) {
        self.view.clear_messages();
    }
}
