//! Client-side chat logic: sending messages, rendering replies, and the
//! human-in-the-loop tool call workflow.
//!
//! Nothing in this crate draws anything. All output goes through a
//! [`View`], which the host application implements for its rendering
//! surface (a terminal, a GUI, a test recorder).

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod backend_client;
mod config;
mod controller;
pub mod format;
mod renderer;
#[cfg(test)]
mod test_support;
pub mod tool_call;
pub mod typing;
pub mod view;

pub use agentic_chat_actor::ActorDeadError;
pub use backend_client::{BackendClient, ClientResult};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use controller::{ChatBuilder, ChatController};
pub use renderer::MessageRenderer;
pub use view::{MessageId, Status, ToolCallForm, View};
