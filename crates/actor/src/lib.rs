//! A lightweight actor runtime.
//!
//! An actor owns a piece of state on a dedicated task. The state is
//! only ever touched by [`Message`] handlers, which run one at a time
//! and never yield, so every mutation is atomic with respect to the
//! others. Long-running work (network calls, timers) is spawned as
//! separate tasks that report back by sending messages.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod error;
mod handle;
mod mailbox;
mod scheduler;

pub use error::ActorDeadError;
pub use handle::Actor;
pub use mailbox::Message;
