//! Wire types and backend contract for the chat client.
//!
//! The chat backend is an opaque collaborator: it takes user messages
//! and tool results, and answers with assistant text and/or tool calls
//! that a human has to fulfil. This crate pins down the JSON shapes
//! exchanged with it and the trait that every backend implementation
//! must satisfy, so the client logic can be driven by a real HTTP
//! server or an in-process fake alike.
//!
//! Types in this crate don't define any behavior.

#![deny(missing_docs)]

mod backend;
mod error;
mod request;
mod response;

pub use backend::*;
pub use error::*;
pub use request::*;
pub use response::*;
