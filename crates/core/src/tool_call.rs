//! The human-in-the-loop tool call workflow.
//!
//! [`PendingToolCalls`] is the bookkeeping of the calls awaiting a result,
//! free of any view or network concern. [`ToolCallManager`] drives it: it
//! renders the forms, submits results through the backend and reconciles
//! the responses.

mod error;
mod manager;
mod pending;

pub use error::SubmitError;
pub use manager::{SubmitOutcome, ToolCallManager, ToolCallManagerBuilder};
pub use pending::{
    Completion, DisplayDecision, PendingState, PendingToolCall,
    PendingToolCalls, Submission,
};
