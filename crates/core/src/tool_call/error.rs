use std::error::Error;
use std::fmt::{self, Display};

/// Why a tool result was not submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubmitError {
    /// No pending tool call has this id.
    NotFound,
    /// The result is empty after trimming.
    EmptyResult,
    /// A result for this call is already being submitted.
    InFlight,
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::NotFound => write!(f, "Tool call not found"),
            SubmitError::EmptyResult => {
                write!(f, "Please enter a result for this tool call.")
            }
            SubmitError::InFlight => {
                write!(f, "A result for this tool call is being submitted")
            }
        }
    }
}

impl Error for SubmitError {}
