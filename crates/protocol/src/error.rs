use std::fmt::{self, Display};

/// The kind of error that occurred while talking to the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request never got a response (connection refused, DNS, reset).
    Network,
    /// The server responded with a non-successful status.
    Api,
    /// The server responded successfully but the body is unusable.
    InvalidResponse,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Network => write!(f, "Network error"),
            ErrorKind::Api => write!(f, "API error"),
            ErrorKind::InvalidResponse => write!(f, "Invalid response"),
        }
    }
}
