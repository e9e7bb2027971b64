use std::error::Error;
use std::fmt::{self, Display};

/// Returned when a message could not be delivered, or a query not
/// answered, because the actor has stopped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ActorDeadError;

impl Display for ActorDeadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the actor has stopped")
    }
}

impl Error for ActorDeadError {}
