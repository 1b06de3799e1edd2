//! Display and standard-error trait implementations.

use std::error::Error as StdError;
use std::fmt;

use super::types::{as_dyn, Error, Payload};

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.payload)
    }
}

impl StdError for Error {
    /// The immediate causal link: the explicit parent for message nodes,
    /// the wrapped value itself for wrapped nodes. This makes a node a
    /// citizen of the standard causal-unwrap protocol, so generic consumers
    /// walk through it transparently.
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.inner.payload {
            Payload::Foreign { error, .. } => Some(as_dyn(error)),
            Payload::Message(_) => self.inner.parent.as_ref().map(as_dyn),
        }
    }
}
