//! Result and Option adapters for lifting failures into diagnosable nodes.

use std::error::Error as StdError;
use std::fmt;

use super::types::{Error, Tag};

/// Adapters on `Result` for wrapping the error side into a node.
pub trait ResultExt<T> {
    /// Wrap the error side into a node, capturing the stack here.
    fn err_wrapped(self) -> Result<T, Error>;

    /// Wrap the error side and attach a classification tag in one step.
    fn err_tagged(self, tag: impl Into<Tag>) -> Result<T, Error>;

    /// Layer a contextual message above the original failure, keeping it as
    /// the causal parent.
    fn err_context(self, message: impl fmt::Display) -> Result<T, Error>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn err_wrapped(self) -> Result<T, Error> {
        self.map_err(Error::wrap)
    }

    fn err_tagged(self, tag: impl Into<Tag>) -> Result<T, Error> {
        self.map_err(|err| Error::wrap(err).tag(tag))
    }

    fn err_context(self, message: impl fmt::Display) -> Result<T, Error> {
        self.map_err(|err| Error::with_cause(message, Error::wrap(err)))
    }
}

/// Adapters on `Option` for turning absence into a diagnosable node.
pub trait OptionExt<T> {
    /// Convert an absent value into an error node with the given message.
    fn or_err(self, message: impl fmt::Display) -> Result<T, Error>;
}

impl<T> OptionExt<T> for Option<T> {
    fn or_err(self, message: impl fmt::Display) -> Result<T, Error> {
        self.ok_or_else(|| Error::new(message))
    }
}
