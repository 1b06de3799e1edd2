//! Core error-node types and definitions.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::{Arc, RwLock};

use once_cell::sync::OnceCell;

use crate::stack::StackFrame;

/// A shared causal link: a node of this crate or any foreign error value.
///
/// Links are reference-counted so callers can keep a handle to a sentinel or
/// an intermediate node and later test membership by identity.
pub type Cause = Arc<dyn StdError + Send + Sync + 'static>;

/// Result type alias using our [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// A diagnosable error node.
///
/// Pairs a message or wrapped native error with an optional causal parent,
/// a set of classification [`Tag`]s, and the call stack captured at the
/// moment of construction. Cloning is cheap and clones share identity: a
/// clone refers to the same node for matching and cycle detection.
#[derive(Clone, Debug)]
pub struct Error {
    pub(crate) inner: Arc<ErrorInner>,
}

#[derive(Debug)]
pub(crate) struct ErrorInner {
    /// What failed: a plain message or a wrapped native error.
    pub(crate) payload: Payload,
    /// Explicit causal predecessor. Always `None` for `Foreign` payloads;
    /// their chain continues through the wrapped value itself.
    pub(crate) parent: Option<Cause>,
    /// Classification tags in insertion order. Duplicates are permitted
    /// here; aggregation deduplicates.
    pub(crate) tags: RwLock<Vec<Tag>>,
    /// Raw program counters captured at construction, never re-captured.
    pub(crate) stack: Vec<usize>,
    /// Resolved frames, computed at most once per node.
    pub(crate) frames: OnceCell<Vec<StackFrame>>,
}

/// The node payload, fixed at construction and never re-inspected.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Payload {
    /// A plain human-readable message.
    #[error("{0}")]
    Message(String),
    /// A wrapped native error value, with its concrete type name recorded
    /// at wrap time (unrecoverable from `dyn Error` later).
    #[error("{error}")]
    Foreign {
        error: Cause,
        type_name: &'static str,
    },
}

/// Borrow a causal link as a plain trait object for chain traversal.
pub(crate) fn as_dyn(cause: &Cause) -> &(dyn StdError + 'static) {
    &**cause
}

/// An opaque classification token attached to an error node.
///
/// Tags are compared by exact string equality and are queried independently
/// of an error's message text or concrete type. Define shared tags as
/// constants:
///
/// ```
/// use causetrace::Tag;
///
/// const DB_ERROR: Tag = Tag::from_static("db_error");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(Cow<'static, str>);

impl Tag {
    /// Create a tag from a static string, usable in `const` contexts.
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Tag(Cow::Borrowed(name))
    }

    /// Create a tag from an owned or borrowed string.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Tag(Cow::Owned(name.into()))
    }

    /// The tag text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Tag::new(name)
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Tag::new(name)
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
