//! Causal-chain traversal, identity matching, and tag aggregation.
//!
//! The walker is the one traversal everything else is built on: matching
//! (`is`, `has_tag`), aggregation (`tags`), and rendering all reuse it.

use std::error::Error as StdError;
use std::sync::Arc;

use super::types::{Error, Tag};

/// A single causal-chain element as seen by the walker.
pub type DynError = dyn StdError + 'static;

/// Walk a causal chain most-recent-first: root, then its immediate cause,
/// then the cause's cause, until the chain is exhausted.
///
/// Nodes of this crate and foreign error values interleave freely; both
/// expose their next link through the standard
/// [`source`](StdError::source) protocol. `visit` returns whether to
/// continue; an early abort makes `walk` return `false`.
///
/// Cycles are an application error, not assumed absent: the walker tracks
/// visited identities (by reference, with clones of a node collapsing to
/// one identity) and terminates instead of revisiting. An absent root is a
/// no-op with zero visits.
pub fn walk<'a, F>(root: Option<&'a DynError>, mut visit: F) -> bool
where
    F: FnMut(&'a DynError) -> bool,
{
    let Some(mut current) = root else {
        return true;
    };
    let mut seen: Vec<*const ()> = Vec::new();
    loop {
        let id = identity(current);
        if seen.contains(&id) {
            // cycle: stop the walk rather than loop
            return true;
        }
        seen.push(id);
        if !visit(current) {
            return false;
        }
        match current.source() {
            Some(next) => current = next,
            None => return true,
        }
    }
}

/// The identity of a chain element, stable for the duration of a walk.
///
/// Nodes collapse to their shared inner allocation so every clone of a node
/// is the same identity; foreign values are identified by the address of
/// the link holding them.
pub(crate) fn identity(err: &DynError) -> *const () {
    match err.downcast_ref::<Error>() {
        Some(node) => Arc::as_ptr(&node.inner).cast(),
        None => (err as *const DynError).cast(),
    }
}

/// What [`is`] can match a chain against: a [`Tag`] or an error value.
pub trait Matchable {
    /// Does this target match anywhere on `err`'s causal chain?
    fn matches(&self, err: &DynError) -> bool;
}

impl Matchable for Tag {
    fn matches(&self, err: &DynError) -> bool {
        let mut found = false;
        walk(Some(err), |element| {
            if let Some(node) = element.downcast_ref::<Error>() {
                if node.own_tags().iter().any(|tag| tag == self) {
                    found = true;
                    return false;
                }
            }
            true
        });
        found
    }
}

impl<E> Matchable for E
where
    E: StdError + 'static,
{
    fn matches(&self, err: &DynError) -> bool {
        chain_intersects(err, self)
    }
}

impl Matchable for DynError {
    fn matches(&self, err: &DynError) -> bool {
        chain_intersects(err, self)
    }
}

impl Matchable for (dyn StdError + Send + Sync + 'static) {
    fn matches(&self, err: &DynError) -> bool {
        chain_intersects(err, self)
    }
}

/// True when the two chains share an element by identity.
///
/// This is the permissive bidirectional match: a direct hit of `target` on
/// `err`'s chain, or any link of `target`'s own chain appearing in `err`'s
/// chain, so two independently built wrappers around one ultimate cause
/// compare equal. Identity, never message-string comparison.
fn chain_intersects(err: &DynError, target: &DynError) -> bool {
    let mut chain: Vec<*const ()> = Vec::new();
    walk(Some(err), |element| {
        chain.push(identity(element));
        true
    });
    let mut found = false;
    walk(Some(target), |element| {
        if chain.contains(&identity(element)) {
            found = true;
            return false;
        }
        true
    });
    found
}

/// Test whether `err`'s chain matches `target`.
///
/// With a [`Tag`] target this is tag membership anywhere on the chain; with
/// an error target it is the identity match described on
/// [`Matchable`].
pub fn is<T>(err: &DynError, target: &T) -> bool
where
    T: Matchable + ?Sized,
{
    target.matches(err)
}

/// Test whether any node on `err`'s chain carries `tag`.
pub fn has_tag(err: &DynError, tag: impl Into<Tag>) -> bool {
    let tag: Tag = tag.into();
    is(err, &tag)
}

/// Collect every tag visible on `err`'s chain.
///
/// Deduplicated by value, ordered by first appearance during the
/// root-to-cause walk, never by map iteration order, so output is
/// reproducible.
pub fn tags(err: &DynError) -> Vec<Tag> {
    let mut out: Vec<Tag> = Vec::new();
    walk(Some(err), |element| {
        if let Some(node) = element.downcast_ref::<Error>() {
            for tag in node.own_tags() {
                if !out.contains(&tag) {
                    out.push(tag);
                }
            }
        }
        true
    });
    out
}

impl Error {
    /// Every tag visible on this node's chain, first-seen order. See
    /// [`tags`].
    #[must_use]
    pub fn tags(&self) -> Vec<Tag> {
        tags(self)
    }

    /// Whether any node on this chain carries `tag`. See [`has_tag`].
    #[must_use]
    pub fn has_tag(&self, tag: impl Into<Tag>) -> bool {
        has_tag(self, tag)
    }

    /// Whether this chain matches `target`. See [`is`].
    #[must_use]
    pub fn is<T>(&self, target: &T) -> bool
    where
        T: Matchable + ?Sized,
    {
        is(self, target)
    }
}
