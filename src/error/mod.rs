//! Error-node model: construction, causal chains, classification tags.
//!
//! Provides a diagnosable-error system with:
//! - Error chaining and cause preservation across program layers
//! - Stack capture at creation with lazy, cached symbolication
//! - Classification tags queryable anywhere on a chain
//! - Adapters for lifting standard results into diagnosable nodes

pub mod chain;
pub mod constructors;
pub mod display;
pub mod extensions;
pub mod logging;
pub mod macros;
pub mod types;

pub use chain::{has_tag, is, tags, walk, DynError, Matchable};
pub use extensions::{OptionExt, ResultExt};
pub use types::{Cause, Error, Result, Tag};
