//! Diagnosable errors with causal chains, classification tags, and captured
//! stacks.
//!
//! This crate provides an error-node model for building causal error chains
//! across the layers of a program:
//! - Error chaining through the standard causal-unwrap protocol
//! - Call-stack capture at creation with lazy, cached symbolication
//! - Classification tags queryable anywhere on a chain, independent of
//!   message text or concrete type
//! - Human-readable and machine-readable rendering of whole chains,
//!   including best-effort source-line snippets
//!
//! # Example
//!
//! ```no_run
//! use causetrace::{Error, Tag};
//!
//! const DB_ERROR: Tag = Tag::from_static("db_error");
//!
//! fn fetch() -> causetrace::Result<()> {
//!     Err(Error::new("db timeout").tag(DB_ERROR))
//! }
//!
//! fn handle() -> causetrace::Result<()> {
//!     fetch().map_err(|e| Error::with_cause("service failed", e))
//! }
//!
//! let err = handle().unwrap_err();
//! assert!(err.has_tag(DB_ERROR));
//! eprintln!("{}", err.error_stack());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod render;
pub mod stack;

pub use error::*;
pub use render::{
    error_stack, error_stack_with, render_json, render_json_with, FsSourceProvider,
    SourceProvider,
};
pub use stack::{capture, CaptureConfig, StackFrame, DEFAULT_MAX_STACK_DEPTH};
