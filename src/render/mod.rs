//! Human-readable diagnostic rendering for whole causal chains.
//!
//! One block per chain element: type label, tags on node entries, message,
//! and the node's resolved frames with best-effort source snippets.
//! Elements after the first are introduced by a `caused by:` separator.

mod json;
mod source;

pub use json::{render_json, render_json_with};
pub use source::{FsSourceProvider, SourceProvider};

use std::fmt::Write as _;

use crate::error::chain::{walk, DynError};
use crate::error::{Error, Tag};
use crate::stack::StackFrame;

/// Render a causal chain as human-readable text, reading source snippets
/// from the filesystem.
#[must_use]
pub fn error_stack(err: &DynError) -> String {
    error_stack_with(err, &FsSourceProvider)
}

/// Render a causal chain as human-readable text with an injected source
/// provider.
#[must_use]
pub fn error_stack_with(err: &DynError, sources: &dyn SourceProvider) -> String {
    let mut out = String::new();
    let mut first = true;
    walk(Some(err), |element| {
        if !first {
            out.push_str("caused by: ");
        }
        first = false;
        match element.downcast_ref::<Error>() {
            Some(node) => render_node(&mut out, node, sources),
            None => render_foreign(&mut out, element),
        }
        true
    });
    out
}

fn render_node(out: &mut String, node: &Error, sources: &dyn SourceProvider) {
    let tag_list = node.tags();
    let _ = write!(out, "{}", node.type_name());
    if !tag_list.is_empty() {
        let names: Vec<&str> = tag_list.iter().map(Tag::as_str).collect();
        let _ = write!(out, " tags: [{}]", names.join(", "));
    }
    let _ = writeln!(out, " error: {node}");
    for frame in node.stack_frames() {
        if frame.is_runtime() {
            continue;
        }
        render_frame(out, frame, sources);
    }
}

fn render_foreign(out: &mut String, element: &DynError) {
    let _ = writeln!(out, "error: {element}");
}

fn render_frame(out: &mut String, frame: &StackFrame, sources: &dyn SourceProvider) {
    match (&frame.file, frame.line) {
        (Some(file), Some(line)) => {
            let _ = writeln!(out, "    {}:{} (0x{:x})", file.display(), line, frame.ip);
            let name = frame.name.as_deref().unwrap_or("?");
            match sources.source_line(file, line) {
                Some(text) => {
                    let _ = writeln!(out, "        {name} -> {text}");
                }
                None => {
                    let _ = writeln!(out, "        {name} -> <unknown source line>");
                }
            }
        }
        _ => {
            let _ = writeln!(out, "    <unresolved> (0x{:x})", frame.ip);
        }
    }
}

impl Error {
    /// Render this node's full chain as human-readable text. See
    /// [`error_stack`].
    #[must_use]
    pub fn error_stack(&self) -> String {
        error_stack(self)
    }

    /// [`error_stack`](Self::error_stack) with an injected source provider.
    #[must_use]
    pub fn error_stack_with(&self, sources: &dyn SourceProvider) -> String {
        error_stack_with(self, sources)
    }

    /// Render only this node's resolved frames, without the chain.
    #[must_use]
    pub fn stack_text(&self) -> String {
        let mut out = String::new();
        for frame in self.stack_frames() {
            if frame.is_runtime() {
                continue;
            }
            render_frame(&mut out, frame, &FsSourceProvider);
        }
        out
    }
}
