//! Machine-readable chain rendering.
//!
//! Carries the same information set as the text mode: per-element type,
//! tag list, message, and frame list.

use serde::Serialize;

use super::source::{FsSourceProvider, SourceProvider};
use crate::error::chain::{walk, DynError};
use crate::error::Error;
use crate::stack::StackFrame;

#[derive(Serialize)]
struct ChainEntry {
    #[serde(rename = "type")]
    type_name: String,
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stack: Vec<FrameEntry>,
}

#[derive(Serialize)]
struct FrameEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

/// Render a causal chain as pretty-printed JSON, reading snippets from the
/// filesystem.
#[must_use]
pub fn render_json(err: &DynError) -> String {
    render_json_with(err, &FsSourceProvider)
}

/// Render a causal chain as pretty-printed JSON with an injected source
/// provider.
#[must_use]
pub fn render_json_with(err: &DynError, sources: &dyn SourceProvider) -> String {
    let mut entries: Vec<ChainEntry> = Vec::new();
    walk(Some(err), |element| {
        let entry = match element.downcast_ref::<Error>() {
            Some(node) => ChainEntry {
                type_name: node.type_name().to_string(),
                error: node.to_string(),
                tags: node
                    .tags()
                    .iter()
                    .map(|tag| tag.as_str().to_string())
                    .collect(),
                stack: node
                    .stack_frames()
                    .iter()
                    .filter(|frame| !frame.is_runtime())
                    .map(|frame| frame_entry(frame, sources))
                    .collect(),
            },
            None => ChainEntry {
                type_name: String::from("dyn std::error::Error"),
                error: element.to_string(),
                tags: Vec::new(),
                stack: Vec::new(),
            },
        };
        entries.push(entry);
        true
    });
    serde_json::to_string_pretty(&entries).unwrap_or_else(|_| String::from("[]"))
}

fn frame_entry(frame: &StackFrame, sources: &dyn SourceProvider) -> FrameEntry {
    let source = match (&frame.file, frame.line) {
        (Some(file), Some(line)) => sources.source_line(file, line),
        _ => None,
    };
    FrameEntry {
        file: frame
            .file
            .as_ref()
            .map(|path| path.display().to_string()),
        line: frame.line,
        function: frame.name.clone(),
        module: frame.module.clone(),
        source,
    }
}
