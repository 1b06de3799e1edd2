//! Injected source-text capability for render-time snippets.

use std::fs;
use std::path::Path;

/// Best-effort access to source text for snippet rendering.
///
/// The renderer never reads the filesystem directly; it goes through this
/// trait so rendering is testable without real files and portable to
/// environments without file access. Absence of a line is not an error.
pub trait SourceProvider {
    /// The trimmed text of `line` (1-based) in `file`, if available.
    fn source_line(&self, file: &Path, line: u32) -> Option<String>;
}

/// [`SourceProvider`] that reads source files from the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsSourceProvider;

impl SourceProvider for FsSourceProvider {
    fn source_line(&self, file: &Path, line: u32) -> Option<String> {
        let data = fs::read_to_string(file).ok()?;
        let index = usize::try_from(line).ok()?.checked_sub(1)?;
        data.lines().nth(index).map(|text| text.trim().to_string())
    }
}
