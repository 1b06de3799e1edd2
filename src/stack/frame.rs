//! Lazy symbolication of captured program counters.

use std::ffi::c_void;
use std::path::{Path, PathBuf};

/// A single resolved call-stack location.
///
/// Every field but the program counter is best-effort: symbols may be
/// missing entirely, and a frame without them still renders by address.
/// Source-line snippets are not stored here; they are looked up at render
/// time through an injected source provider, keeping resolution a pure
/// function of the captured counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackFrame {
    /// Source file path, when debug info is available.
    pub file: Option<PathBuf>,
    /// 1-based line number, when debug info is available.
    pub line: Option<u32>,
    /// Demangled function name with the module path stripped.
    pub name: Option<String>,
    /// Module path of the function (the package/namespace part).
    pub module: Option<String>,
    /// The captured program counter.
    pub ip: usize,
}

impl StackFrame {
    /// Resolve a single program counter.
    pub(crate) fn resolve(ip: usize) -> Self {
        let mut file = None;
        let mut line = None;
        let mut symbol_name: Option<String> = None;
        // return addresses point one past the call instruction; resolve
        // inside the call itself
        let addr = ip.saturating_sub(1) as *mut c_void;
        let mut resolved = false;
        backtrace::resolve(addr, |symbol| {
            // one PC can expand to several inlined frames; keep the
            // innermost, which is where the source line actually is
            if resolved {
                return;
            }
            resolved = true;
            file = symbol.filename().map(Path::to_path_buf);
            line = symbol.lineno();
            symbol_name = symbol.name().map(|name| name.to_string());
        });
        let (module, name) = match symbol_name {
            Some(full) => {
                let (module, name) = split_symbol(&full);
                (module, Some(name))
            }
            None => (None, None),
        };
        StackFrame {
            file,
            line,
            name,
            module,
            ip,
        }
    }

    /// Whether this frame resolves into this library or the capture
    /// machinery itself.
    pub(crate) fn is_internal(&self) -> bool {
        match self.module.as_deref() {
            Some(module) => {
                module == "backtrace"
                    || module == "causetrace"
                    || module.starts_with("backtrace::")
                    || module.starts_with("causetrace::")
            }
            None => false,
        }
    }

    /// Whether this frame belongs to the language runtime or the test
    /// harness rather than application code.
    pub(crate) fn is_runtime(&self) -> bool {
        match self.module.as_deref() {
            Some(module) => {
                module == "std"
                    || module == "core"
                    || module == "alloc"
                    || module == "test"
                    || module.starts_with("std::")
                    || module.starts_with("core::")
                    || module.starts_with("alloc::")
                    || module.starts_with("test::")
            }
            None => self.name.as_deref().is_some_and(|name| {
                name.starts_with("__rust") || name.starts_with("__libc") || name == "_start"
            }),
        }
    }
}

/// Resolve a whole captured stack, dropping the leading frames that belong
/// to this library so the first entry is the caller's call site.
pub(crate) fn resolve_frames(stack: &[usize]) -> Vec<StackFrame> {
    let mut frames: Vec<StackFrame> = stack.iter().map(|&ip| StackFrame::resolve(ip)).collect();
    let internal = frames.iter().take_while(|frame| frame.is_internal()).count();
    frames.drain(..internal);
    frames
}

/// Split a demangled symbol into module path and bare function name.
///
/// The demangler appends a `::h<hex>` disambiguator to legacy-mangled
/// symbols; strip it before splitting.
fn split_symbol(full: &str) -> (Option<String>, String) {
    let full = match full.rfind("::h") {
        Some(idx)
            if !full[idx + 3..].is_empty()
                && full[idx + 3..].chars().all(|c| c.is_ascii_hexdigit()) =>
        {
            &full[..idx]
        }
        _ => full,
    };
    match full.rfind("::") {
        Some(idx) => (Some(full[..idx].to_string()), full[idx + 2..].to_string()),
        None => (None, full.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::split_symbol;

    #[test]
    fn splits_module_and_name() {
        let (module, name) = split_symbol("myapp::db::fetch_row::h1f2e3d4c5b6a7988");
        assert_eq!(module.as_deref(), Some("myapp::db"));
        assert_eq!(name, "fetch_row");
    }

    #[test]
    fn keeps_non_hash_suffix() {
        let (module, name) = split_symbol("myapp::handler");
        assert_eq!(module.as_deref(), Some("myapp"));
        assert_eq!(name, "handler");
    }

    #[test]
    fn bare_symbol_has_no_module() {
        let (module, name) = split_symbol("_start");
        assert_eq!(module, None);
        assert_eq!(name, "_start");
    }
}
