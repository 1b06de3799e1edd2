//! Result/Option adapters and the construction macros.

use std::fmt;

use causetrace::{ensure, is, walk, Error, OptionExt, ResultExt};

#[derive(Debug)]
struct FlatError(&'static str);

impl fmt::Display for FlatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for FlatError {}

fn guarded(flag: bool) -> causetrace::Result<u32> {
    ensure!(flag, "flag must be set, got {flag}");
    Ok(7)
}

#[test]
fn ensure_bails_with_a_formatted_node() {
    assert_eq!(guarded(true).ok(), Some(7));
    let err = guarded(false).expect_err("guard must fail");
    assert_eq!(err.to_string(), "flag must be set, got false");
    assert!(!err.callers().is_empty());
}

#[test]
fn err_macro_builds_a_leaf() {
    let err = causetrace::err!("code {}", 42);
    assert_eq!(err.to_string(), "code 42");
}

#[test]
fn result_errors_lift_into_nodes() {
    let failing: Result<u32, FlatError> = Err(FlatError("disk unreachable"));
    let err = failing.err_tagged("io_error").expect_err("error side");
    assert!(err.has_tag("io_error"));
    assert_eq!(err.to_string(), "disk unreachable");
}

#[test]
fn context_layers_keep_the_cause() {
    let failing: Result<u32, FlatError> = Err(FlatError("missing row"));
    let err = failing.err_context("loading profile").expect_err("error side");
    assert_eq!(err.to_string(), "loading profile");

    let mut messages = Vec::new();
    walk(Some(&err), |element| {
        messages.push(element.to_string());
        true
    });
    assert!(messages.contains(&"missing row".to_string()));
}

#[test]
fn wrapped_results_match_their_origin() {
    let original = Error::new("origin");
    let failing: causetrace::Result<()> = Err(original.clone());
    let err = failing.err_wrapped().expect_err("error side");
    assert!(is(&err, &original));
    assert_eq!(err.callers().as_ptr(), original.callers().as_ptr());
}

#[test]
fn absent_options_become_errors() {
    let absent: Option<u32> = None;
    let err = absent.or_err("profile not loaded").expect_err("absent");
    assert_eq!(err.to_string(), "profile not loaded");
    assert_eq!(Some(3).or_err("unused").ok(), Some(3));
}
