//! Stack capture bounds, skip handling, and lazy frame resolution.

use causetrace::{capture, CaptureConfig, Error};

#[inline(never)]
fn recurse_then_capture(n: usize, config: &CaptureConfig) -> Vec<usize> {
    if n == 0 {
        capture(config)
    } else {
        recurse_then_capture(n - 1, config)
    }
}

#[test]
fn max_depth_bounds_the_capture() {
    let config = CaptureConfig::default().with_max_depth(4);
    let pcs = recurse_then_capture(32, &config);
    assert!(!pcs.is_empty());
    assert!(pcs.len() <= 4);
}

#[test]
fn zero_depth_is_a_valid_degenerate_capture() {
    let pcs = capture(&CaptureConfig::default().with_max_depth(0));
    assert!(pcs.is_empty());
}

#[test]
fn skip_elides_leading_frames() {
    let config = CaptureConfig::default().with_max_depth(200);
    let all = capture(&config);
    let skipped = capture(&config.with_skip(3));
    assert!(!all.is_empty());
    assert!(skipped.len() < all.len());
}

#[test]
fn frames_resolve_lazily_and_cache() {
    let err = Error::new("resolved here");
    assert!(!err.callers().is_empty());
    let first = err.stack_frames().as_ptr();
    let second = err.stack_frames().as_ptr();
    assert_eq!(first, second);
}

#[test]
fn first_resolved_frame_is_the_construction_site() {
    let err = Error::new("calibration point");
    let frames = err.stack_frames();
    assert!(!frames.is_empty());
    assert!(frames[0]
        .module
        .as_deref()
        .map_or(true, |module| !module.starts_with("causetrace")));
    assert!(frames.iter().any(|frame| {
        frame
            .file
            .as_ref()
            .is_some_and(|path| path.ends_with("stack_capture_test.rs"))
    }));
}

#[test]
fn capture_config_is_read_at_capture_time() {
    let shallow = Error::new_with_config("shallow", &CaptureConfig::default().with_max_depth(2));
    assert!(shallow.callers().len() <= 2);

    let default_depth = Error::new("default");
    assert!(default_depth.callers().len() <= causetrace::DEFAULT_MAX_STACK_DEPTH);
}
