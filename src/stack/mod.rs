//! Call-stack capture: bounded raw program counters at node construction.

pub mod frame;

pub use frame::StackFrame;

/// Default bound on the number of program counters recorded per capture.
pub const DEFAULT_MAX_STACK_DEPTH: usize = 50;

/// Configuration for a single stack capture.
///
/// An explicit per-call value rather than process-wide mutable state; it is
/// read at capture time, so every constructor taking a config can be tuned
/// independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Maximum number of program counters recorded.
    pub max_depth: usize,
    /// Leading raw frames to elide before recording begins.
    pub skip: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        CaptureConfig {
            max_depth: DEFAULT_MAX_STACK_DEPTH,
            skip: 0,
        }
    }
}

impl CaptureConfig {
    /// Set the maximum captured depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the number of leading raw frames to elide.
    #[must_use]
    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }
}

/// Capture the calling thread's raw program counters.
///
/// Records at most `config.max_depth` counters after eliding `config.skip`
/// leading physical frames; allocation stays bounded by the configured
/// depth even under very deep recursion. Capture never fails; an empty
/// vector is a valid degenerate result. Frames belonging to this library
/// and the capture machinery are additionally dropped during resolution,
/// so the first resolved frame is the caller's call site even when
/// inlining makes raw frame counts unreliable.
pub fn capture(config: &CaptureConfig) -> Vec<usize> {
    if config.max_depth == 0 {
        return Vec::new();
    }
    let mut pcs = Vec::with_capacity(config.max_depth.min(DEFAULT_MAX_STACK_DEPTH));
    let mut to_skip = config.skip;
    backtrace::trace(|frame| {
        if to_skip > 0 {
            to_skip -= 1;
            return true;
        }
        pcs.push(frame.ip() as usize);
        pcs.len() < config.max_depth
    });
    pcs
}
