//! Logging glue: `env_logger` initialization and chain logging.

use std::sync::Once;

use log::error;

use super::chain::{walk, DynError};
use super::types::{Error, Tag};

static INIT_LOGGER: Once = Once::new();

/// Initialize the logging system (call once at application startup).
///
/// Sets up `env_logger`; levels are configured through the `RUST_LOG`
/// environment variable, e.g. `RUST_LOG=info` or
/// `RUST_LOG=causetrace=debug`.
pub fn init() {
    INIT_LOGGER.call_once(|| {
        env_logger::Builder::from_default_env()
            .format_timestamp_micros()
            .init();
    });
}

/// Initialize logging for test environments without init conflicts.
pub fn init_test() {
    let _ = env_logger::Builder::from_default_env()
        .is_test(true)
        .try_init();
}

/// Log every element of a causal chain at error level, most recent first.
///
/// Node elements log their own tags alongside the message; foreign elements
/// log the message alone.
pub fn log_chain(err: &DynError) {
    let mut depth = 0usize;
    walk(Some(err), |element| {
        match element.downcast_ref::<Error>() {
            Some(node) => {
                let own = node.own_tags();
                if own.is_empty() {
                    error!("[{depth}] {node}");
                } else {
                    let names: Vec<&str> = own.iter().map(Tag::as_str).collect();
                    error!("[{depth}] {node} (tags: {})", names.join(", "));
                }
            }
            None => error!("[{depth}] {element}"),
        }
        depth += 1;
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_chain_does_not_panic() {
        init_test();

        let err = Error::with_cause("outer failure", Error::new("inner failure").tag("inner"));
        log_chain(&err);
    }

    #[test]
    fn test_init_is_idempotent() {
        init_test();
        init_test();
    }
}
