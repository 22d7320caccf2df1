//! Diagnostic logging via `tracing`.
//!
//! Logs go to stderr; stdout is reserved for reports.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "linterlog=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `verbose`. Calling this more than
/// once is harmless: later calls leave the first subscriber in place.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "warn");
        assert_eq!(default_filter(true), "linterlog=debug");
    }

    #[test]
    fn test_init_twice() {
        init(false);
        init(true);
    }
}
