//! Logging setup
//!
//! The library emits `tracing` events; hosts that want them on stdout call
//! [`init_logging`] once at startup.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding the log filter (e.g. `debug`, `trening_tracker=trace`)
pub const LOG_ENV: &str = "TRENING_TRACKER_LOG";

/// Install a global fmt subscriber filtered by `TRENING_TRACKER_LOG` (default `info`).
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place and return `false`.
pub fn init_logging() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    init_with_filter(filter)
}

/// Install a global fmt subscriber with an explicit filter directive.
pub fn init_logging_with(directive: &str) -> bool {
    init_with_filter(EnvFilter::new(directive))
}

fn init_with_filter(filter: EnvFilter) -> bool {
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        init_logging_with("warn");
        assert!(!init_logging_with("debug"));
    }
}
