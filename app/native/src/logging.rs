//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV_VAR;

/// Returns the filter used when `BACKDROP_LOG` is unset or invalid.
#[must_use]
pub const fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Installs the global subscriber, logging to stderr.
///
/// `BACKDROP_LOG` takes precedence over `verbose`. Calling this twice is
/// harmless; the second call keeps the first subscriber.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
