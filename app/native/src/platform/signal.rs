//! Cooperative cancellation for the build loop.
//!
//! The token is a shared flag. Signal handlers only set it; the loop polls it
//! between cycles and while waiting, so a cycle in progress always completes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use signal_hook::consts::{SIGINT, SIGTERM};

/// How often [`CancellationToken::wait`] re-checks the flag.
const POLL_SLICE: Duration = Duration::from_millis(100);

/// Clonable stop flag shared between the signal handler and the loop.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Requests a stop.
    pub fn cancel(&self) { self.cancelled.store(true, Ordering::SeqCst); }

    /// Returns whether a stop was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool { self.cancelled.load(Ordering::SeqCst) }

    /// Cancels this token on SIGINT or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if a handler cannot be installed.
    pub fn register_signals(&self) -> std::io::Result<()> {
        for signal in [SIGINT, SIGTERM] {
            signal_hook::flag::register(signal, Arc::clone(&self.cancelled))?;
        }
        Ok(())
    }

    /// Sleeps for `duration` unless cancelled first.
    ///
    /// Returns `true` if the full duration elapsed, `false` on cancellation.
    #[must_use]
    pub fn wait(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;

        loop {
            if self.is_cancelled() {
                return false;
            }

            let now = Instant::now();
            if now >= deadline {
                return true;
            }

            std::thread::sleep(POLL_SLICE.min(deadline - now));
        }
    }
}
