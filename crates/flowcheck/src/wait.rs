//! Bounded condition-polling waits.
//!
//! The original tooling this replaces slept for a fixed settle delay after
//! every UI action. Fixed delays are flaky: too short on a slow CI box, too
//! long everywhere else. [`wait_until`] polls a predicate at a fixed
//! interval until it holds or an explicit timeout elapses, preserving the
//! same pass/fail contract with none of the guesswork.

use crate::result::{FlowError, FlowResult};
use std::future::Future;
use std::time::{Duration, Instant};

/// Default timeout for wait operations (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Options for wait operations
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Poll `check` until it returns `true` or the timeout elapses.
///
/// The predicate is checked at least once, even with a zero timeout. A
/// predicate error aborts the wait immediately; expiry yields
/// [`FlowError::Timeout`]. Single bounded attempt, no retry.
///
/// # Errors
///
/// Returns [`FlowError::Timeout`] on expiry, or the predicate's own error.
pub async fn wait_until<F, Fut>(mut check: F, options: &WaitOptions) -> FlowResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = FlowResult<bool>>,
{
    let start = Instant::now();
    loop {
        if check().await? {
            return Ok(());
        }
        if start.elapsed() >= options.timeout() {
            return Err(FlowError::Timeout {
                ms: options.timeout_ms,
            });
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}
