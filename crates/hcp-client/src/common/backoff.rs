//! # Exponential Backoff
//!
//! Provides a bounded exponential backoff with jitter for retries.
//! Used by the HTTP layer for transient failures and by operation polling.
//!
//! Default sequence (before jitter): 250ms, 500ms, 1s, 2s, 4s, 8s, 10s (max).

use rand::Rng;
use std::time::Duration;

/// Default first delay
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(250);
/// Default cap on a single delay
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Exponential backoff calculator
///
/// Each delay is the previous one multiplied by `multiplier`, capped at `max`.
/// With jitter enabled the returned delay is scaled by a random factor in
/// `[0.5, 1.5]` and still capped at `max`.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    /// First delay (for reset)
    initial: Duration,
    /// Delay returned by the next call, before jitter
    current: Duration,
    /// Maximum delay
    max: Duration,
    multiplier: u32,
    jitter: bool,
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_BACKOFF)
    }
}

impl ExponentialBackoff {
    /// Create a new backoff doubling from `initial` up to `max`, with jitter
    #[must_use]
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            current: initial,
            max,
            multiplier: 2,
            jitter: true,
        }
    }

    /// Disable jitter (deterministic sequence)
    #[must_use]
    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    /// Get the next delay and advance the sequence
    pub fn next_backoff(&mut self) -> Duration {
        let base = self.current;
        self.current = self
            .current
            .checked_mul(self.multiplier)
            .unwrap_or(self.max)
            .min(self.max);

        if self.jitter {
            let factor = rand::thread_rng().gen_range(0.5..=1.5);
            base.mul_f64(factor).min(self.max)
        } else {
            base
        }
    }

    /// Reset the backoff to the initial state
    pub fn reset(&mut self) {
        self.current = self.initial;
    }

    /// Calculate the delay for a given attempt number (stateless, no jitter)
    ///
    /// Attempt 0 yields `initial`; each further attempt doubles it, capped at `max`.
    #[must_use]
    pub fn delay_for_attempt(attempt: u32, initial: Duration, max: Duration) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        initial.checked_mul(factor).unwrap_or(max).min(max)
    }
}
