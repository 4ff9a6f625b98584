//! Decorrelated-jitter backoff for the block polling loop.
//!
//! Each delay is drawn from a range that doubles per attempt and is clamped
//! to `cap` twice, so successive polls drift apart instead of hitting the
//! node in lockstep.

use std::time::Duration;

use rand::Rng;

use crate::error::ConfigError;

/// Default floor delay
pub const DEFAULT_BASE: Duration = Duration::from_millis(200);

/// Default ceiling delay
pub const DEFAULT_CAP: Duration = Duration::from_millis(1500);

/// Stateful delay generator; the attempt counter starts at zero
#[derive(Debug, Clone)]
pub struct DecorrelatedJitter {
    base: Duration,
    cap: Duration,
    attempt: u32,
}

impl Default for DecorrelatedJitter {
    fn default() -> Self {
        Self { base: DEFAULT_BASE, cap: DEFAULT_CAP, attempt: 0 }
    }
}

impl DecorrelatedJitter {
    pub fn new(base: Duration, cap: Duration) -> Result<Self, ConfigError> {
        if base > cap {
            return Err(ConfigError::Backoff {
                base_ms: base.as_millis() as u64,
                cap_ms: cap.as_millis() as u64,
            });
        }
        Ok(Self { base, cap, attempt: 0 })
    }

    pub fn base(&self) -> Duration {
        self.base
    }

    pub fn cap(&self) -> Duration {
        self.cap
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Start over from the first attempt
    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    /// Next delay using the thread-local RNG
    pub fn next_delay(&mut self) -> Duration {
        self.next_delay_with(&mut rand::thread_rng())
    }

    /// Next delay drawn from `rng`; always within `[base, cap]`
    pub fn next_delay_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Duration {
        let base = self.base.as_secs_f64();
        let cap = self.cap.as_secs_f64();

        // 2^64 already saturates to the cap for any non-zero base.
        let exponent = self.attempt.min(64) as i32;
        self.attempt = self.attempt.saturating_add(1);

        let temp = cap.min(base * 2f64.powi(exponent));
        let half = temp / 2.0;
        let midpoint_jittered = half + rng.gen_range(0.0..=half);
        let upper = (midpoint_jittered * 3.0).max(base);
        let sleep = cap.min(rng.gen_range(base..=upper));

        // Float rounding must not leak outside the configured bounds.
        Duration::from_secs_f64(sleep).clamp(self.base, self.cap)
    }
}
