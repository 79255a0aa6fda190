//! Bounded backoff for transient failures.
//!
//! The executor's only unconditional recovery is the single credential
//! refresh. Retrying network trouble and 5xx answers is opt-in: the default
//! [`RetryPolicy`] makes zero extra attempts, and a policy with
//! `max_retries > 0` spaces its attempts with capped exponential backoff
//! plus jitter.
//!
//! # Integration
//!
//! One [`Backoff`] per call, created from the shared policy:
//!
//! ```ignore
//! let mut backoff = Backoff::new(&policy);
//! loop {
//!     match call().await {
//!         Err(e) if is_transient(&e) && backoff.wait().await => continue,
//!         other => return other,
//!     }
//! }
//! ```

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How transient failures are retried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Extra attempts after the first one. 0 disables transient retries.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_backoff: Duration,
    /// Upper bound for any single delay.
    pub max_backoff: Duration,
    /// Growth factor between consecutive delays (≥ 1.0).
    pub multiplier: f64,
    /// Fraction (0.0–1.0) of each delay that is randomized away, so
    /// clients that failed together don't retry together.
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
            multiplier: 2.0,
            jitter: 0.2,
        }
    }
}

impl RetryPolicy {
    /// Hard cap on `max_retries`.
    pub const MAX_RETRIES: u32 = 10;

    /// A policy with `max_retries` and the default timings.
    pub fn with_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// The default policy: transient failures are not retried.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Clamp and fix any out-of-range values so the policy is safe to use.
    ///
    /// Called automatically by [`Backoff::new`]. Rules:
    /// - `max_retries` capped to [`Self::MAX_RETRIES`].
    /// - `multiplier` below 1.0 (or NaN) becomes 1.0.
    /// - `jitter` clamped to `0.0..=1.0`.
    /// - `max_backoff` raised to at least `initial_backoff`.
    pub fn validated(mut self) -> Self {
        if self.max_retries > Self::MAX_RETRIES {
            warn!(
                max_retries = self.max_retries,
                cap = Self::MAX_RETRIES,
                "max_retries exceeds cap, clamping"
            );
            self.max_retries = Self::MAX_RETRIES;
        }
        if self.multiplier.is_nan() || self.multiplier < 1.0 {
            self.multiplier = 1.0;
        }
        self.jitter = if self.jitter.is_nan() {
            0.0
        } else {
            self.jitter.clamp(0.0, 1.0)
        };
        if self.max_backoff < self.initial_backoff {
            self.max_backoff = self.initial_backoff;
        }
        self
    }

    /// `true` if at least one transient retry is allowed.
    pub fn is_enabled(&self) -> bool {
        self.max_retries > 0
    }

    /// Delay before retry number `retry` (1-based), before jitter.
    pub fn base_delay(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(64) as i32;
        let scaled = self.initial_backoff.as_nanos() as f64
            * self.multiplier.powi(exponent);
        let capped = scaled.min(self.max_backoff.as_nanos() as f64);
        Duration::from_nanos(capped.max(0.0).round() as u64)
    }
}

// ---------------------------------------------------------------------------
// Backoff
// ---------------------------------------------------------------------------

/// Per-call retry state: how many retries were spent, what to wait next.
#[derive(Debug)]
pub struct Backoff {
    policy: RetryPolicy,
    retries: u32,
}

impl Backoff {
    pub fn new(policy: &RetryPolicy) -> Self {
        Self {
            policy: policy.clone().validated(),
            retries: 0,
        }
    }

    /// Reserves the next retry and returns how long to wait before it, or
    /// `None` once the budget is spent.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.retries >= self.policy.max_retries {
            return None;
        }
        self.retries += 1;
        let base = self.policy.base_delay(self.retries);
        let delay = if self.policy.jitter > 0.0 {
            let cut: f64 = rand::rng().random_range(0.0..=self.policy.jitter);
            base.mul_f64(1.0 - cut)
        } else {
            base
        };
        trace!(retry = self.retries, delay_ms = delay.as_millis() as u64, "backoff");
        Some(delay)
    }

    /// Sleeps until the next retry is due. Returns `false` without
    /// sleeping when no retries are left.
    pub async fn wait(&mut self) -> bool {
        match self.next_delay() {
            Some(delay) => {
                tokio::time::sleep(delay).await;
                true
            }
            None => false,
        }
    }

    /// Retries reserved so far.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Retries still available.
    pub fn remaining(&self) -> u32 {
        self.policy.max_retries - self.retries
    }
}
