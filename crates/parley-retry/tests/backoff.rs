//! Integration tests for `Backoff::wait`.
//!
//! Uses paused Tokio time: `sleep` resolves as soon as the runtime has
//! nothing else to do, and `Instant::now()` advances by exactly the slept
//! amount, so the total wait is deterministic.

use std::time::Duration;

use parley_retry::{Backoff, RetryPolicy};
use tokio::time::Instant;

fn policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        initial_backoff: Duration::from_millis(100),
        max_backoff: Duration::from_secs(1),
        multiplier: 2.0,
        jitter: 0.0,
    }
}

/// Paused time advances to timer deadlines, which the timer wheel rounds
/// to whole milliseconds, so allow a few milliseconds of slack.
fn assert_elapsed(start: Instant, expected: Duration) {
    let elapsed = start.elapsed();
    assert!(
        elapsed >= expected && elapsed <= expected + Duration::from_millis(5),
        "expected ~{expected:?}, got {elapsed:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn test_wait_sleeps_for_each_exponential_delay() {
    let mut backoff = Backoff::new(&policy(3));
    let start = Instant::now();

    assert!(backoff.wait().await);
    assert_elapsed(start, Duration::from_millis(100));
    assert!(backoff.wait().await);
    assert_elapsed(start, Duration::from_millis(300));
    assert!(backoff.wait().await);
    assert_elapsed(start, Duration::from_millis(700));
}

#[tokio::test(start_paused = true)]
async fn test_wait_returns_false_without_sleeping_when_exhausted() {
    let mut backoff = Backoff::new(&policy(1));
    assert!(backoff.wait().await);

    let before = Instant::now();
    assert!(!backoff.wait().await);
    assert_eq!(before.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_disabled_policy_never_waits() {
    let mut backoff = Backoff::new(&RetryPolicy::disabled());
    let start = Instant::now();

    assert!(!backoff.wait().await);
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_eq!(backoff.retries(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_total_wait_is_bounded_by_cap() {
    // Ten retries with a 1s cap can never wait longer than ten seconds.
    let mut backoff = Backoff::new(&policy(RetryPolicy::MAX_RETRIES));
    let start = Instant::now();
    while backoff.wait().await {}

    assert_eq!(backoff.retries(), RetryPolicy::MAX_RETRIES);
    assert!(start.elapsed() <= Duration::from_millis(10_010));
}
