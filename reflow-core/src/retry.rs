//! Retry Wrapper (C6): exponential-jittered backoff with a configurable
//! attempt ceiling, applied uniformly regardless of error kind.
//!
//! Grounded on the teacher's `retry_with_backoff` (config struct + loop
//! over a `FnMut` closure), generalized so the closure is a *factory* —
//! re-invoked on every attempt rather than re-iterating a consumed
//! value. This matters for `TaskService::filter`, which returns a lazy
//! batch stream: each retry must obtain a fresh stream, not resume a
//! stale one.

use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;

const MAX_DELAY: Duration = Duration::from_secs(120);
const INITIAL_DELAY: Duration = Duration::from_millis(200);
const BACKOFF_MULTIPLIER: f64 = 2.0;

/// Retry policy: attempt ceiling, read once at construction time from
/// `RETRY_ATTEMPTS` (default 3).
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: std::env::var("RETRY_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
        }
    }
}

/// Invoke `factory` with exponential-jittered backoff, re-raising the
/// final failure if every attempt is exhausted. No error kind is
/// special-cased: auth, rate-limit and transport failures are all
/// retried uniformly, since at this layer they're indistinguishable from
/// any other transient failure.
pub async fn with_retry<F, Fut, T, E>(config: &RetryConfig, mut factory: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delay = INITIAL_DELAY;

    for attempt in 1..=config.max_attempts.max(1) {
        tracing::debug!(attempt, max_attempts = config.max_attempts, "attempting operation");
        match factory().await {
            Ok(value) => {
                tracing::debug!(attempt, "operation succeeded");
                return Ok(value);
            }
            Err(err) if attempt < config.max_attempts => {
                tracing::debug!(attempt, error = %err, "operation failed, retrying");
                let jitter = rand::thread_rng().gen_range(0.0..1.0);
                let jittered = Duration::from_secs_f64(delay.as_secs_f64() * (0.5 + jitter));
                sleep(jittered.min(MAX_DELAY)).await;
                delay = Duration::from_secs_f64(delay.as_secs_f64() * BACKOFF_MULTIPLIER)
                    .min(MAX_DELAY);
            }
            Err(err) => {
                tracing::debug!(attempt, error = %err, "operation failed, exhausted retries");
                return Err(err);
            }
        }
    }

    unreachable!("loop always returns by the last iteration")
}
