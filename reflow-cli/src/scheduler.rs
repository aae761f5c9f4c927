//! One-shot vs. cron-driven scheduler shell.
//!
//! Cron mode registers a single recurring trigger in the configured time
//! zone and runs the planner on each firing. Firings never queue: if a
//! run is still in flight when the next firing arrives, that firing is
//! coalesced away and the scheduler simply waits for the next one after
//! the run completes. A terminal signal stops new firings and awaits
//! the in-flight run before returning.

use std::str::FromStr;
use std::time::Duration;

use chrono::Utc;
use chrono_tz::Tz;
use cron::Schedule;

use crate::error::{CliError, Result};

/// Validate a five-field cron expression (minute hour day-of-month month
/// day-of-week) against the configured time zone. The `cron` crate
/// expects a leading seconds field, so we pin it to `0`.
pub fn parse_schedule(expression: &str, time_zone: &str) -> Result<(Schedule, Tz)> {
    let tz: Tz = time_zone
        .parse()
        .map_err(|_| CliError::InvalidTimeZone(time_zone.to_string()))?;

    let six_field = format!("0 {expression}");
    let schedule = Schedule::from_str(&six_field).map_err(|e| CliError::InvalidCron {
        expression: expression.to_string(),
        reason: e.to_string(),
    })?;

    Ok((schedule, tz))
}

/// Run `run_once` on every cron firing until a shutdown signal arrives.
///
/// `run_once` is re-invoked as a factory so each firing starts a fresh
/// run; its own errors are logged and do not stop the scheduler — only
/// the next trigger does that.
pub async fn run_cron<F, Fut>(schedule: Schedule, tz: Tz, mut run_once: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<()>>,
{
    loop {
        let now = Utc::now().with_timezone(&tz);
        let Some(next_fire) = schedule.after(&now).next() else {
            tracing::warn!("cron schedule has no future occurrences; stopping");
            return Ok(());
        };

        let wait = (next_fire.with_timezone(&Utc) - Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO);

        tracing::info!(next_fire = %next_fire, "scheduler sleeping until next firing");

        tokio::select! {
            _ = tokio::time::sleep(wait) => {
                tracing::info!("cron firing, starting planner run");
                if let Err(err) = run_once().await {
                    tracing::error!(error = %err, "planner run failed; scheduler continues to next firing");
                }
            }
            _ = shutdown_signal() => {
                tracing::info!("shutdown signal received, scheduler stopping before next firing");
                return Ok(());
            }
        }
    }
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(_) => {
            // No SIGTERM support on this platform; fall back to Ctrl+C only.
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
