//! Tracing initialization for the CLI binary.
//!
//! No OTLP export here: this binary has no metrics backend to ship to,
//! so we keep the `fmt` layer only, driven by `REFLOW_LOG` (falling
//! back to `RUST_LOG`, falling back to `info`).

use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = std::env::var("REFLOW_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}
