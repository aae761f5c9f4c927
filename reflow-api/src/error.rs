//! Error types for the Todoist REST client.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("authentication failed")]
    Auth,

    #[error("rate limited, retry after {retry_after_secs:?}s")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response status {status}: {body}")]
    Http { status: u16, body: String },
}
