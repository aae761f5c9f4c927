//! Todoist REST adapter: the concrete `TaskService` the CLI binds to.

pub mod client;
pub mod error;
pub mod model;

pub use client::TodoistClient;
pub use error::ApiError;
