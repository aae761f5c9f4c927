//! Command-line surface: flags, defaults, and environment fallbacks.

use std::path::PathBuf;

use clap::Parser;

const DEFAULT_FILTER: &str = "!assigned to:others & !no date & !recurring & no deadline";

#[derive(Debug, Parser)]
#[command(name = "reflow", about = "Reschedule open tasks against per-day capacity rules")]
pub struct Cli {
    /// Query passed verbatim to the remote task service.
    #[arg(long, default_value = DEFAULT_FILTER)]
    pub filter: String,

    /// Path to rule JSON; absent falls back to a flat capacity of 10 with no rules.
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Skip dispatch; log intended updates instead.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Auth token for the remote task service. Left unset, the request
    /// reaches the remote with no credentials and surfaces as an auth
    /// failure there rather than aborting argument parsing.
    #[arg(long, env = "TODOIST_USER_TOKEN")]
    pub token: Option<String>,

    /// IANA time zone used for "today" and for cron firings.
    #[arg(long, default_value = "Etc/UTC")]
    pub time_zone: String,

    /// Five-field cron expression. When set, the process runs in cron mode
    /// instead of a single one-shot pass.
    #[arg(long)]
    pub schedule: Option<String>,
}
