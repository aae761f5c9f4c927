use clap::Parser;
use reflow_api::TodoistClient;
use reflow_core::{RetryConfig, RuleSet};

use reflow_cli::cli::Cli;
use reflow_cli::error::{CliError, Result};
use reflow_cli::{logging, scheduler};

#[tokio::main]
async fn main() {
    match run().await {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            tracing::error!(error = %err, "reflow exiting with error");
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<()> {
    let _ = dotenvy::dotenv();
    logging::init_tracing();

    let cli = Cli::parse();

    let rules = RuleSet::load(cli.rules.as_deref())?;
    let client = TodoistClient::new(cli.token.clone().unwrap_or_default());
    let retry_config = RetryConfig::default();

    match &cli.schedule {
        None => {
            let tz: chrono_tz::Tz = cli
                .time_zone
                .parse()
                .map_err(|_| CliError::InvalidTimeZone(cli.time_zone.clone()))?;
            run_once(&client, &cli, &rules, &retry_config, tz).await
        }
        Some(expression) => {
            let (schedule, tz) = scheduler::parse_schedule(expression, &cli.time_zone)?;
            scheduler::run_cron(schedule, tz, || run_once(&client, &cli, &rules, &retry_config, tz))
                .await
        }
    }
}

async fn run_once(
    client: &TodoistClient,
    cli: &Cli,
    rules: &RuleSet,
    retry_config: &RetryConfig,
    tz: chrono_tz::Tz,
) -> Result<()> {
    let today = chrono::Utc::now().with_timezone(&tz).date_naive();

    let outcomes = reflow_core::run(client, &cli.filter, rules, today, cli.dry_run, retry_config)
        .await
        .map_err(|e| CliError::Run(e.to_string()))?;

    for outcome in &outcomes {
        tracing::info!(?outcome, "dispatch outcome");
    }

    Ok(())
}
