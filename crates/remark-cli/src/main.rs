//! Remark CLI - annotate customer feedback through a completion service.

use anyhow::Context;
use clap::Parser;
use remark_annotator::{Annotator, FailurePolicy};
use remark_cli::{table, Cli, CliError, Config, FailureLog};
use remark_client::OpenAiClient;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log to stderr; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;

    // Command line overrides the config file
    if let Some(model) = &cli.model {
        config.client.model = model.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.client.base_url = base_url.clone();
    }
    if let Some(api_key) = &cli.api_key {
        config.client.api_key = Some(api_key.clone());
    }
    if cli.fail_fast {
        config.annotator.failure_policy = FailurePolicy::Abort;
    }
    if cli.strict_sentiment {
        config.annotator.strict_sentiment = true;
    }

    config.annotator.validate().map_err(CliError::Config)?;

    let failure_log = FailureLog::new(&cli.error_log);

    // A missing credential halts here, before any record is read
    let api_key = match config.require_api_key() {
        Ok(key) => key,
        Err(e) => {
            failure_log.record("credential_missing", &e.to_string())?;
            return Err(e.into());
        }
    };

    let records = table::read_records(&cli.input, &cli.column)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    info!("loaded {} rows from {}", records.len(), cli.input.display());

    let client = OpenAiClient::with_timeout(
        api_key,
        config.client.model.clone(),
        Duration::from_secs(config.client.timeout_secs),
    )
    .with_base_url(config.client.base_url.clone());

    let annotator = Annotator::new(client, config.annotator.clone())
        .with_model_name(config.client.model.clone());

    let outcome = match annotator.annotate_batch(records).await {
        Ok(outcome) => outcome,
        Err(e) => {
            // Abort disposition: the failure goes on record, nothing is written
            failure_log.record(e.kind(), &e.to_string())?;
            return Err(e.into());
        }
    };

    for (record, error) in outcome.failures() {
        failure_log.record(error.kind(), &format!("row {}: {}", record.row, error))?;
    }

    let written = table::write_annotations(&cli.output, &cli.column, &outcome)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    println!(
        "Processing complete. Results saved to {}.",
        cli.output.display()
    );
    println!(
        "{} annotated, {} failed, {} dropped as blank.",
        written, outcome.metadata.records_failed, outcome.metadata.records_dropped
    );

    Ok(())
}
