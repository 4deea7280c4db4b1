//! CloudFront invalidation

mod cli;
mod client;
mod invalidate;
mod types;

use anyhow::{Context, Result};
use std::time::Duration;

pub use cli::CloudFrontCommand;
use client::{CloudFrontApi, CloudFrontClient};

use crate::util::config::CloudFrontSettings;
use crate::util::{load_sdk_config, AwsOptions};

/// Run a CloudFront command
pub async fn run(
    cmd: CloudFrontCommand,
    aws: &AwsOptions,
    settings: &CloudFrontSettings,
) -> Result<()> {
    match cmd {
        CloudFrontCommand::Invalidate {
            distribution,
            paths,
            no_wait,
        } => {
            let client = connect(aws).await;
            let reference = invalidate::caller_reference(&chrono::Local::now());
            let poll = (!no_wait).then(|| settings.poll_interval());
            cmd_invalidate(&client, &distribution, paths, &reference, poll).await
        }
    }
}

#[cfg(not(tarpaulin_include))]
async fn connect(aws: &AwsOptions) -> CloudFrontClient {
    let config = load_sdk_config(aws).await;
    CloudFrontClient::new(&config)
}

/// Invalidate, then wait when a poll interval is given
async fn cmd_invalidate(
    api: &impl CloudFrontApi,
    distribution: &str,
    paths: Vec<String>,
    caller_reference: &str,
    poll: Option<Duration>,
) -> Result<()> {
    let dist = invalidate::resolve_distribution(api, distribution)
        .await
        .context("couldn't parse args")?;

    invalidate::log_distribution(&dist);

    let paths = invalidate::invalidation_paths(paths);
    let invalidation = api
        .create_invalidation(&dist.id, &paths, caller_reference)
        .await
        .context("couldn't invalidate distribution")?;

    tracing::info!("invalidation created: {}", invalidation);

    if let Some(interval) = poll {
        invalidate::wait_for_invalidation(api, &dist.id, &invalidation, interval).await;
    }

    Ok(())
}
