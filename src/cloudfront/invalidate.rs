//! Distribution lookup and invalidation

use anyhow::{bail, Context, Result};
use chrono::{DateTime, TimeZone};
use std::time::Duration;

use super::client::CloudFrontApi;
use super::types::Distribution;

/// Path invalidated when none is given
pub const DEFAULT_PATH: &str = "/*";

/// Paths to invalidate, defaulting to everything
pub fn invalidation_paths(paths: Vec<String>) -> Vec<String> {
    if paths.is_empty() {
        vec![DEFAULT_PATH.to_string()]
    } else {
        paths
    }
}

/// Caller reference for an invalidation: the timestamp as `YYYYMMDDhhmmss`
pub fn caller_reference<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%Y%m%d%H%M%S").to_string()
}

/// Look a distribution up by id, falling back to an alias match
pub async fn resolve_distribution(api: &impl CloudFrontApi, arg: &str) -> Result<Distribution> {
    if let Some(dist) = api.get_distribution(arg).await.context("get distribution")? {
        return Ok(dist);
    }

    tracing::debug!("no distribution with id {}, searching aliases", arg);

    let id = find_distribution_by_alias(api, arg)
        .await
        .context("find distribution")?;

    match api.get_distribution(&id).await.context("get distribution")? {
        Some(dist) => Ok(dist),
        None => bail!("distribution {} disappeared", id),
    }
}

/// Id of the first distribution with `alias` among its aliases
pub async fn find_distribution_by_alias(api: &impl CloudFrontApi, alias: &str) -> Result<String> {
    let mut marker = None;

    loop {
        let page = api.list_distributions(marker).await?;

        if let Some(found) = page
            .items
            .iter()
            .find(|d| d.aliases.iter().any(|a| a == alias))
        {
            return Ok(found.id.clone());
        }

        match page.next_marker {
            Some(next) => marker = Some(next),
            None => break,
        }
    }

    bail!("no distribution with alias {}", alias)
}

/// Log the distribution id, comment and aliases
pub fn log_distribution(dist: &Distribution) {
    tracing::debug!(arn = %dist.arn, "resolved distribution");
    tracing::info!("{}: {}", dist.id, dist.comment);
    for alias in &dist.aliases {
        tracing::info!(" - {}", alias);
    }
}

/// Poll until the invalidation completes
///
/// A failed status request is logged and retried after the poll interval.
pub async fn wait_for_invalidation(
    api: &impl CloudFrontApi,
    distribution_id: &str,
    invalidation_id: &str,
    poll_interval: Duration,
) {
    loop {
        match api.get_invalidation(distribution_id, invalidation_id).await {
            Ok(status) if status.is_completed() => {
                tracing::info!("invalidation complete");
                return;
            }
            Ok(status) => {
                tracing::debug!(%status, "invalidation status");
                tracing::info!("waiting on invalidation to complete");
            }
            Err(err) => tracing::warn!("couldn't get status: {:#}", err),
        }

        tokio::time::sleep(poll_interval).await;
    }
}
