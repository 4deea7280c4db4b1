//! Pruning of obsolete task definition revisions
//!
//! Revisions older than the newest template revision are obsolete. They are
//! deregistered one at a time, then deleted in batches.

use anyhow::{Context, Result};
use std::time::Duration;

use super::client::EcsApi;
use super::template::list_family_arns;
use super::types::Tag;

/// `DeleteTaskDefinitions` accepts at most this many ARNs per call
pub const MAX_DELETE_BATCH: usize = 10;

/// ARNs of `family` older than its newest revision tagged with `tag`
///
/// Revisions newer than the template and the template itself are kept. With
/// no template revision nothing is obsolete.
pub async fn find_obsolete_task_definitions(
    api: &impl EcsApi,
    family: &str,
    tag: &Tag,
) -> Result<Vec<String>> {
    let arns = list_family_arns(api, family).await?;
    let mut template_found = false;
    let mut obsolete = Vec::new();

    for arn in arns {
        if template_found {
            obsolete.push(arn);
            continue;
        }

        let described = api.describe_task_definition(&arn).await?;
        if described.has_tag(tag) {
            tracing::info!("{}: keeping template {}", family, arn);
            template_found = true;
        }
    }

    Ok(obsolete)
}

/// Deregister then delete the given revisions, sleeping `pace` after each call
pub async fn prune_task_definitions(
    api: &impl EcsApi,
    obsolete: &[String],
    pace: Duration,
) -> Result<usize> {
    for arn in obsolete {
        api.deregister_task_definition(arn)
            .await
            .with_context(|| format!("couldn't deactivate taskdef ({arn})"))?;
        tracing::debug!(%arn, "deregistered");
        tokio::time::sleep(pace).await;
    }

    let mut deleted = 0;
    for batch in obsolete.chunks(MAX_DELETE_BATCH) {
        let failures = api
            .delete_task_definitions(batch)
            .await
            .context("couldn't delete taskdefs")?;

        for failure in &failures {
            tracing::warn!("couldn't delete {}: {}", failure.arn, failure.reason);
        }
        deleted += batch.len().saturating_sub(failures.len());

        tokio::time::sleep(pace).await;
    }

    Ok(deleted)
}
