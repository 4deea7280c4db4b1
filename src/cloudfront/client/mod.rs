//! CloudFront client

use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_cloudfront::types::{Aliases, DistributionList, InvalidationBatch, Paths};
use aws_sdk_cloudfront::Client;
use std::future::Future;

use super::types::{Distribution, DistributionPage, DistributionSummary, InvalidationStatus};

#[cfg(test)]
pub mod mock;

/// CloudFront API trait for testability
pub trait CloudFrontApi: Send + Sync {
    /// Get a distribution by id; `None` when no such distribution exists
    fn get_distribution(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Distribution>>> + Send;

    /// One page of distributions starting at `marker`
    fn list_distributions(
        &self,
        marker: Option<String>,
    ) -> impl Future<Output = Result<DistributionPage>> + Send;

    /// Create an invalidation and return its id
    fn create_invalidation(
        &self,
        distribution_id: &str,
        paths: &[String],
        caller_reference: &str,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Current status of an invalidation
    fn get_invalidation(
        &self,
        distribution_id: &str,
        invalidation_id: &str,
    ) -> impl Future<Output = Result<InvalidationStatus>> + Send;
}

/// CloudFront client backed by the AWS SDK
pub struct CloudFrontClient {
    client: Client,
}

impl CloudFrontClient {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

impl CloudFrontApi for CloudFrontClient {
    async fn get_distribution(&self, id: &str) -> Result<Option<Distribution>> {
        let resp = match self.client.get_distribution().id(id).send().await {
            Ok(resp) => resp,
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_no_such_distribution()) =>
            {
                return Ok(None);
            }
            Err(err) => return Err(err).context("aws: cloudfront: get distribution"),
        };

        Ok(resp.distribution().map(|d| {
            let config = d.distribution_config();
            Distribution {
                id: d.id().to_string(),
                arn: d.arn().to_string(),
                comment: config.map(|c| c.comment().to_string()).unwrap_or_default(),
                aliases: aliases_of(config.and_then(|c| c.aliases())),
            }
        }))
    }

    async fn list_distributions(&self, marker: Option<String>) -> Result<DistributionPage> {
        let resp = self
            .client
            .list_distributions()
            .set_marker(marker)
            .send()
            .await
            .context("aws: cloudfront: list distributions")?;

        Ok(resp
            .distribution_list()
            .map(distribution_page)
            .unwrap_or_default())
    }

    async fn create_invalidation(
        &self,
        distribution_id: &str,
        paths: &[String],
        caller_reference: &str,
    ) -> Result<String> {
        let batch = invalidation_batch(paths, caller_reference)?;

        let resp = self
            .client
            .create_invalidation()
            .distribution_id(distribution_id)
            .invalidation_batch(batch)
            .send()
            .await
            .context("aws: cloudfront: create invalidation")?;

        Ok(resp
            .invalidation()
            .map(|i| i.id().to_string())
            .unwrap_or_default())
    }

    async fn get_invalidation(
        &self,
        distribution_id: &str,
        invalidation_id: &str,
    ) -> Result<InvalidationStatus> {
        let resp = self
            .client
            .get_invalidation()
            .distribution_id(distribution_id)
            .id(invalidation_id)
            .send()
            .await
            .context("aws: cloudfront: get invalidation")?;

        let status = resp.invalidation().map(|i| i.status()).unwrap_or_default();
        Ok(InvalidationStatus::from(status))
    }
}

/// Next marker only while the listing is truncated
fn distribution_page(list: &DistributionList) -> DistributionPage {
    DistributionPage {
        items: list
            .items()
            .iter()
            .map(|d| DistributionSummary {
                id: d.id().to_string(),
                aliases: aliases_of(d.aliases()),
            })
            .collect(),
        next_marker: list
            .next_marker()
            .filter(|m| list.is_truncated() && !m.is_empty())
            .map(str::to_string),
    }
}

fn aliases_of(aliases: Option<&Aliases>) -> Vec<String> {
    aliases.map(|a| a.items().to_vec()).unwrap_or_default()
}

/// Invalidation request for `paths`; quantity always matches the item count
fn invalidation_batch(paths: &[String], caller_reference: &str) -> Result<InvalidationBatch> {
    let quantity = i32::try_from(paths.len()).context("too many invalidation paths")?;

    let paths = Paths::builder()
        .quantity(quantity)
        .set_items(Some(paths.to_vec()))
        .build()
        .context("build invalidation paths")?;

    InvalidationBatch::builder()
        .paths(paths)
        .caller_reference(caller_reference)
        .build()
        .context("build invalidation batch")
}
