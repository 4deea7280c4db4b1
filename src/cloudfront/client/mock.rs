//! In-memory CloudFront for tests

use anyhow::{anyhow, Result};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use super::CloudFrontApi;
use crate::cloudfront::types::{
    Distribution, DistributionPage, DistributionSummary, InvalidationStatus,
};

#[derive(Default)]
pub struct MockCloudFrontApi {
    distributions: HashMap<String, Distribution>,
    pages: Vec<Vec<DistributionSummary>>,
    statuses: Mutex<VecDeque<Result<InvalidationStatus, String>>>,
    fail_get: bool,
    pub list_markers: Mutex<Vec<Option<String>>>,
    pub invalidations: Mutex<Vec<(String, Vec<String>, String)>>,
    pub status_requests: Mutex<usize>,
}

impl MockCloudFrontApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_distribution(mut self, id: &str, comment: &str, aliases: &[&str]) -> Self {
        self.distributions.insert(
            id.to_string(),
            Distribution {
                id: id.to_string(),
                arn: format!("arn:aws:cloudfront::123456789012:distribution/{id}"),
                comment: comment.to_string(),
                aliases: aliases.iter().map(|a| a.to_string()).collect(),
            },
        );
        self
    }

    /// Serve these listing pages in order, chained by `NextMarker`
    pub fn with_pages(mut self, pages: Vec<Vec<(&str, &[&str])>>) -> Self {
        self.pages = pages
            .into_iter()
            .map(|page| {
                page.into_iter()
                    .map(|(id, aliases)| DistributionSummary {
                        id: id.to_string(),
                        aliases: aliases.iter().map(|a| a.to_string()).collect(),
                    })
                    .collect()
            })
            .collect();
        self
    }

    /// Answer status requests in this order; an `Err` simulates a failed call
    pub fn with_statuses(self, statuses: Vec<Result<InvalidationStatus, String>>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    /// Make every `GetDistribution` call fail with a non-"not found" error
    pub fn failing_get(mut self) -> Self {
        self.fail_get = true;
        self
    }
}

impl CloudFrontApi for MockCloudFrontApi {
    async fn get_distribution(&self, id: &str) -> Result<Option<Distribution>> {
        if self.fail_get {
            return Err(anyhow!("AccessDenied"));
        }
        Ok(self.distributions.get(id).cloned())
    }

    async fn list_distributions(&self, marker: Option<String>) -> Result<DistributionPage> {
        self.list_markers.lock().unwrap().push(marker.clone());

        let index = match marker {
            Some(marker) => marker.parse::<usize>()?,
            None => 0,
        };
        let next_marker = (index + 1 < self.pages.len()).then(|| (index + 1).to_string());

        Ok(DistributionPage {
            items: self.pages.get(index).cloned().unwrap_or_default(),
            next_marker,
        })
    }

    async fn create_invalidation(
        &self,
        distribution_id: &str,
        paths: &[String],
        caller_reference: &str,
    ) -> Result<String> {
        self.invalidations.lock().unwrap().push((
            distribution_id.to_string(),
            paths.to_vec(),
            caller_reference.to_string(),
        ));
        Ok("I2J0I21PCUYOIK".to_string())
    }

    async fn get_invalidation(
        &self,
        _distribution_id: &str,
        _invalidation_id: &str,
    ) -> Result<InvalidationStatus> {
        *self.status_requests.lock().unwrap() += 1;
        match self.statuses.lock().unwrap().pop_front() {
            Some(Ok(status)) => Ok(status),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Ok(InvalidationStatus::Completed),
        }
    }
}
