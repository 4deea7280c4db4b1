//! In-memory Parameter Store for tests

use anyhow::Result;
use std::sync::Mutex;

use super::SsmApi;
use crate::ssm::types::{DeleteOutcome, ParameterPage, RawParameter};

#[derive(Default)]
pub struct MockSsmApi {
    pages: Vec<Vec<RawParameter>>,
    invalid: Vec<String>,
    fail_put: Option<String>,
    pub requests: Mutex<Vec<(String, bool, Option<String>)>>,
    pub puts: Mutex<Vec<(String, String, bool)>>,
    pub deletes: Mutex<Vec<Vec<String>>>,
}

impl MockSsmApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve these pages in order, chained by `NextToken`
    pub fn with_pages(mut self, pages: Vec<Vec<RawParameter>>) -> Self {
        self.pages = pages;
        self
    }

    /// Report these names as invalid on every delete
    pub fn with_invalid(mut self, invalid: Vec<String>) -> Self {
        self.invalid = invalid;
        self
    }

    /// Fail puts for this full name
    pub fn failing_put(mut self, name: &str) -> Self {
        self.fail_put = Some(name.to_string());
        self
    }

    pub fn raw(name: &str, value: &str, secure: bool) -> RawParameter {
        RawParameter {
            name: name.to_string(),
            value: value.to_string(),
            secure,
        }
    }
}

impl SsmApi for MockSsmApi {
    async fn get_parameters_by_path(
        &self,
        path: &str,
        recursive: bool,
        next_token: Option<String>,
    ) -> Result<ParameterPage> {
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), recursive, next_token.clone()));

        let index = match next_token {
            Some(token) => token.parse::<usize>()?,
            None => 0,
        };
        let next_token = (index + 1 < self.pages.len()).then(|| (index + 1).to_string());

        Ok(ParameterPage {
            parameters: self.pages.get(index).cloned().unwrap_or_default(),
            next_token,
        })
    }

    async fn put_parameter(&self, name: &str, value: &str, secure: bool) -> Result<()> {
        if self.fail_put.as_deref() == Some(name) {
            anyhow::bail!("ParameterLimitExceeded");
        }
        self.puts
            .lock()
            .unwrap()
            .push((name.to_string(), value.to_string(), secure));
        Ok(())
    }

    async fn delete_parameters(&self, names: &[String]) -> Result<DeleteOutcome> {
        self.deletes.lock().unwrap().push(names.to_vec());
        let deleted = names
            .iter()
            .filter(|n| !self.invalid.contains(n))
            .cloned()
            .collect();
        Ok(DeleteOutcome {
            deleted,
            invalid: self.invalid.clone(),
        })
    }
}
