//! In-memory ECS for tests

use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::Mutex;

use super::EcsApi;
use crate::ecs::types::{
    DeleteFailure, DescribedTaskDefinition, ServiceInfo, Tag, TaskDefinitionPage,
    TaskDefinitionTemplate,
};

#[derive(Default)]
pub struct MockEcsApi {
    services: Vec<ServiceInfo>,
    pages: Vec<Vec<String>>,
    definitions: HashMap<String, DescribedTaskDefinition>,
    delete_failures: Vec<DeleteFailure>,
    fail_deregister: Option<String>,
    pub list_requests: Mutex<Vec<(String, Option<String>)>>,
    pub described: Mutex<Vec<String>>,
    pub deregistered: Mutex<Vec<String>>,
    pub deleted: Mutex<Vec<Vec<String>>>,
}

impl MockEcsApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_services(mut self, services: Vec<ServiceInfo>) -> Self {
        self.services = services;
        self
    }

    /// Serve these ARN pages in order, chained by `NextToken`
    pub fn with_pages(mut self, pages: Vec<Vec<&str>>) -> Self {
        self.pages = pages
            .into_iter()
            .map(|p| p.into_iter().map(str::to_string).collect())
            .collect();
        self
    }

    /// Register a describable task definition with the given tags
    pub fn with_definition(mut self, arn: &str, tags: Vec<Tag>) -> Self {
        let definition = TaskDefinitionTemplate {
            task_definition_arn: arn.to_string(),
            ..Default::default()
        };
        self.definitions.insert(
            arn.to_string(),
            DescribedTaskDefinition { definition, tags },
        );
        self
    }

    pub fn with_described(mut self, described: DescribedTaskDefinition) -> Self {
        self.definitions.insert(
            described.definition.task_definition_arn.clone(),
            described,
        );
        self
    }

    /// Fail deregistration of this ARN
    pub fn failing_deregister(mut self, arn: &str) -> Self {
        self.fail_deregister = Some(arn.to_string());
        self
    }

    pub fn with_delete_failures(mut self, failures: Vec<DeleteFailure>) -> Self {
        self.delete_failures = failures;
        self
    }
}

impl EcsApi for MockEcsApi {
    async fn describe_services(&self, _cluster: &str, _service: &str) -> Result<Vec<ServiceInfo>> {
        Ok(self.services.clone())
    }

    async fn list_task_definitions(
        &self,
        family_prefix: &str,
        next_token: Option<String>,
    ) -> Result<TaskDefinitionPage> {
        self.list_requests
            .lock()
            .unwrap()
            .push((family_prefix.to_string(), next_token.clone()));

        let index = match next_token {
            Some(token) => token.parse::<usize>()?,
            None => 0,
        };
        let next_token = (index + 1 < self.pages.len()).then(|| (index + 1).to_string());

        Ok(TaskDefinitionPage {
            arns: self.pages.get(index).cloned().unwrap_or_default(),
            next_token,
        })
    }

    async fn describe_task_definition(&self, arn: &str) -> Result<DescribedTaskDefinition> {
        self.described.lock().unwrap().push(arn.to_string());
        Ok(self.definitions.get(arn).cloned().unwrap_or_else(|| {
            DescribedTaskDefinition {
                definition: TaskDefinitionTemplate {
                    task_definition_arn: arn.to_string(),
                    ..Default::default()
                },
                tags: vec![],
            }
        }))
    }

    async fn deregister_task_definition(&self, arn: &str) -> Result<()> {
        if self.fail_deregister.as_deref() == Some(arn) {
            return Err(anyhow!("ClientException: revision in use"));
        }
        self.deregistered.lock().unwrap().push(arn.to_string());
        Ok(())
    }

    async fn delete_task_definitions(&self, arns: &[String]) -> Result<Vec<DeleteFailure>> {
        self.deleted.lock().unwrap().push(arns.to_vec());
        Ok(self
            .delete_failures
            .iter()
            .filter(|f| arns.contains(&f.arn))
            .cloned()
            .collect())
    }
}
