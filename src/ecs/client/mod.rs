//! ECS client

use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_ecs::types::{
    ContainerDefinition, Service, SortOrder, TaskDefinition, TaskDefinitionField,
    TaskDefinitionStatus,
};
use aws_sdk_ecs::Client;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;

use super::types::{
    ContainerTemplate, DeleteFailure, DescribedTaskDefinition, EnvironmentVariable,
    FirelensConfigurationTemplate, LogConfigurationTemplate, PortMappingTemplate, ServiceInfo,
    StrategyItem, Tag, TaskDefinitionPage, TaskDefinitionTemplate,
};

#[cfg(test)]
pub mod mock;
#[cfg(test)]
mod tests;

/// ECS API trait for testability
pub trait EcsApi: Send + Sync {
    /// Describe one service in a cluster
    fn describe_services(
        &self,
        cluster: &str,
        service: &str,
    ) -> impl Future<Output = Result<Vec<ServiceInfo>>> + Send;

    /// One page of ACTIVE task definitions for a family prefix, newest first
    fn list_task_definitions(
        &self,
        family_prefix: &str,
        next_token: Option<String>,
    ) -> impl Future<Output = Result<TaskDefinitionPage>> + Send;

    /// Describe a task definition including its tags
    fn describe_task_definition(
        &self,
        arn: &str,
    ) -> impl Future<Output = Result<DescribedTaskDefinition>> + Send;

    /// Mark a task definition INACTIVE
    fn deregister_task_definition(&self, arn: &str) -> impl Future<Output = Result<()>> + Send;

    /// Delete up to 10 INACTIVE task definitions
    fn delete_task_definitions(
        &self,
        arns: &[String],
    ) -> impl Future<Output = Result<Vec<DeleteFailure>>> + Send;
}

/// ECS client backed by the AWS SDK
pub struct EcsClient {
    client: Client,
}

impl EcsClient {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

impl EcsApi for EcsClient {
    async fn describe_services(&self, cluster: &str, service: &str) -> Result<Vec<ServiceInfo>> {
        let resp = self
            .client
            .describe_services()
            .cluster(cluster)
            .services(service)
            .send()
            .await
            .with_context(|| {
                format!("ecs: describe services (cluster: {cluster}, service: {service})")
            })?;

        for failure in resp.failures() {
            tracing::debug!(
                arn = failure.arn().unwrap_or_default(),
                reason = failure.reason().unwrap_or_default(),
                "describe services failure"
            );
        }

        Ok(resp.services().iter().map(service_info).collect())
    }

    async fn list_task_definitions(
        &self,
        family_prefix: &str,
        next_token: Option<String>,
    ) -> Result<TaskDefinitionPage> {
        let resp = self
            .client
            .list_task_definitions()
            .family_prefix(family_prefix)
            .status(TaskDefinitionStatus::Active)
            .sort(SortOrder::Desc)
            .set_next_token(next_token)
            .send()
            .await
            .context("ecs: list task definitions")?;

        Ok(TaskDefinitionPage {
            arns: resp.task_definition_arns().to_vec(),
            next_token: resp.next_token().map(str::to_string),
        })
    }

    async fn describe_task_definition(&self, arn: &str) -> Result<DescribedTaskDefinition> {
        let resp = self
            .client
            .describe_task_definition()
            .task_definition(arn)
            .include(TaskDefinitionField::Tags)
            .send()
            .await
            .with_context(|| format!("ecs: describe task definition ({arn})"))?;

        let definition = resp
            .task_definition()
            .map(template_from_sdk)
            .with_context(|| format!("ecs: describe task definition ({arn}): empty response"))?;

        let tags = resp
            .tags()
            .iter()
            .map(|t| Tag::new(t.key().unwrap_or_default(), t.value().unwrap_or_default()))
            .collect();

        Ok(DescribedTaskDefinition { definition, tags })
    }

    async fn deregister_task_definition(&self, arn: &str) -> Result<()> {
        self.client
            .deregister_task_definition()
            .task_definition(arn)
            .send()
            .await
            .with_context(|| format!("ecs: deregister task definition ({arn})"))?;
        Ok(())
    }

    async fn delete_task_definitions(&self, arns: &[String]) -> Result<Vec<DeleteFailure>> {
        let resp = self
            .client
            .delete_task_definitions()
            .set_task_definitions(Some(arns.to_vec()))
            .send()
            .await
            .with_context(|| format!("ecs: delete task definitions ({arns:?})"))?;

        Ok(resp
            .failures()
            .iter()
            .map(|f| DeleteFailure {
                arn: f.arn().unwrap_or_default().to_string(),
                reason: f.reason().unwrap_or_default().to_string(),
            })
            .collect())
    }
}

fn service_info(service: &Service) -> ServiceInfo {
    ServiceInfo {
        name: service.service_name().unwrap_or_default().to_string(),
        capacity_provider_strategy: service
            .capacity_provider_strategy()
            .iter()
            .map(|s| StrategyItem {
                capacity_provider: s.capacity_provider().to_string(),
                base: s.base(),
                weight: s.weight(),
            })
            .collect(),
    }
}

/// Negative counts from the API clamp to zero
fn non_negative(n: i32) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

fn sorted(options: Option<&HashMap<String, String>>) -> BTreeMap<String, String> {
    options
        .map(|o| o.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default()
}

/// Reshape an SDK task definition into the template output shape
pub fn template_from_sdk(def: &TaskDefinition) -> TaskDefinitionTemplate {
    TaskDefinitionTemplate {
        task_definition_arn: def.task_definition_arn().unwrap_or_default().to_string(),
        execution_role_arn: def.execution_role_arn().unwrap_or_default().to_string(),
        task_role_arn: def.task_role_arn().unwrap_or_default().to_string(),
        container_definitions: def
            .container_definitions()
            .iter()
            .map(container_from_sdk)
            .collect(),
        compatibilities: def
            .compatibilities()
            .iter()
            .map(|c| c.as_str().to_string())
            .collect(),
        network_mode: def
            .network_mode()
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        cpu: def.cpu().unwrap_or_default().to_string(),
        memory: def.memory().unwrap_or_default().to_string(),
        family: def.family().unwrap_or_default().to_string(),
        pid_mode: def
            .pid_mode()
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
    }
}

fn container_from_sdk(c: &ContainerDefinition) -> ContainerTemplate {
    ContainerTemplate {
        name: c.name().unwrap_or_default().to_string(),
        image: c.image().unwrap_or_default().to_string(),
        essential: c.essential().unwrap_or(false),
        cpu: non_negative(c.cpu()),
        memory: c.memory().map(non_negative).unwrap_or(0),
        memory_reservation: c.memory_reservation().map(non_negative).unwrap_or(0),
        port_mappings: c
            .port_mappings()
            .iter()
            .map(|p| PortMappingTemplate {
                host_port: p.host_port().map(non_negative).unwrap_or(0),
                protocol: p
                    .protocol()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default(),
                container_port: p.container_port().map(non_negative).unwrap_or(0),
            })
            .collect(),
        environment: c
            .environment()
            .iter()
            .map(|e| EnvironmentVariable {
                name: e.name().unwrap_or_default().to_string(),
                value: e.value().unwrap_or_default().to_string(),
            })
            .collect(),
        log_configuration: c.log_configuration().map(|l| LogConfigurationTemplate {
            log_driver: l.log_driver().as_str().to_string(),
            options: sorted(l.options()),
        }),
        firelens_configuration: c
            .firelens_configuration()
            .map(|f| FirelensConfigurationTemplate {
                kind: f.r#type().as_str().to_string(),
                options: sorted(f.options()),
            }),
    }
}
