//! CodeDeploy AppSpec generation from a running service

use anyhow::{bail, Result};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use super::client::EcsApi;
use super::types::ServiceInfo;

/// Placeholder CodeDeploy replaces with the new task definition ARN
pub const TASK_DEFINITION_PLACEHOLDER: &str = "<TASK_DEFINITION>";

/// AppSpec `version`, always the number `0.0`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AppSpecVersion;

impl Serialize for AppSpecVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppSpec {
    pub version: AppSpecVersion,
    #[serde(rename = "Resources")]
    pub resources: Vec<BTreeMap<String, ResourceDef>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceDef {
    #[serde(rename = "Type")]
    pub resource_type: String,
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Properties {
    pub task_definition: String,
    pub load_balancer_info: LoadBalancerInfo,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub capacity_provider_strategy: Vec<CapacityProviderStrategy>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoadBalancerInfo {
    pub container_name: String,
    pub container_port: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CapacityProviderStrategy {
    pub base: u32,
    pub capacity_provider: String,
    pub weight: u32,
}

/// Container receiving load balancer traffic
#[derive(Debug, Clone)]
pub struct TargetContainer {
    pub name: String,
    pub port: u32,
}

/// Build the AppSpec for a service from its description
pub fn appspec_for_service(service: &ServiceInfo, container: &TargetContainer) -> AppSpec {
    let resource = ResourceDef {
        resource_type: "AWS::ECS::Service".to_string(),
        properties: Properties {
            task_definition: TASK_DEFINITION_PLACEHOLDER.to_string(),
            load_balancer_info: LoadBalancerInfo {
                container_name: container.name.clone(),
                container_port: container.port,
            },
            capacity_provider_strategy: service
                .capacity_provider_strategy
                .iter()
                .map(|s| CapacityProviderStrategy {
                    base: u32::try_from(s.base).unwrap_or(0),
                    capacity_provider: s.capacity_provider.clone(),
                    weight: u32::try_from(s.weight).unwrap_or(0),
                })
                .collect(),
        },
    };

    AppSpec {
        version: AppSpecVersion,
        resources: vec![BTreeMap::from([("TargetService".to_string(), resource)])],
    }
}

/// Describe the service and build its AppSpec
pub async fn build_appspec(
    api: &impl EcsApi,
    cluster: &str,
    service: &str,
    container: &TargetContainer,
) -> Result<AppSpec> {
    let services = api.describe_services(cluster, service).await?;

    if services.len() != 1 {
        bail!(
            "unexpected service count: {} (cluster: {}, service: {})",
            services.len(),
            cluster,
            service
        );
    }

    let service = &services[0];
    tracing::debug!(
        service = %service.name,
        strategies = service.capacity_provider_strategy.len(),
        "building appspec"
    );
    Ok(appspec_for_service(service, container))
}
