//! ECS data types

use anyhow::bail;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;


/// Placeholder CodeDeploy substitutes with the first container's image
pub const DEFAULT_IMAGE_PLACEHOLDER: &str = "<IMAGE1_NAME>";

/// A `Key=Value` resource tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl FromStr for Tag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((key, value)) => Ok(Tag::new(key, value)),
            None => bail!("expected tag should be of format tag=value"),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Capacity provider strategy item of a running service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyItem {
    pub capacity_provider: String,
    pub base: i32,
    pub weight: i32,
}

/// The parts of a described ECS service we use
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceInfo {
    pub name: String,
    pub capacity_provider_strategy: Vec<StrategyItem>,
}

/// One page of `ListTaskDefinitions`
#[derive(Debug, Clone, Default)]
pub struct TaskDefinitionPage {
    pub arns: Vec<String>,
    pub next_token: Option<String>,
}

/// A described task definition with its tags
#[derive(Debug, Clone)]
pub struct DescribedTaskDefinition {
    pub definition: TaskDefinitionTemplate,
    pub tags: Vec<Tag>,
}

impl DescribedTaskDefinition {
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A task definition ARN the API refused to delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFailure {
    pub arn: String,
    pub reason: String,
}

/// Family name from a task definition ARN (`.../task-definition/<family>:<revision>`)
pub fn family_of(arn: &str) -> &str {
    let tail = arn.rsplit_once('/').map_or(arn, |(_, tail)| tail);
    tail.rsplit_once(':').map_or(tail, |(family, _)| family)
}

fn is_zero(n: &u64) -> bool {
    *n == 0
}

/// Task definition as emitted by `ecs template`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinitionTemplate {
    pub task_definition_arn: String,
    pub execution_role_arn: String,
    pub task_role_arn: String,
    pub container_definitions: Vec<ContainerTemplate>,
    pub compatibilities: Vec<String>,
    pub network_mode: String,
    pub cpu: String,
    pub memory: String,
    pub family: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pid_mode: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerTemplate {
    pub name: String,
    pub image: String,
    pub essential: bool,
    #[serde(skip_serializing_if = "is_zero")]
    pub cpu: u64,
    #[serde(skip_serializing_if = "is_zero")]
    pub memory: u64,
    #[serde(skip_serializing_if = "is_zero")]
    pub memory_reservation: u64,
    pub port_mappings: Vec<PortMappingTemplate>,
    pub environment: Vec<EnvironmentVariable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_configuration: Option<LogConfigurationTemplate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firelens_configuration: Option<FirelensConfigurationTemplate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMappingTemplate {
    pub host_port: u64,
    pub protocol: String,
    pub container_port: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfigurationTemplate {
    pub log_driver: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FirelensConfigurationTemplate {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}
