//! Template task definition lookup
//!
//! A template is the newest ACTIVE revision of a family carrying a marker tag
//! (by default `CreatedBy=Terraform`). Its first container's image is swapped
//! for a placeholder so CodeDeploy can fill in the new image.

use anyhow::{bail, Result};

use super::client::EcsApi;
use super::types::{family_of, DescribedTaskDefinition, Tag, TaskDefinitionTemplate};

/// Every ACTIVE task definition ARN of `family`, newest first
pub async fn list_family_arns(api: &impl EcsApi, family: &str) -> Result<Vec<String>> {
    let mut arns = Vec::new();
    let mut next_token = None;

    loop {
        let page = api.list_task_definitions(family, next_token).await?;
        arns.extend(page.arns.into_iter().filter(|arn| family_of(arn) == family));

        match page.next_token {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    Ok(arns)
}

/// Find the newest task definition of `family` tagged with `tag`
pub async fn find_task_definition(
    api: &impl EcsApi,
    family: &str,
    tag: &Tag,
) -> Result<DescribedTaskDefinition> {
    let mut next_token = None;

    loop {
        let page = api.list_task_definitions(family, next_token).await?;

        for arn in page.arns.iter().filter(|arn| family_of(arn) == family) {
            let described = api.describe_task_definition(arn).await?;
            if described.has_tag(tag) {
                tracing::debug!(%arn, %tag, "found template task definition");
                return Ok(described);
            }
        }

        match page.next_token {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    bail!("not found")
}

/// Replace the first container's image with the placeholder
pub fn build_template(mut def: TaskDefinitionTemplate, placeholder: &str) -> TaskDefinitionTemplate {
    if let Some(first) = def.container_definitions.first_mut() {
        first.image = placeholder.to_string();
    }
    def
}
