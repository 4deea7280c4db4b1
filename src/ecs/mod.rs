//! ECS deployment helpers
//!
//! CodeDeploy AppSpec generation, template task definition lookup, and
//! pruning of obsolete task definition revisions.

mod appspec;
mod cli;
mod client;
mod prune;
mod template;
mod types;

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

pub use cli::EcsCommand;
use client::{EcsApi, EcsClient};
use types::Tag;

use crate::util::config::EcsSettings;
use crate::util::{load_sdk_config, output, AwsOptions};

/// Run an ECS command
pub async fn run(cmd: EcsCommand, aws: &AwsOptions, settings: &EcsSettings) -> Result<()> {
    match cmd {
        EcsCommand::Appspec {
            cluster,
            service,
            container_name,
            container_port,
            out,
        } => {
            let container = appspec::TargetContainer {
                name: container_name,
                port: container_port,
            };
            let client = connect(aws).await;
            cmd_appspec(&client, &cluster, &service, &container, out).await
        }
        EcsCommand::Template {
            family,
            tag,
            image,
            out,
        } => {
            let tag = resolve_tag(tag.as_deref(), settings)?;
            let client = connect(aws).await;
            cmd_template(&client, &family, &tag, &image, out).await
        }
        EcsCommand::Prune {
            cluster,
            services,
            tag,
            dry_run,
        } => {
            let tag = resolve_tag(tag.as_deref(), settings)?;
            let client = connect(aws).await;
            cmd_prune(&client, &cluster, &services, &tag, settings.pace(), dry_run).await
        }
    }
}

#[cfg(not(tarpaulin_include))]
async fn connect(aws: &AwsOptions) -> EcsClient {
    let config = load_sdk_config(aws).await;
    EcsClient::new(&config)
}

/// Tag from the command line, else from settings
fn resolve_tag(cli: Option<&str>, settings: &EcsSettings) -> Result<Tag> {
    match cli {
        Some(tag) => tag.parse(),
        None => settings
            .template_tag
            .parse()
            .context("Invalid ecs.template_tag in settings"),
    }
}

async fn cmd_appspec(
    api: &impl EcsApi,
    cluster: &str,
    service: &str,
    container: &appspec::TargetContainer,
    out: Option<PathBuf>,
) -> Result<()> {
    let spec = appspec::build_appspec(api, cluster, service, container)
        .await
        .context("couldn't build appspec")?;

    let json = output::to_json_document(&spec)?;
    output::write_output(out.as_deref(), json.as_bytes())
}

async fn cmd_template(
    api: &impl EcsApi,
    family: &str,
    tag: &Tag,
    image: &str,
    out: Option<PathBuf>,
) -> Result<()> {
    let found = template::find_task_definition(api, family, tag)
        .await
        .with_context(|| format!("couldn't find template task definition ({family}, {tag})"))?;

    tracing::info!("using {}", found.definition.task_definition_arn);

    let template = template::build_template(found.definition, image);
    let json = output::to_json_document(&template)?;
    output::write_output(out.as_deref(), json.as_bytes())
}

async fn cmd_prune(
    api: &impl EcsApi,
    cluster: &str,
    services: &[String],
    tag: &Tag,
    pace: Duration,
    dry_run: bool,
) -> Result<()> {
    tracing::debug!(%cluster, "pruning task definitions");

    for service in services {
        let obsolete = prune::find_obsolete_task_definitions(api, service, tag)
            .await
            .context("couldn't find obsolete taskdefs")?;

        tracing::info!("{}: {} obsolete task definitions", service, obsolete.len());

        if dry_run {
            for arn in &obsolete {
                println!("{arn}");
            }
            continue;
        }

        let deleted = prune::prune_task_definitions(api, &obsolete, pace).await?;
        tracing::info!("{}: {} task definitions deleted", service, deleted);
    }

    Ok(())
}
