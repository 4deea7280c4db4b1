//! SSM Parameter Store
//!
//! Read, bulk-load, delete, and exec with parameters under a path prefix.

mod cli;
mod client;
mod display;
mod params;
mod types;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

pub use cli::SsmCommand;
use client::{SsmApi, SsmClient};
use types::{OutputFormat, Param};

use crate::util::{load_sdk_config, output, AwsOptions};

/// Run an SSM command
pub async fn run(cmd: SsmCommand, aws: &AwsOptions) -> Result<()> {
    match cmd {
        SsmCommand::Read {
            path,
            out,
            json,
            recursive,
        } => {
            params::validate_path(&path)?;
            let client = connect(aws).await;
            cmd_read(&client, &path, out, json, recursive).await
        }
        SsmCommand::Load {
            path,
            env_file,
            dry_run,
            plain,
        } => {
            params::validate_path(&path)?;
            let params = params::read_env_file(&env_file, !plain)?;
            if dry_run {
                display::output_load_plan(&path, &params);
                return Ok(());
            }
            let client = connect(aws).await;
            cmd_load(&client, &path, &params).await
        }
        SsmCommand::Delete {
            path,
            dry_run,
            recursive,
        } => {
            params::validate_path(&path)?;
            let client = connect(aws).await;
            cmd_delete(&client, &path, dry_run, recursive).await
        }
        SsmCommand::Exec {
            path,
            recursive,
            command,
        } => {
            params::validate_path(&path)?;
            let client = connect(aws).await;
            cmd_exec(&client, &path, recursive, &command).await
        }
    }
}

#[cfg(not(tarpaulin_include))]
async fn connect(aws: &AwsOptions) -> SsmClient {
    let config = load_sdk_config(aws).await;
    SsmClient::new(&config)
}

/// Print parameters under a path
async fn cmd_read(
    api: &impl SsmApi,
    path: &str,
    out: Option<PathBuf>,
    json: bool,
    recursive: bool,
) -> Result<()> {
    let params = params::get_parameters_from_path(api, path, recursive)
        .await
        .context("ssm: get parameters from path")?;

    tracing::info!("{} parameters loaded", params.len());

    let rendered = display::render_params(&params, OutputFormat::from_json_flag(json))?;
    output::write_output(out.as_deref(), rendered.as_bytes())
}

/// Write parameters from a .env file
async fn cmd_load(api: &impl SsmApi, path: &str, params: &[Param]) -> Result<()> {
    let written = params::load_parameters_into_path(api, path, params)
        .await
        .context("ssm: load parameters into path")?;

    tracing::info!("{} parameters written under {}", written, path);
    Ok(())
}

/// List, then delete parameters under a path
async fn cmd_delete(api: &impl SsmApi, path: &str, dry_run: bool, recursive: bool) -> Result<()> {
    let params = params::get_parameters_from_path(api, path, recursive)
        .await
        .context("ssm: get parameters from path")?;

    tracing::info!("{} parameters found", params.len());
    display::output_found(&params);

    if dry_run {
        tracing::info!("dry run, nothing deleted (pass --dry-run=false to delete)");
        return Ok(());
    }

    let deleted = params::delete_parameters_in_path(api, path, &params).await?;
    tracing::info!("{} parameters deleted", deleted);
    Ok(())
}

/// Run a command with parameters in its environment
#[cfg(not(tarpaulin_include))]
async fn cmd_exec(
    api: &impl SsmApi,
    path: &str,
    recursive: bool,
    command: &[String],
) -> Result<()> {
    let params = params::get_parameters_from_path(api, path, recursive)
        .await
        .context("ssm: get parameters from path")?;

    tracing::debug!("{} parameters loaded into environment", params.len());

    let status = build_exec_command(command, &params)?
        .status()
        .with_context(|| format!("Failed to run {}", command[0]))?;

    std::process::exit(status.code().unwrap_or(1));
}

/// Build the child process: inherited environment plus parameters
fn build_exec_command(command: &[String], params: &[Param]) -> Result<Command> {
    let (program, args) = command
        .split_first()
        .context("No command given to exec")?;

    let mut cmd = Command::new(Path::new(program));
    cmd.args(args);
    cmd.envs(params.iter().map(|p| (env_key(&p.name), p.value.as_str())));
    Ok(cmd)
}

/// Environment variable name for a parameter; nested segments join with `_`
fn env_key(name: &str) -> String {
    name.replace('/', "_")
}
