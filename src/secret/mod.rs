//! Secrets Manager retrieval

mod cli;
mod client;

use anyhow::{Context, Result};
use std::path::Path;

pub use cli::SecretCommand;
use client::{SecretsApi, SecretsClient};

use crate::util::{load_sdk_config, output, AwsOptions};

/// Run a secret command
pub async fn run(cmd: SecretCommand, aws: &AwsOptions) -> Result<()> {
    match cmd {
        SecretCommand::Get { secret_id, out } => {
            let client = connect(aws).await;
            cmd_get(&client, &secret_id, out.as_deref()).await
        }
    }
}

#[cfg(not(tarpaulin_include))]
async fn connect(aws: &AwsOptions) -> SecretsClient {
    let config = load_sdk_config(aws).await;
    SecretsClient::new(&config)
}

/// Write the secret verbatim
async fn cmd_get(api: &impl SecretsApi, secret_id: &str, out: Option<&Path>) -> Result<()> {
    let value = api
        .get_secret_value(secret_id)
        .await
        .context("couldn't get secret")?;

    output::write_output(out, value.as_bytes())
}
