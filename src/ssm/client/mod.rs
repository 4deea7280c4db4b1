//! SSM Parameter Store client

use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_ssm::types::{Parameter, ParameterType};
use aws_sdk_ssm::Client;
use std::future::Future;

use super::types::{DeleteOutcome, ParameterPage, RawParameter};

#[cfg(test)]
pub mod mock;

/// Parameter Store API trait for testability
pub trait SsmApi: Send + Sync {
    /// Fetch one page of parameters under a path, decrypted
    fn get_parameters_by_path(
        &self,
        path: &str,
        recursive: bool,
        next_token: Option<String>,
    ) -> impl Future<Output = Result<ParameterPage>> + Send;

    /// Create or overwrite a parameter
    fn put_parameter(
        &self,
        name: &str,
        value: &str,
        secure: bool,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Delete up to 10 parameters by full name
    fn delete_parameters(&self, names: &[String])
        -> impl Future<Output = Result<DeleteOutcome>> + Send;
}

/// Parameter Store client backed by the AWS SDK
pub struct SsmClient {
    client: Client,
}

impl SsmClient {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

impl SsmApi for SsmClient {
    async fn get_parameters_by_path(
        &self,
        path: &str,
        recursive: bool,
        next_token: Option<String>,
    ) -> Result<ParameterPage> {
        let resp = self
            .client
            .get_parameters_by_path()
            .path(path)
            .with_decryption(true)
            .recursive(recursive)
            .set_next_token(next_token)
            .send()
            .await
            .context("ssm: get parameters by path")?;

        Ok(ParameterPage {
            parameters: resp.parameters().iter().map(raw_parameter).collect(),
            next_token: resp.next_token().map(str::to_string),
        })
    }

    async fn put_parameter(&self, name: &str, value: &str, secure: bool) -> Result<()> {
        self.client
            .put_parameter()
            .name(name)
            .value(value)
            .r#type(parameter_type(secure))
            .overwrite(true)
            .send()
            .await
            .context("ssm: put parameter")?;
        Ok(())
    }

    async fn delete_parameters(&self, names: &[String]) -> Result<DeleteOutcome> {
        let resp = self
            .client
            .delete_parameters()
            .set_names(Some(names.to_vec()))
            .send()
            .await
            .context("ssm: delete parameters")?;

        Ok(DeleteOutcome {
            deleted: resp.deleted_parameters().to_vec(),
            invalid: resp.invalid_parameters().to_vec(),
        })
    }
}

/// Convert an SDK parameter into our representation
fn raw_parameter(param: &Parameter) -> RawParameter {
    RawParameter {
        name: param.name().unwrap_or_default().to_string(),
        value: param.value().unwrap_or_default().to_string(),
        secure: matches!(param.r#type(), Some(ParameterType::SecureString)),
    }
}

fn parameter_type(secure: bool) -> ParameterType {
    if secure {
        ParameterType::SecureString
    } else {
        ParameterType::String
    }
}
