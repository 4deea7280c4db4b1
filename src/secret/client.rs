//! Secrets Manager client

use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueOutput;
use aws_sdk_secretsmanager::Client;
use std::future::Future;

/// Payload of a secret version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretValue {
    Text(String),
    Binary(Vec<u8>),
    Empty,
}

impl SecretValue {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            SecretValue::Text(text) => text.as_bytes(),
            SecretValue::Binary(bytes) => bytes,
            SecretValue::Empty => &[],
        }
    }
}

/// Secrets Manager API trait for testability
pub trait SecretsApi: Send + Sync {
    /// Current value of a secret by name or ARN
    fn get_secret_value(&self, secret_id: &str)
        -> impl Future<Output = Result<SecretValue>> + Send;
}

/// Secrets Manager client backed by the AWS SDK
pub struct SecretsClient {
    client: Client,
}

impl SecretsClient {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

impl SecretsApi for SecretsClient {
    async fn get_secret_value(&self, secret_id: &str) -> Result<SecretValue> {
        let resp = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .context("secrets manager")?;

        Ok(secret_value(&resp))
    }
}

/// String payload wins over binary
fn secret_value(resp: &GetSecretValueOutput) -> SecretValue {
    if let Some(text) = resp.secret_string() {
        return SecretValue::Text(text.to_string());
    }
    match resp.secret_binary() {
        Some(blob) => SecretValue::Binary(blob.as_ref().to_vec()),
        None => SecretValue::Empty,
    }
}
