//! AWS session setup shared by every command

use aws_config::{BehaviorVersion, Region, SdkConfig};

use super::config::AwsSettings;

/// Profile and region to load the SDK config with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AwsOptions {
    pub profile: Option<String>,
    pub region: Option<String>,
}

impl AwsOptions {
    /// Resolve the effective options: CLI flag > settings (file or env) > SDK default chain
    pub fn resolve(
        cli_profile: Option<String>,
        cli_region: Option<String>,
        settings: &AwsSettings,
    ) -> Self {
        Self {
            profile: cli_profile.or_else(|| settings.profile.clone()),
            region: cli_region.or_else(|| settings.region.clone()),
        }
    }
}

/// Get AWS SDK configuration with optional profile and region
#[cfg(not(tarpaulin_include))]
pub async fn load_sdk_config(options: &AwsOptions) -> SdkConfig {
    let mut builder = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &options.region {
        builder = builder.region(Region::new(region.clone()));
    }

    if let Some(profile_name) = &options.profile {
        builder = builder.profile_name(profile_name);
    }

    tracing::debug!(
        profile = options.profile.as_deref().unwrap_or("<default>"),
        region = options.region.as_deref().unwrap_or("<default>"),
        "loading AWS config"
    );

    builder.load().await
}
