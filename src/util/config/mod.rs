//! Settings for aws-tools
//!
//! Loads configuration from `~/.config/aws-tools/settings.toml`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;


/// Commented-out template for a new settings file
pub const DEFAULT_SETTINGS: &str = r#"# aws-tools settings
# Location: ~/.config/aws-tools/settings.toml

[aws]
# AWS profile to use (overridden by --profile)
# profile = "default"

# AWS region (overridden by --region)
# region = "us-east-1"

[cloudfront]
# Seconds between invalidation status checks
# poll_interval_secs = 5

[ecs]
# Tag marking template task definitions
# template_tag = "CreatedBy=Terraform"

# Milliseconds to sleep between deregister/delete calls
# pace_ms = 500
"#;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub aws: AwsSettings,
    #[serde(default)]
    pub cloudfront: CloudFrontSettings,
    #[serde(default)]
    pub ecs: EcsSettings,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsSettings {
    pub profile: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudFrontSettings {
    pub poll_interval_secs: u64,
}

impl Default for CloudFrontSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5,
        }
    }
}

impl CloudFrontSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EcsSettings {
    pub template_tag: String,
    pub pace_ms: u64,
}

impl Default for EcsSettings {
    fn default() -> Self {
        Self {
            template_tag: "CreatedBy=Terraform".to_string(),
            pace_ms: 500,
        }
    }
}

impl EcsSettings {
    pub fn pace(&self) -> Duration {
        Duration::from_millis(self.pace_ms)
    }
}

/// Get the path to the settings file
pub fn settings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join("aws-tools").join("settings.toml"))
}

/// Write the commented-out template unless a settings file already exists
pub fn init_settings_file(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_SETTINGS)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(true)
}

/// Load settings from the settings file and environment
pub fn load_settings() -> Result<Settings> {
    let mut settings = match settings_path() {
        Some(path) => load_settings_from(&path)?,
        None => Settings::default(),
    };

    apply_env_overrides(
        &mut settings,
        std::env::var("AWS_TOOLS_PROFILE").ok(),
        std::env::var("AWS_TOOLS_REGION").ok(),
    );

    Ok(settings)
}

/// Load settings from a specific path (testable)
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    parse_settings(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Parse settings from TOML string
pub fn parse_settings(contents: &str) -> Result<Settings> {
    Ok(toml::from_str(contents)?)
}

fn apply_env_overrides(settings: &mut Settings, profile: Option<String>, region: Option<String>) {
    if let Some(profile) = profile.filter(|p| !p.is_empty()) {
        settings.aws.profile = Some(profile);
    }
    if let Some(region) = region.filter(|r| !r.is_empty()) {
        settings.aws.region = Some(region);
    }
}
