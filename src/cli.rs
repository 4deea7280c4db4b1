use clap::{ArgAction, Parser, Subcommand};

use crate::cloudfront::CloudFrontCommand;
use crate::ecs::EcsCommand;
use crate::secret::SecretCommand;
use crate::ssm::SsmCommand;

#[derive(Parser)]
#[command(name = "aws-tools")]
#[command(about = "Operational helpers for CloudFront, ECS, Secrets Manager and SSM", long_about = None)]
#[command(version)]
pub struct Cli {
    /// AWS profile to use
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// AWS region to use
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// CloudFront (invalidate)
    #[command(name = "cloudfront", alias = "cf")]
    CloudFront {
        #[command(subcommand)]
        cmd: Option<CloudFrontCommand>,
    },

    /// ECS deployments (appspec, template, prune)
    Ecs {
        #[command(subcommand)]
        cmd: Option<EcsCommand>,
    },

    /// Secrets Manager (get)
    Secret {
        #[command(subcommand)]
        cmd: Option<SecretCommand>,
    },

    /// SSM Parameter Store (read, load, delete, exec)
    Ssm {
        #[command(subcommand)]
        cmd: Option<SsmCommand>,
    },

    /// Show settings, or create the settings file
    Config {
        /// Write a commented settings template if none exists
        #[arg(long)]
        init: bool,
    },
}

impl Command {
    /// Subcommand name, for printing group help
    pub fn name(&self) -> &'static str {
        match self {
            Command::CloudFront { .. } => "cloudfront",
            Command::Ecs { .. } => "ecs",
            Command::Secret { .. } => "secret",
            Command::Ssm { .. } => "ssm",
            Command::Config { .. } => "config",
        }
    }
}
