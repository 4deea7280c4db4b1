mod cli;
mod cloudfront;
mod ecs;
mod secret;
mod ssm;
mod util;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use cli::{Cli, Command};
use util::config::{self, Settings};
use util::AwsOptions;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    util::init_logging(cli.verbose);

    let settings = util::load_settings().context("Failed to load settings")?;
    let aws = AwsOptions::resolve(cli.profile, cli.region, &settings.aws);

    match cli.command {
        None => print_help(None),
        Some(command) => run_command(command, &aws, &settings).await,
    }
}

async fn run_command(command: Command, aws: &AwsOptions, settings: &Settings) -> Result<()> {
    let name = command.name();
    match command {
        Command::CloudFront { cmd: Some(cmd) } => {
            cloudfront::run(cmd, aws, &settings.cloudfront).await
        }
        Command::Ecs { cmd: Some(cmd) } => ecs::run(cmd, aws, &settings.ecs).await,
        Command::Secret { cmd: Some(cmd) } => secret::run(cmd, aws).await,
        Command::Ssm { cmd: Some(cmd) } => ssm::run(cmd, aws).await,
        Command::Config { init } => cmd_config(init, settings),
        _ => print_help(Some(name)),
    }
}

/// Print top-level help, or a group's help
fn print_help(group: Option<&str>) -> Result<()> {
    let mut command = Cli::command();
    let target = match group {
        Some(name) => command
            .find_subcommand_mut(name)
            .with_context(|| format!("Unknown command group {name}"))?,
        None => &mut command,
    };
    target.print_help().context("Failed to print help")?;
    Ok(())
}

fn cmd_config(init: bool, settings: &Settings) -> Result<()> {
    let path = config::settings_path().context("Could not determine home directory")?;

    if init {
        if config::init_settings_file(&path)? {
            tracing::info!("created {}", path.display());
        } else {
            tracing::info!("{} already exists", path.display());
        }
        return Ok(());
    }

    println!("# {}", path.display());
    print!(
        "{}",
        toml::to_string_pretty(settings).context("Failed to render settings")?
    );
    Ok(())
}
