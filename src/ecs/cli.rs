use clap::Subcommand;
use std::path::PathBuf;

use super::types::DEFAULT_IMAGE_PLACEHOLDER;

#[derive(Debug, Subcommand)]
pub enum EcsCommand {
    /// Generate a CodeDeploy AppSpec for a service
    Appspec {
        /// Cluster name
        #[arg(long, env = "CLUSTER_NAME")]
        cluster: String,

        /// Service name
        #[arg(long, env = "SERVICE_NAME")]
        service: String,

        /// Container receiving load balancer traffic
        #[arg(long, env = "CONTAINER_NAME")]
        container_name: String,

        /// Port of that container
        #[arg(long, env = "CONTAINER_PORT", default_value_t = 8080)]
        container_port: u32,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the tagged template task definition of a family
    Template {
        /// Task definition family
        family: String,

        /// Tag marking the template, as Key=Value [default: from settings]
        #[arg(long)]
        tag: Option<String>,

        /// Placeholder replacing the first container's image
        #[arg(long, default_value = DEFAULT_IMAGE_PLACEHOLDER)]
        image: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Deregister and delete revisions older than each service's template
    Prune {
        /// Cluster name
        #[arg(long, env = "CLUSTER_NAME")]
        cluster: String,

        /// Services (task definition families), comma-separated
        #[arg(long, env = "SERVICE_NAMES", value_delimiter = ',', required = true)]
        services: Vec<String>,

        /// Tag marking the template, as Key=Value [default: from settings]
        #[arg(long)]
        tag: Option<String>,

        /// Only list what would be pruned
        #[arg(long)]
        dry_run: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        cmd: EcsCommand,
    }

    fn parse(args: &[&str]) -> Result<EcsCommand, clap::Error> {
        TestCli::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
            .map(|c| c.cmd)
    }

    #[test]
    fn command_definition_is_valid() {
        TestCli::command().debug_assert();
    }

    #[test]
    fn parses_appspec_flags() {
        let cmd = parse(&[
            "appspec",
            "--cluster",
            "main",
            "--service",
            "web",
            "--container-name",
            "app",
            "--container-port",
            "3000",
        ])
        .unwrap();

        match cmd {
            EcsCommand::Appspec {
                cluster,
                service,
                container_name,
                container_port,
                out,
            } => {
                assert_eq!(cluster, "main");
                assert_eq!(service, "web");
                assert_eq!(container_name, "app");
                assert_eq!(container_port, 3000);
                assert!(out.is_none());
            }
            _ => panic!("Expected Appspec command"),
        }
    }

    #[test]
    fn appspec_rejects_non_numeric_port() {
        let result = parse(&[
            "appspec",
            "--cluster",
            "main",
            "--service",
            "web",
            "--container-name",
            "app",
            "--container-port",
            "http",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn template_defaults() {
        match parse(&["template", "web"]).unwrap() {
            EcsCommand::Template {
                family,
                tag,
                image,
                out,
            } => {
                assert_eq!(family, "web");
                assert!(tag.is_none());
                assert_eq!(image, "<IMAGE1_NAME>");
                assert!(out.is_none());
            }
            _ => panic!("Expected Template command"),
        }
    }

    #[test]
    fn template_requires_family() {
        assert!(parse(&["template"]).is_err());
    }

    #[test]
    fn prune_splits_services() {
        match parse(&["prune", "--cluster", "main", "--services", "web,worker"]).unwrap() {
            EcsCommand::Prune {
                cluster,
                services,
                dry_run,
                ..
            } => {
                assert_eq!(cluster, "main");
                assert_eq!(services, vec!["web", "worker"]);
                assert!(!dry_run);
            }
            _ => panic!("Expected Prune command"),
        }
    }
}
