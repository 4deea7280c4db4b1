use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum CloudFrontCommand {
    /// Invalidate paths of a distribution and wait for completion
    Invalidate {
        /// Distribution id or one of its aliases (domain name)
        distribution: String,

        /// Paths to invalidate [default: /*]
        paths: Vec<String>,

        /// Return once the invalidation is created
        #[arg(long)]
        no_wait: bool,
    },
}
