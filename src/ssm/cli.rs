use clap::{ArgAction, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
pub enum SsmCommand {
    /// Print parameters under a path as NAME="value" lines
    Read {
        /// Path prefix (e.g., /app/prod)
        #[arg(long)]
        path: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Output a JSON object instead
        #[arg(long)]
        json: bool,

        /// Include parameters nested below the path
        #[arg(short, long)]
        recursive: bool,
    },

    /// Load a .env file into parameters under a path
    Load {
        /// Path prefix (e.g., /app/prod)
        #[arg(long)]
        path: String,

        /// .env file to read
        env_file: PathBuf,

        /// Only show what would be written (pass --dry-run=false to write)
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        dry_run: bool,

        /// Store as String instead of SecureString
        #[arg(long)]
        plain: bool,
    },

    /// Delete all parameters under a path
    Delete {
        /// Path prefix (e.g., /app/prod)
        #[arg(long)]
        path: String,

        /// Only list what would be deleted (pass --dry-run=false to delete)
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        dry_run: bool,

        /// Include parameters nested below the path
        #[arg(short, long)]
        recursive: bool,
    },

    /// Run a command with parameters under a path as environment variables
    Exec {
        /// Path prefix (e.g., /app/prod)
        #[arg(long)]
        path: String,

        /// Include parameters nested below the path
        #[arg(short, long)]
        recursive: bool,

        /// Command and arguments, after --
        #[arg(last = true, required = true)]
        command: Vec<String>,
    },
}
