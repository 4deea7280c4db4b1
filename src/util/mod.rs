pub mod aws;
pub mod config;
pub mod output;

use tracing_subscriber::EnvFilter;

pub use aws::{load_sdk_config, AwsOptions};
pub use config::{load_settings, Settings};

/// Default log filter for a `-v` count
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialize stderr logging; `RUST_LOG` wins over `-v`
#[cfg(not(tarpaulin_include))]
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
