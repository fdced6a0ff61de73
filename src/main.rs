//! ResearchHub CLI
//!
#![doc = "Main entry point for the researchhub command-line client."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use researchhub::cli::Cli;
use researchhub::commands;
use researchhub::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;
    tracing::debug!("Using backend {}", config.api.base_url);

    commands::dispatch(config, cli.command).await
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so that `--json` output on stdout stays parseable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "researchhub=debug"
    } else {
        "researchhub=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
