use clap::Parser;

use ebaguio::cli::{self, Cli};
use ebaguio::config::AppConfig;
use ebaguio::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from_path(cli.config.clone())?;
    telemetry::init_tracing(&config.logging, cli.verbose)?;

    cli::run(cli, config).await
}
