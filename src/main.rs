use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use zingo::{cli::Cli, commands, error::ServiceResult};

#[tokio::main]
async fn main() -> ServiceResult<()> {
    let cli = Cli::parse();

    // stdout is for command output, logs go to stderr.
    let fallback = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("starting {}", zingo::metadata::PKG_NAME);
    commands::run(cli).await
}
