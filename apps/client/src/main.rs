use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lightning_client::cli::{self, Cli};
use lightning_client::config::Config;
use lightning_client::ui;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Structured logging on stderr; stdout stays clean for page output
    let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", crate_target, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Lightning client v{}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = cli::run(cli, config).await {
        ui::report_error("command", &err);
        std::process::exit(1);
    }

    Ok(())
}
