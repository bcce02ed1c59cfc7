//! A4 Stock Tracker - command-line client

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use a4_stock_client::cli::Cli;
use a4_stock_client::{handlers, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "a4_stock=info,a4_stock_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let mut config = Config::load()?;
    if let Some(base_url) = cli.base_url.clone() {
        config.api.base_url = base_url;
    }

    tracing::debug!("Environment: {}", config.environment);
    tracing::debug!("Backend: {}", config.api.base_url);

    let state = AppState::from_config(config)?;

    match handlers::dispatch(&state, cli.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            tracing::error!(code = e.code(), "{}", e);
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}
