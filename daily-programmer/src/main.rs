use anyhow::Result;
use clap::Parser;
use daily_programmer::cli::{run, Cli};
use tracing_subscriber::prelude::*;

/// Verbosity comes from `RUST_LOG` (possibly set in `.env`), `info` otherwise.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment before the filter reads RUST_LOG
    dotenv::dotenv().ok();
    init_tracing();
    tracing::info!("CLI application startup: tracing initialised, environment loaded");

    let cli = Cli::parse();
    tracing::info!("CLI arguments parsed, invoking run");

    let result = run(cli).await;
    match &result {
        Ok(_) => tracing::info!("CLI completed successfully"),
        Err(e) => tracing::error!(error = %e, "CLI exited with error"),
    }
    result
}
