//! deploytrack API server

use clap::Parser;
use deploytrack_api::{AppState, DeploymentClient, seed};
use deploytrack_config::{load_server_config, loopback_url};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deploytrack-server")]
#[command(about = "Deployment tracking API server", long_about = None)]
struct Args {
    /// Path to a KDL configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_server_config(args.config.as_deref())?;

    let state = AppState::in_memory();
    let app = deploytrack_api::app(state, &config)?;

    // Start server
    info!("Starting server on {}", config.listen);
    let listener = TcpListener::bind(config.listen).await?;

    if config.seed {
        let base_url = loopback_url(listener.local_addr()?);
        tokio::spawn(async move {
            match DeploymentClient::new(&base_url) {
                Ok(client) => {
                    let report = seed::seed(&client).await;
                    info!(
                        created = report.created,
                        failed = report.failed,
                        "Seeding finished"
                    );
                }
                Err(e) => warn!(error = %e, "Skipping seeding"),
            }
        });
    }

    axum::serve(listener, app).await?;

    Ok(())
}
