//! CLI command implementations.

pub mod deployments;

pub use deployments::{create, list, show, update};

use anyhow::Result;
use deploytrack_api::{DeploymentClient, seed::seed as seed_samples};

pub async fn seed(api_url: &str) -> Result<()> {
    let client = DeploymentClient::new(api_url)?;
    let report = seed_samples(&client).await;
    println!(
        "Seeded {} deployment(s), {} failed",
        report.created, report.failed
    );
    Ok(())
}

pub fn validate(path: &str) -> Result<()> {
    let content = std::fs::read_to_string(path)?;
    match deploytrack_config::parse_server_config(&content) {
        Ok(config) => {
            println!("Configuration is valid");
            println!("  listen: {}", config.listen);
            println!("  cors origin: {}", config.cors_origin);
            println!("  seed: {}", config.seed);
            Ok(())
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            std::process::exit(1);
        }
    }
}
