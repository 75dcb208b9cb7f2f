//! Sample data for a fresh registry.
//!
//! Seeding goes through the public API like any other client, one create per
//! sample. A failed create is logged and skipped.

use chrono::{DateTime, Duration, Utc};
use deploytrack_core::DeploymentInput;
use tracing::{info, warn};

use crate::DeploymentClient;

/// Counts from one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    pub failed: usize,
}

/// The sample deployments, timed relative to `now`.
///
/// Create stamps `startedAt` itself, so only completion times are sent.
pub fn sample_deployments(now: DateTime<Utc>) -> Vec<DeploymentInput> {
    vec![
        DeploymentInput {
            app_name: "frontend-app".to_string(),
            environment: "dev".to_string(),
            status: "in-progress".to_string(),
            commit_hash: "abc123".to_string(),
            branch: "main".to_string(),
            ..Default::default()
        },
        DeploymentInput {
            app_name: "backend-api".to_string(),
            environment: "staging".to_string(),
            status: "successful".to_string(),
            completed_at: Some(now - Duration::minutes(25)),
            commit_hash: "def456".to_string(),
            branch: "develop".to_string(),
            ..Default::default()
        },
        DeploymentInput {
            app_name: "auth-service".to_string(),
            environment: "prod".to_string(),
            status: "failed".to_string(),
            completed_at: Some(now - Duration::minutes(55)),
            commit_hash: "ghi789".to_string(),
            branch: "main".to_string(),
            ..Default::default()
        },
    ]
}

/// Create every sample deployment through `client`.
pub async fn seed(client: &DeploymentClient) -> SeedReport {
    let mut report = SeedReport::default();

    for input in sample_deployments(Utc::now()) {
        match client.create(&input).await {
            Ok(deployment) => {
                info!(
                    id = %deployment.id,
                    app = %deployment.app_name,
                    "Seeded deployment"
                );
                report.created += 1;
            }
            Err(e) => {
                warn!(app = %input.app_name, error = %e, "Failed to seed deployment");
                report.failed += 1;
            }
        }
    }

    report
}
