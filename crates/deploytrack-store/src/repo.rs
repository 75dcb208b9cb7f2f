//! Repository trait for deployment records.

use async_trait::async_trait;
use deploytrack_core::{Deployment, DeploymentId, DeploymentInput, Result};

#[async_trait]
pub trait DeploymentRepo: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<Deployment>>;

    /// Store a new record with a generated id and the current start time.
    async fn create(&self, input: DeploymentInput) -> Result<Deployment>;

    async fn get(&self, id: &DeploymentId) -> Result<Deployment>;

    /// Overwrite the first record with `id`.
    async fn replace(&self, id: &DeploymentId, input: DeploymentInput) -> Result<Deployment>;

    /// Store a fully formed record as-is, without checking for an existing id.
    async fn append(&self, deployment: Deployment) -> Result<Deployment>;

    /// Set the status of the first record with `id`, stamping the completion
    /// time on terminal states. Returns `None` when no record matches.
    async fn update_status(&self, id: &DeploymentId, status: &str) -> Result<Option<Deployment>>;
}
