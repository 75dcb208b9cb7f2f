//! In-memory deployment repository.

use async_trait::async_trait;
use chrono::Utc;
use deploytrack_core::{Deployment, DeploymentId, DeploymentInput, Error, Result};
use tokio::sync::RwLock;

use crate::DeploymentRepo;

/// Process-local registry. Records live until the process exits.
///
/// All access goes through one lock, so readers never see a record that is
/// half appended or half overwritten.
#[derive(Debug, Default)]
pub struct MemoryDeploymentRepo {
    deployments: RwLock<Vec<Deployment>>,
}

impl MemoryDeploymentRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.deployments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.deployments.read().await.is_empty()
    }
}

fn not_found(id: &DeploymentId) -> Error {
    Error::NotFound(format!("deployment {}", id))
}

#[async_trait]
impl DeploymentRepo for MemoryDeploymentRepo {
    async fn list(&self) -> Result<Vec<Deployment>> {
        Ok(self.deployments.read().await.clone())
    }

    async fn create(&self, input: DeploymentInput) -> Result<Deployment> {
        let now = Utc::now();
        let deployment = Deployment::create(DeploymentId::from_timestamp(now), input, now);
        self.deployments.write().await.push(deployment.clone());
        Ok(deployment)
    }

    async fn get(&self, id: &DeploymentId) -> Result<Deployment> {
        self.deployments
            .read()
            .await
            .iter()
            .find(|d| &d.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn replace(&self, id: &DeploymentId, input: DeploymentInput) -> Result<Deployment> {
        let mut deployments = self.deployments.write().await;
        let deployment = deployments
            .iter_mut()
            .find(|d| &d.id == id)
            .ok_or_else(|| not_found(id))?;
        deployment.replace_with(input);
        Ok(deployment.clone())
    }

    async fn append(&self, deployment: Deployment) -> Result<Deployment> {
        self.deployments.write().await.push(deployment.clone());
        Ok(deployment)
    }

    async fn update_status(&self, id: &DeploymentId, status: &str) -> Result<Option<Deployment>> {
        let mut deployments = self.deployments.write().await;
        let Some(deployment) = deployments.iter_mut().find(|d| &d.id == id) else {
            return Ok(None);
        };
        deployment.apply_status(status, Utc::now());
        Ok(Some(deployment.clone()))
    }
}
