//! Application state.

use deploytrack_store::{DeploymentRepo, MemoryDeploymentRepo, Reconciler};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn DeploymentRepo>,
    pub reconciler: Reconciler,
}

impl AppState {
    pub fn new(repo: Arc<dyn DeploymentRepo>) -> Self {
        let reconciler = Reconciler::new(Arc::clone(&repo));
        Self { repo, reconciler }
    }

    /// State backed by a fresh, empty in-memory registry.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryDeploymentRepo::new()))
    }
}
