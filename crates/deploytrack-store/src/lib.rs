//! Deployment registry for deploytrack.
//!
//! Provides the repository trait, its in-memory implementation and the
//! reconciler that applies webhook events to a repository.

pub mod memory;
pub mod reconcile;
pub mod repo;

pub use memory::MemoryDeploymentRepo;
pub use reconcile::{ReconcileOutcome, Reconciler};
pub use repo::DeploymentRepo;
