//! Applies webhook events to a deployment repository.

use std::sync::Arc;

use chrono::Utc;
use deploytrack_core::webhook::{DeploymentCreated, DeploymentStatusChanged};
use deploytrack_core::{Deployment, DeploymentId, Result, WebhookEvent};
use tracing::{info, warn};

use crate::DeploymentRepo;

/// What applying an event did to the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileOutcome {
    /// A `deployment` event added a record.
    Created(Deployment),
    /// A `deployment_status` event updated a record.
    Updated(Deployment),
    /// A `deployment_status` event named an id with no record.
    NotFound(DeploymentId),
    /// The event was acknowledged without touching the registry.
    Ignored,
}

impl ReconcileOutcome {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            ReconcileOutcome::Created(_) | ReconcileOutcome::Updated(_)
        )
    }
}

/// Translates provider events into creates and updates.
#[derive(Clone)]
pub struct Reconciler {
    repo: Arc<dyn DeploymentRepo>,
}

impl Reconciler {
    pub fn new(repo: Arc<dyn DeploymentRepo>) -> Self {
        Self { repo }
    }

    pub async fn apply(&self, event: WebhookEvent) -> Result<ReconcileOutcome> {
        match event {
            WebhookEvent::Deployment(created) => self.apply_created(created).await,
            WebhookEvent::DeploymentStatus(changed) => self.apply_status(changed).await,
            WebhookEvent::Ignored { event_type, reason } => {
                info!(event = %event_type, reason = %reason, "Ignoring webhook event");
                Ok(ReconcileOutcome::Ignored)
            }
        }
    }

    async fn apply_created(&self, created: DeploymentCreated) -> Result<ReconcileOutcome> {
        let deployment = self.repo.append(created.into_deployment(Utc::now())).await?;
        info!(
            id = %deployment.id,
            app = %deployment.app_name,
            environment = %deployment.environment,
            "Added deployment from webhook"
        );
        Ok(ReconcileOutcome::Created(deployment))
    }

    async fn apply_status(&self, changed: DeploymentStatusChanged) -> Result<ReconcileOutcome> {
        match self
            .repo
            .update_status(&changed.deployment_id, &changed.state)
            .await?
        {
            Some(deployment) => {
                info!(
                    id = %deployment.id,
                    status = %deployment.status,
                    completed = deployment.is_completed(),
                    "Updated deployment status"
                );
                Ok(ReconcileOutcome::Updated(deployment))
            }
            None => {
                warn!(id = %changed.deployment_id, "Deployment not found for status event");
                Ok(ReconcileOutcome::NotFound(changed.deployment_id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryDeploymentRepo;
    use serde_json::json;

    fn setup() -> (Arc<MemoryDeploymentRepo>, Reconciler) {
        let repo = Arc::new(MemoryDeploymentRepo::new());
        let reconciler = Reconciler::new(repo.clone());
        (repo, reconciler)
    }

    fn deployment_event(id: &str) -> WebhookEvent {
        WebhookEvent::from_payload(
            "deployment",
            &json!({
                "id": id,
                "repository": { "name": "svc" },
                "environment": "dev",
                "sha": "abc",
                "ref": "refs/heads/main",
            }),
        )
    }

    fn status_event(id: &str, state: &str) -> WebhookEvent {
        WebhookEvent::from_payload(
            "deployment_status",
            &json!({ "deployment": { "id": id }, "state": state }),
        )
    }

    #[tokio::test]
    async fn test_deployment_event_appends_queued_record() {
        let (repo, reconciler) = setup();

        let outcome = reconciler.apply(deployment_event("42")).await.unwrap();
        assert!(outcome.is_mutation());

        let stored = repo.get(&DeploymentId::from("42")).await.unwrap();
        assert_eq!(stored.status, "queued");
        assert_eq!(stored.app_name, "svc");
        assert_eq!(stored.commit_hash, "abc");
        assert_eq!(stored.branch, "refs/heads/main");
        assert!(stored.completed_at.is_none());
    }

    #[tokio::test]
    async fn test_repeated_deployment_events_are_not_deduplicated() {
        let (repo, reconciler) = setup();

        reconciler.apply(deployment_event("42")).await.unwrap();
        reconciler.apply(deployment_event("42")).await.unwrap();

        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_success_status_completes_deployment() {
        let (repo, reconciler) = setup();
        reconciler.apply(deployment_event("42")).await.unwrap();

        let outcome = reconciler
            .apply(status_event("42", "success"))
            .await
            .unwrap();
        let ReconcileOutcome::Updated(updated) = outcome else {
            panic!("expected an update");
        };
        assert_eq!(updated.status, "success");
        assert!(updated.completed_at.is_some());
        assert_eq!(repo.get(&DeploymentId::from("42")).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_intermediate_status_leaves_completion_unset() {
        let (repo, reconciler) = setup();
        reconciler.apply(deployment_event("7")).await.unwrap();

        reconciler
            .apply(status_event("7", "in_progress"))
            .await
            .unwrap();

        let stored = repo.get(&DeploymentId::from("7")).await.unwrap();
        assert_eq!(stored.status, "in_progress");
        assert!(stored.completed_at.is_none());
    }

    #[tokio::test]
    async fn test_status_without_state_marks_record_unknown() {
        let (repo, reconciler) = setup();
        reconciler.apply(deployment_event("42")).await.unwrap();

        let event =
            WebhookEvent::from_payload("deployment_status", &json!({ "deployment": { "id": "42" } }));
        let outcome = reconciler.apply(event).await.unwrap();

        assert!(matches!(outcome, ReconcileOutcome::Updated(_)));
        let stored = repo.get(&DeploymentId::from("42")).await.unwrap();
        assert_eq!(stored.status, "unknown");
        assert!(stored.completed_at.is_none());
    }

    #[tokio::test]
    async fn test_status_for_unknown_deployment_mutates_nothing() {
        let (repo, reconciler) = setup();
        reconciler.apply(deployment_event("1")).await.unwrap();
        let before = repo.list().await.unwrap();

        let outcome = reconciler
            .apply(status_event("99", "failure"))
            .await
            .unwrap();

        assert_eq!(outcome, ReconcileOutcome::NotFound(DeploymentId::from("99")));
        assert_eq!(repo.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_unsupported_events_are_ignored() {
        let (repo, reconciler) = setup();

        let event = WebhookEvent::from_payload("ping", &json!({ "zen": "Keep it simple." }));
        let outcome = reconciler.apply(event).await.unwrap();

        assert_eq!(outcome, ReconcileOutcome::Ignored);
        assert!(!outcome.is_mutation());
        assert!(repo.is_empty().await);
    }
}
