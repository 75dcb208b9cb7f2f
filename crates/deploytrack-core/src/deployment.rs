//! Deployment records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::DeploymentId;

/// Status given to deployments announced by a webhook.
pub const STATUS_QUEUED: &str = "queued";
/// Webhook state that completes a deployment successfully.
pub const STATUS_SUCCESS: &str = "success";
/// Webhook state that completes a deployment unsuccessfully.
pub const STATUS_FAILURE: &str = "failure";

/// Whether reaching `status` stamps the completion time.
///
/// Only the provider's terminal states count; labels such as `successful`
/// or `failed` supplied through the CRUD API are left alone.
pub fn is_terminal_status(status: &str) -> bool {
    status == STATUS_SUCCESS || status == STATUS_FAILURE
}

/// One tracked attempt to ship an application to an environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub id: DeploymentId,
    pub app_name: String,
    pub environment: String,
    pub status: String,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub commit_hash: String,
    pub branch: String,
}

/// Request body for creating or replacing a deployment.
///
/// Every field may be omitted. Missing text decodes as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeploymentInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub app_name: String,
    pub environment: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub commit_hash: String,
    pub branch: String,
}

impl Deployment {
    /// Build a freshly created record. The input's own id and start time are
    /// discarded in favour of `id` and `now`.
    pub fn create(id: DeploymentId, input: DeploymentInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            app_name: input.app_name,
            environment: input.environment,
            status: input.status,
            started_at: now,
            completed_at: input.completed_at,
            commit_hash: input.commit_hash,
            branch: input.branch,
        }
    }

    /// Overwrite this record with `input`.
    ///
    /// The id is kept so the record stays reachable under the id it was
    /// looked up by. The start time is kept only when the input has none.
    pub fn replace_with(&mut self, input: DeploymentInput) {
        self.app_name = input.app_name;
        self.environment = input.environment;
        self.status = input.status;
        if let Some(started_at) = input.started_at {
            self.started_at = started_at;
        }
        self.completed_at = input.completed_at;
        self.commit_hash = input.commit_hash;
        self.branch = input.branch;
    }

    /// Apply a provider state, stamping `completed_at` on terminal states.
    pub fn apply_status(&mut self, status: &str, now: DateTime<Utc>) {
        self.status = status.to_string();
        if is_terminal_status(status) {
            self.completed_at = Some(now);
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

impl From<&Deployment> for DeploymentInput {
    fn from(deployment: &Deployment) -> Self {
        Self {
            id: Some(deployment.id.to_string()),
            app_name: deployment.app_name.clone(),
            environment: deployment.environment.clone(),
            status: deployment.status.clone(),
            started_at: Some(deployment.started_at),
            completed_at: deployment.completed_at,
            commit_hash: deployment.commit_hash.clone(),
            branch: deployment.branch.clone(),
        }
    }
}
