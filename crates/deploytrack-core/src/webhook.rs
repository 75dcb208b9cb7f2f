//! GitHub deployment webhook events.
//!
//! Payloads are treated as untyped JSON. Every field is read through
//! [`get_string`], so a missing or oddly shaped field degrades to an absent
//! value instead of failing the whole event.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::deployment::{Deployment, STATUS_QUEUED};
use crate::{DeploymentId, Error, Result};

/// Placeholder for fields a webhook payload does not carry.
pub const UNKNOWN: &str = "unknown";

/// Read the value at `path` as a string.
///
/// Strings come back as-is, numbers and booleans in their JSON text form,
/// arrays and objects as compact JSON. `null`, a missing key, or a
/// non-object along the way yields `None`.
pub fn get_string(payload: &Value, path: &[&str]) -> Option<String> {
    let value = path
        .iter()
        .try_fold(payload, |current, key| current.as_object()?.get(*key))?;

    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            Some(value.to_string())
        }
    }
}

/// First of `paths` that resolves to a value.
fn first_string(payload: &Value, paths: &[&[&str]]) -> Option<String> {
    paths.iter().find_map(|path| get_string(payload, path))
}

/// A webhook event relevant to the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    /// A new deployment was requested.
    Deployment(DeploymentCreated),
    /// An existing deployment changed state.
    DeploymentStatus(DeploymentStatusChanged),
    /// Anything the registry does not act on.
    Ignored { event_type: String, reason: String },
}

/// Parsed `deployment` event.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentCreated {
    pub id: String,
    pub app_name: String,
    pub environment: String,
    pub sha: String,
    pub r#ref: String,
}

/// Parsed `deployment_status` event.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentStatusChanged {
    pub deployment_id: DeploymentId,
    pub state: String,
}

impl WebhookEvent {
    /// Decode a raw webhook body for the given `X-GitHub-Event` value.
    ///
    /// Fails only when the body is not a JSON object.
    pub fn parse(event_type: &str, body: &[u8]) -> Result<Self> {
        let payload: Value = serde_json::from_slice(body)?;
        if !payload.is_object() {
            return Err(Error::InvalidPayload(
                "webhook body must be a JSON object".to_string(),
            ));
        }
        Ok(Self::from_payload(event_type, &payload))
    }

    /// Classify an already decoded payload.
    pub fn from_payload(event_type: &str, payload: &Value) -> Self {
        match event_type {
            "deployment" => {
                WebhookEvent::Deployment(DeploymentCreated::from_github_payload(payload))
            }
            "deployment_status" => match DeploymentStatusChanged::from_github_payload(payload) {
                Some(status) => WebhookEvent::DeploymentStatus(status),
                None => WebhookEvent::Ignored {
                    event_type: event_type.to_string(),
                    reason: "missing deployment.id".to_string(),
                },
            },
            other => WebhookEvent::Ignored {
                event_type: other.to_string(),
                reason: "unsupported event type".to_string(),
            },
        }
    }
}

impl DeploymentCreated {
    /// Extract deployment fields from a GitHub `deployment` payload.
    ///
    /// Top-level fields take precedence; the nested `deployment` object is
    /// consulted when they are absent.
    pub fn from_github_payload(payload: &Value) -> Self {
        let field = |name: &str| {
            let paths: [&[&str]; 2] = [&[name], &["deployment", name]];
            first_string(payload, &paths).unwrap_or_else(|| UNKNOWN.to_string())
        };

        Self {
            id: field("id"),
            app_name: get_string(payload, &["repository", "name"])
                .unwrap_or_else(|| UNKNOWN.to_string()),
            environment: field("environment"),
            sha: field("sha"),
            r#ref: field("ref"),
        }
    }

    /// The record this event announces, queued as of `now`.
    pub fn into_deployment(self, now: DateTime<Utc>) -> Deployment {
        Deployment {
            id: DeploymentId::from(self.id),
            app_name: self.app_name,
            environment: self.environment,
            status: STATUS_QUEUED.to_string(),
            started_at: now,
            completed_at: None,
            commit_hash: self.sha,
            branch: self.r#ref,
        }
    }
}

impl DeploymentStatusChanged {
    /// Extract the target deployment and new state from a GitHub
    /// `deployment_status` payload.
    ///
    /// Without a deployment id there is nothing to update. A missing state
    /// becomes [`UNKNOWN`].
    pub fn from_github_payload(payload: &Value) -> Option<Self> {
        Some(Self {
            deployment_id: DeploymentId::from(get_string(payload, &["deployment", "id"])?),
            state: get_string(payload, &["state"]).unwrap_or_else(|| UNKNOWN.to_string()),
        })
    }
}
