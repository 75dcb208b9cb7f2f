//! Deployment identifiers.

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Layout of generated ids: UTC time to the second, e.g. `20240131154502`.
const ID_FORMAT: &str = "%Y%m%d%H%M%S";

/// Identifier of a deployment record.
///
/// Ids created by the registry are derived from the creation time and sort
/// lexicographically. Two creates within the same second produce the same id.
/// Ids arriving through webhooks are the provider's own identifiers and are
/// stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct DeploymentId(String);

impl DeploymentId {
    /// Generate an id from the current time.
    pub fn generate() -> Self {
        Self::from_timestamp(Utc::now())
    }

    /// Generate the id that a record created at `at` would receive.
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.format(ID_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DeploymentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for DeploymentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl PartialEq<str> for DeploymentId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DeploymentId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
