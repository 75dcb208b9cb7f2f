//! HTTP client for a running deploytrack server.

use deploytrack_core::{Deployment, DeploymentInput};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// Client errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Client for the deployment endpoints.
#[derive(Debug, Clone)]
pub struct DeploymentClient {
    client: reqwest::Client,
    base_url: Url,
}

impl DeploymentClient {
    /// Create a client for the server at `base_url`, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    /// List every deployment.
    pub async fn list(&self) -> Result<Vec<Deployment>, ClientError> {
        let response = self
            .client
            .get(self.endpoint(&["api", "deployments"]))
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        parse(response).await
    }

    /// Fetch one deployment.
    pub async fn get(&self, id: &str) -> Result<Deployment, ClientError> {
        let response = self
            .client
            .get(self.endpoint(&["api", "deployments", id]))
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        parse(response).await
    }

    /// Create a deployment. The server assigns the id and start time.
    pub async fn create(&self, input: &DeploymentInput) -> Result<Deployment, ClientError> {
        let response = self
            .client
            .post(self.endpoint(&["api", "deployments"]))
            .json(input)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        parse(response).await
    }

    /// Replace the deployment stored under `id`.
    pub async fn replace(
        &self,
        id: &str,
        input: &DeploymentInput,
    ) -> Result<Deployment, ClientError> {
        let response = self
            .client
            .put(self.endpoint(&["api", "deployments", id]))
            .json(input)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        parse(response).await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| v.get("error")?.as_str().map(str::to_string))
            .unwrap_or(text);

        return Err(if status == StatusCode::NOT_FOUND {
            ClientError::NotFound(message)
        } else {
            ClientError::Api {
                status: status.as_u16(),
                message,
            }
        });
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let client = DeploymentClient::new("http://localhost:8080").unwrap();
        assert_eq!(
            client.endpoint(&["api", "deployments"]).as_str(),
            "http://localhost:8080/api/deployments"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_escapes_ids() {
        let client = DeploymentClient::new("http://example.com/tracker/").unwrap();
        assert_eq!(
            client.endpoint(&["api", "deployments", "a b/c"]).as_str(),
            "http://example.com/tracker/api/deployments/a%20b%2Fc"
        );
    }

    #[test]
    fn test_rejects_unusable_base() {
        assert!(matches!(
            DeploymentClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            DeploymentClient::new("mailto:ops@example.com"),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
