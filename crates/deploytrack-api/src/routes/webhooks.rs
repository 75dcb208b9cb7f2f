//! Webhook endpoint for GitHub deployment events.

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use deploytrack_core::WebhookEvent;
use tracing::{debug, error, info};

use crate::AppState;
use crate::error::ApiError;

pub fn router() -> Router<AppState> {
    Router::new().route("/github-webhook", post(github_webhook))
}

/// Handle GitHub webhook events.
///
/// Anything that decodes is acknowledged with 200, including events that
/// change nothing, so the sender does not retry or disable the hook.
async fn github_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let event_type = headers
        .get("X-GitHub-Event")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    let delivery = headers
        .get("X-GitHub-Delivery")
        .and_then(|v| v.to_str().ok());

    let event = WebhookEvent::parse(event_type, &body)?;

    info!(
        event = %event_type,
        delivery = ?delivery,
        "Received GitHub webhook"
    );

    match state.reconciler.apply(event).await {
        Ok(outcome) => debug!(?outcome, "Webhook reconciled"),
        Err(e) => error!(event = %event_type, error = %e, "Failed to apply webhook"),
    }

    Ok(StatusCode::OK)
}
