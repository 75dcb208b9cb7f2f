//! Deployment CRUD endpoints.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use deploytrack_core::{Deployment, DeploymentId, DeploymentInput};
use tracing::info;

use crate::AppState;
use crate::error::{ApiError, decode_json};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/deployments", get(list_deployments).post(create_deployment))
        .route("/deployments/{id}", get(get_deployment).put(replace_deployment))
}

async fn list_deployments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Deployment>>, ApiError> {
    Ok(Json(state.repo.list().await?))
}

async fn create_deployment(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Deployment>), ApiError> {
    let input: DeploymentInput = decode_json(&body)?;
    let deployment = state.repo.create(input).await?;

    info!(
        id = %deployment.id,
        app = %deployment.app_name,
        environment = %deployment.environment,
        "Created deployment"
    );

    Ok((StatusCode::CREATED, Json(deployment)))
}

async fn get_deployment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deployment>, ApiError> {
    let deployment = state.repo.get(&DeploymentId::from(id)).await?;
    Ok(Json(deployment))
}

async fn replace_deployment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Deployment>, ApiError> {
    let input: DeploymentInput = decode_json(&body)?;
    let deployment = state.repo.replace(&DeploymentId::from(id), input).await?;

    info!(id = %deployment.id, status = %deployment.status, "Replaced deployment");

    Ok(Json(deployment))
}
