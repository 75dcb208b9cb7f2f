//! API server for deploytrack.
//!
//! Provides the HTTP REST API, the GitHub webhook endpoint and a client for
//! talking to a running server.

pub mod client;
pub mod error;
pub mod routes;
pub mod seed;
pub mod state;

pub use client::{ClientError, DeploymentClient};
pub use state::AppState;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use deploytrack_config::ServerConfig;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the router with tracing and CORS applied.
pub fn app(state: AppState, config: &ServerConfig) -> anyhow::Result<Router> {
    Ok(routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origin)?))
}

/// CORS policy: one origin, with credentials, limited methods and headers.
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    Ok(CorsLayer::new()
        .allow_origin(HeaderValue::from_str(origin)?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}
