use anyhow::Context;
use axum::{Router, http::HeaderValue, middleware, routing::get};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::clients::{AnilistClient, AnimeListSource};
use crate::config::Config;
use crate::services::ComparisonService;

mod compare;
mod error;
mod observability;
mod types;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,

    pub comparison: ComparisonService,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

/// Builds state around an arbitrary list source.
#[must_use]
pub fn create_app_state(
    config: Config,
    source: Arc<dyn AnimeListSource>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        config,
        comparison: ComparisonService::new(source),
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

/// Builds state backed by the AniList client described in `config`.
pub fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let anilist =
        AnilistClient::new(&config.anilist).context("Failed to build AniList HTTP client")?;
    Ok(create_app_state(config, Arc::new(anilist), prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = &state.config.server.cors_allowed_origins;

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    let api_router = Router::new()
        .route("/compare", get(compare::compare_users))
        .route("/health", get(compare::health));

    Router::new()
        .nest("/api", api_router)
        .route("/metrics", get(observability::get_metrics))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::track_metrics))
}
