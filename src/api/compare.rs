use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, CompareQuery, HealthResponse};
use crate::comparison::ComparisonReport;

/// `GET /api/compare?user_a=..&user_b=..`
pub async fn compare_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<ApiResponse<ComparisonReport>>, ApiError> {
    let report = state
        .comparison
        .compare_users(&query.user_a, &query.user_b)
        .await?;

    Ok(Json(ApiResponse::success(report)))
}

/// `GET /api/health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "alive",
        uptime_seconds: state.start_time.elapsed().as_secs(),
    }))
}
