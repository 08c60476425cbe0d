//! Metric administration

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use syncore_common::db::content::{self, NewMetric};
use syncore_common::db::models::Metric;

use crate::api::ApiError;
use crate::AppState;

/// GET /api/admin/metrics
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Metric>>, ApiError> {
    Ok(Json(content::list_metrics(&state.db).await?))
}

/// POST /api/admin/metrics
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewMetric>,
) -> Result<(StatusCode, Json<Metric>), ApiError> {
    let metric = content::create_metric(&state.db, &new).await?;
    Ok((StatusCode::CREATED, Json(metric)))
}

/// PUT /api/admin/metrics/:guid
pub async fn update(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(new): Json<NewMetric>,
) -> Result<StatusCode, ApiError> {
    content::update_metric(&state.db, &guid, &new).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/metrics/:guid
pub async fn remove(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, ApiError> {
    content::delete_metric(&state.db, &guid).await?;
    Ok(StatusCode::NO_CONTENT)
}
