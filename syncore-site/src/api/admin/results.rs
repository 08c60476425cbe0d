//! Proven result administration

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use syncore_common::db::content::{self, NewProvenResult};
use syncore_common::db::models::ProvenResult;

use crate::api::ApiError;
use crate::AppState;

/// GET /api/admin/results
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProvenResult>>, ApiError> {
    Ok(Json(content::list_results(&state.db).await?))
}

/// POST /api/admin/results
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewProvenResult>,
) -> Result<(StatusCode, Json<ProvenResult>), ApiError> {
    let result = content::create_result(&state.db, &new).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// PUT /api/admin/results/:guid
pub async fn update(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(new): Json<NewProvenResult>,
) -> Result<StatusCode, ApiError> {
    content::update_result(&state.db, &guid, &new).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/results/:guid
pub async fn remove(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, ApiError> {
    content::delete_result(&state.db, &guid).await?;
    Ok(StatusCode::NO_CONTENT)
}
