//! Transform block administration

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use syncore_common::db::content::{self, ActiveTable, NewTransformBlock};
use syncore_common::db::models::TransformBlock;

use crate::api::ApiError;
use crate::AppState;

/// GET /api/admin/transform
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<TransformBlock>>, ApiError> {
    Ok(Json(content::list_transform_blocks(&state.db).await?))
}

/// POST /api/admin/transform
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewTransformBlock>,
) -> Result<(StatusCode, Json<TransformBlock>), ApiError> {
    let block = content::create_transform_block(&state.db, &new).await?;
    Ok((StatusCode::CREATED, Json(block)))
}

/// PUT /api/admin/transform/:guid
pub async fn update(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(new): Json<NewTransformBlock>,
) -> Result<StatusCode, ApiError> {
    content::update_transform_block(&state.db, &guid, &new).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/transform/:guid
pub async fn remove(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, ApiError> {
    content::delete_transform_block(&state.db, &guid).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/transform/:guid/activate
pub async fn activate(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, ApiError> {
    content::activate(&state.db, ActiveTable::TransformBlocks, &guid).await?;
    Ok(StatusCode::NO_CONTENT)
}
