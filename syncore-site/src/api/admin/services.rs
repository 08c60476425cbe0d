//! Service card administration

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use syncore_common::db::content::{self, NewService};
use syncore_common::db::models::Service;

use crate::api::ApiError;
use crate::AppState;

/// GET /api/admin/services
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Service>>, ApiError> {
    Ok(Json(content::list_services(&state.db).await?))
}

/// POST /api/admin/services
///
/// Exactly one of icon_class or icon_svg must be set.
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewService>,
) -> Result<(StatusCode, Json<Service>), ApiError> {
    let service = content::create_service(&state.db, &new).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

/// PUT /api/admin/services/:guid
pub async fn update(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(new): Json<NewService>,
) -> Result<StatusCode, ApiError> {
    content::update_service(&state.db, &guid, &new).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/services/:guid
pub async fn remove(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, ApiError> {
    content::delete_service(&state.db, &guid).await?;
    Ok(StatusCode::NO_CONTENT)
}
