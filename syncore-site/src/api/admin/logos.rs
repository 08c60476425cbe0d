//! Trusted logo administration
//!
//! Admin listing orders by display_order; the public home page uses
//! creation order instead.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use syncore_common::db::content::{self, NewTrustedLogo};
use syncore_common::db::models::TrustedLogo;

use crate::api::ApiError;
use crate::AppState;

/// GET /api/admin/logos
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<TrustedLogo>>, ApiError> {
    Ok(Json(content::list_logos(&state.db).await?))
}

/// POST /api/admin/logos
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewTrustedLogo>,
) -> Result<(StatusCode, Json<TrustedLogo>), ApiError> {
    let logo = content::create_logo(&state.db, &new).await?;
    Ok((StatusCode::CREATED, Json(logo)))
}

/// PUT /api/admin/logos/:guid
pub async fn update(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(new): Json<NewTrustedLogo>,
) -> Result<StatusCode, ApiError> {
    content::update_logo(&state.db, &guid, &new).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/logos/:guid
pub async fn remove(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, ApiError> {
    content::delete_logo(&state.db, &guid).await?;
    Ok(StatusCode::NO_CONTENT)
}
