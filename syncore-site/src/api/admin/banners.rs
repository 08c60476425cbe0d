//! Home banner administration

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use syncore_common::db::content::{self, ActiveTable, NewHomeBanner};
use syncore_common::db::models::HomeBanner;

use crate::api::ApiError;
use crate::AppState;

/// GET /api/admin/banners
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<HomeBanner>>, ApiError> {
    Ok(Json(content::list_banners(&state.db).await?))
}

/// POST /api/admin/banners
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewHomeBanner>,
) -> Result<(StatusCode, Json<HomeBanner>), ApiError> {
    let banner = content::create_banner(&state.db, &new).await?;
    Ok((StatusCode::CREATED, Json(banner)))
}

/// PUT /api/admin/banners/:guid
pub async fn update(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(new): Json<NewHomeBanner>,
) -> Result<StatusCode, ApiError> {
    content::update_banner(&state.db, &guid, &new).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/banners/:guid
pub async fn remove(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, ApiError> {
    content::delete_banner(&state.db, &guid).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/banners/:guid/activate
///
/// Makes this banner the single active one.
pub async fn activate(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, ApiError> {
    content::activate(&state.db, ActiveTable::HomeBanners, &guid).await?;
    Ok(StatusCode::NO_CONTENT)
}
