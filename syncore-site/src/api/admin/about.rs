//! About-us block administration

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use syncore_common::db::content::{self, ActiveTable, NewAboutUs};
use syncore_common::db::models::AboutUs;

use crate::api::ApiError;
use crate::AppState;

/// GET /api/admin/about
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<AboutUs>>, ApiError> {
    Ok(Json(content::list_about_us(&state.db).await?))
}

/// POST /api/admin/about
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewAboutUs>,
) -> Result<(StatusCode, Json<AboutUs>), ApiError> {
    let about = content::create_about_us(&state.db, &new).await?;
    Ok((StatusCode::CREATED, Json(about)))
}

/// PUT /api/admin/about/:guid
pub async fn update(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(new): Json<NewAboutUs>,
) -> Result<StatusCode, ApiError> {
    content::update_about_us(&state.db, &guid, &new).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/about/:guid
pub async fn remove(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, ApiError> {
    content::delete_about_us(&state.db, &guid).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/about/:guid/activate
pub async fn activate(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, ApiError> {
    content::activate(&state.db, ActiveTable::AboutUs, &guid).await?;
    Ok(StatusCode::NO_CONTENT)
}
