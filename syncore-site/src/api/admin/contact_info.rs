//! Contact info administration
//!
//! The public side only renders the first row; keeping multiple rows is
//! allowed but unusual.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use syncore_common::db::content::{self, NewContactInfo};
use syncore_common::db::models::ContactInfo;

use crate::api::ApiError;
use crate::AppState;

/// GET /api/admin/contact-info
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ContactInfo>>, ApiError> {
    Ok(Json(content::list_contact_info(&state.db).await?))
}

/// POST /api/admin/contact-info
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewContactInfo>,
) -> Result<(StatusCode, Json<ContactInfo>), ApiError> {
    let info = content::create_contact_info(&state.db, &new).await?;
    Ok((StatusCode::CREATED, Json(info)))
}

/// PUT /api/admin/contact-info/:guid
pub async fn update(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(new): Json<NewContactInfo>,
) -> Result<StatusCode, ApiError> {
    content::update_contact_info(&state.db, &guid, &new).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/contact-info/:guid
pub async fn remove(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, ApiError> {
    content::delete_contact_info(&state.db, &guid).await?;
    Ok(StatusCode::NO_CONTENT)
}
