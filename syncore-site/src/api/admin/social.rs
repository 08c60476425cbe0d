//! Social link administration

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use syncore_common::db::content::{self, NewSocialLink};
use syncore_common::db::models::SocialLink;

use crate::api::ApiError;
use crate::AppState;

/// GET /api/admin/social
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<SocialLink>>, ApiError> {
    Ok(Json(content::list_social_links(&state.db).await?))
}

/// POST /api/admin/social
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewSocialLink>,
) -> Result<(StatusCode, Json<SocialLink>), ApiError> {
    let link = content::create_social_link(&state.db, &new).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// PUT /api/admin/social/:guid
pub async fn update(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(new): Json<NewSocialLink>,
) -> Result<StatusCode, ApiError> {
    content::update_social_link(&state.db, &guid, &new).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/social/:guid
pub async fn remove(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, ApiError> {
    content::delete_social_link(&state.db, &guid).await?;
    Ok(StatusCode::NO_CONTENT)
}
