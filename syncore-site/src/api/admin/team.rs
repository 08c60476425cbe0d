//! Team member administration

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use syncore_common::db::content::{self, NewTeamMember};
use syncore_common::db::models::TeamMember;

use crate::api::ApiError;
use crate::AppState;

/// GET /api/admin/team
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<TeamMember>>, ApiError> {
    Ok(Json(content::list_team_members(&state.db).await?))
}

/// POST /api/admin/team
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewTeamMember>,
) -> Result<(StatusCode, Json<TeamMember>), ApiError> {
    let member = content::create_team_member(&state.db, &new).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// PUT /api/admin/team/:guid
pub async fn update(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(new): Json<NewTeamMember>,
) -> Result<StatusCode, ApiError> {
    content::update_team_member(&state.db, &guid, &new).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/team/:guid
pub async fn remove(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, ApiError> {
    content::delete_team_member(&state.db, &guid).await?;
    Ok(StatusCode::NO_CONTENT)
}
