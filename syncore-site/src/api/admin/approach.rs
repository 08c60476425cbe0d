//! Approach section and step administration
//!
//! Steps are nested under their section; creating a step auto-assigns
//! the next step_order within that section. Deleting a section cascades
//! to its steps.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use syncore_common::db::content::{self, ActiveTable, NewApproachSection, NewApproachStep};
use syncore_common::db::models::{ApproachSection, ApproachStep};

use crate::api::ApiError;
use crate::AppState;

/// GET /api/admin/approach
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ApproachSection>>, ApiError> {
    Ok(Json(content::list_sections(&state.db).await?))
}

/// POST /api/admin/approach
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewApproachSection>,
) -> Result<(StatusCode, Json<ApproachSection>), ApiError> {
    let section = content::create_section(&state.db, &new).await?;
    Ok((StatusCode::CREATED, Json(section)))
}

/// PUT /api/admin/approach/:guid
pub async fn update(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(new): Json<NewApproachSection>,
) -> Result<StatusCode, ApiError> {
    content::update_section(&state.db, &guid, &new).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/approach/:guid
pub async fn remove(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, ApiError> {
    content::delete_section(&state.db, &guid).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/approach/:guid/activate
pub async fn activate(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, ApiError> {
    content::activate(&state.db, ActiveTable::ApproachSections, &guid).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/admin/approach/:guid/steps
pub async fn list_steps(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<Json<Vec<ApproachStep>>, ApiError> {
    Ok(Json(content::list_steps(&state.db, &guid).await?))
}

/// POST /api/admin/approach/:guid/steps
///
/// step_order is assigned automatically when omitted.
pub async fn create_step(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(new): Json<NewApproachStep>,
) -> Result<(StatusCode, Json<ApproachStep>), ApiError> {
    let step = content::create_step(&state.db, &guid, &new).await?;
    Ok((StatusCode::CREATED, Json(step)))
}

/// PUT /api/admin/steps/:guid
pub async fn update_step(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(new): Json<NewApproachStep>,
) -> Result<StatusCode, ApiError> {
    content::update_step(&state.db, &guid, &new).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/steps/:guid
pub async fn remove_step(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, ApiError> {
    content::delete_step(&state.db, &guid).await?;
    Ok(StatusCode::NO_CONTENT)
}
