//! Admin authentication middleware
//!
//! Admin routes require the `X-Admin-Token` header to match the
//! `admin_token` setting. An empty configured token disables ALL auth
//! checking; this is the development default.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use crate::AppState;

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Admin authentication middleware
///
/// Returns 401 Unauthorized if the token is missing or wrong.
///
/// **Note:** This is applied to /api/admin routes only. Public routes
/// and /health do NOT use this middleware.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    // An empty configured token disables auth checking
    if state.admin_token.is_empty() {
        return Ok(next.run(request).await);
    }

    let provided = request
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    if provided != state.admin_token.as_str() {
        warn!("Admin token mismatch from {:?}", request.uri());
        return Err(AuthError::InvalidToken);
    }

    Ok(next.run(request).await)
}

/// Authentication error types for HTTP responses
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "Missing X-Admin-Token header".to_string(),
            AuthError::InvalidToken => "Invalid admin token".to_string(),
        };

        let body = Json(json!({
            "error": message,
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
