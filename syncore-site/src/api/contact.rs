//! Contact form submission
//!
//! POST /api/contact accepts the urlencoded form, validates it, stores
//! the inquiry with the caller's IP, fires the best-effort notification
//! mails, and redirects back to the home page. Invalid submissions get
//! a 422 with per-field errors and nothing is persisted.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde_json::json;
use tracing::{info, warn};

use syncore_common::db::{content, visitors};
use syncore_common::db::visitors::NewInquiry;

use crate::AppState;

/// POST /api/contact
pub async fn submit_contact(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Form(form): Form<NewInquiry>,
) -> Response {
    let errors = form.validate();
    if !errors.is_empty() {
        let body = Json(json!({ "errors": errors }));
        return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
    }

    let ip = client_ip(&headers, addr);

    let stored = match visitors::insert_inquiry(&state.db, &form, Some(&ip)).await {
        Ok(stored) => stored,
        Err(e) => {
            warn!("Failed to store inquiry: {}", e);
            let body = Json(json!({ "error": "Could not save your request" }));
            return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
        }
    };

    info!("Stored inquiry {} from {}", stored.guid, ip);

    // Mail failures never affect the visitor's response
    let owner_email = match content::first_contact_info(&state.db).await {
        Ok(info) => info.map(|c| c.email),
        Err(e) => {
            warn!("Could not load contact info for notification: {}", e);
            None
        }
    };
    state
        .mailer
        .send_contact_emails(&stored, owner_email.as_deref())
        .await;

    Redirect::to("/?submitted=1").into_response()
}

/// Resolve the client IP: first entry of X-Forwarded-For when present,
/// otherwise the direct peer address.
fn client_ip(headers: &HeaderMap, addr: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| addr.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn addr() -> SocketAddr {
        "192.0.2.10:51000".parse().unwrap()
    }

    #[test]
    fn direct_address_without_header() {
        assert_eq!(client_ip(&HeaderMap::new(), addr()), "192.0.2.10");
    }

    #[test]
    fn forwarded_header_takes_first_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        assert_eq!(client_ip(&headers, addr()), "203.0.113.7");
    }

    #[test]
    fn blank_forwarded_header_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("  "));
        assert_eq!(client_ip(&headers, addr()), "192.0.2.10");
    }
}
