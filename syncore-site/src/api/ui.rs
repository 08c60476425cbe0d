//! UI serving routes
//!
//! Serves the embedded HTML/JS page shells for the marketing site

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

const INDEX_HTML: &str = include_str!("../ui/index.html");
const CONTACT_HTML: &str = include_str!("../ui/contact.html");
const APP_JS: &str = include_str!("../ui/app.js");

/// GET /
///
/// Serves the home page shell
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /contact
///
/// Serves the contact page shell
pub async fn serve_contact() -> Html<&'static str> {
    Html(CONTACT_HTML)
}

/// GET /static/app.js
///
/// Serves the JavaScript application
pub async fn serve_app_js() -> Response {
    (
        StatusCode::OK,
        [("content-type", "application/javascript")],
        APP_JS,
    )
        .into_response()
}
