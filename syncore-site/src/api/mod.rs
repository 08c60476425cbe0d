//! HTTP API handlers for syncore-site

pub mod admin;
pub mod auth;
pub mod contact;
pub mod error;
pub mod health;
pub mod home;
pub mod ui;

pub use auth::admin_auth_middleware;
pub use contact::submit_contact;
pub use error::ApiError;
pub use health::health_routes;
pub use home::home_aggregate;
pub use ui::{serve_app_js, serve_contact, serve_index};
