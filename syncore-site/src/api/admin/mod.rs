//! Admin API: token-guarded CRUD over the content models
//!
//! Every route here is nested under /api/admin and passes through the
//! admin auth middleware. Listing endpoints return full rows including
//! inactive ones; the public aggregate filters to active content.

use axum::routing::{get, post, put};
use axum::Router;

use crate::AppState;

pub mod about;
pub mod approach;
pub mod banners;
pub mod contact_info;
pub mod inquiries;
pub mod logos;
pub mod metrics;
pub mod results;
pub mod services;
pub mod social;
pub mod team;
pub mod transform;

/// Build the admin router (mounted under /api/admin)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/banners", get(banners::list).post(banners::create))
        .route("/banners/:guid", put(banners::update).delete(banners::remove))
        .route("/banners/:guid/activate", post(banners::activate))
        .route("/metrics", get(metrics::list).post(metrics::create))
        .route("/metrics/:guid", put(metrics::update).delete(metrics::remove))
        .route("/services", get(services::list).post(services::create))
        .route(
            "/services/:guid",
            put(services::update).delete(services::remove),
        )
        .route("/results", get(results::list).post(results::create))
        .route("/results/:guid", put(results::update).delete(results::remove))
        .route("/logos", get(logos::list).post(logos::create))
        .route("/logos/:guid", put(logos::update).delete(logos::remove))
        .route(
            "/contact-info",
            get(contact_info::list).post(contact_info::create),
        )
        .route(
            "/contact-info/:guid",
            put(contact_info::update).delete(contact_info::remove),
        )
        .route("/team", get(team::list).post(team::create))
        .route("/team/:guid", put(team::update).delete(team::remove))
        .route("/about", get(about::list).post(about::create))
        .route("/about/:guid", put(about::update).delete(about::remove))
        .route("/about/:guid/activate", post(about::activate))
        .route("/approach", get(approach::list).post(approach::create))
        .route(
            "/approach/:guid",
            put(approach::update).delete(approach::remove),
        )
        .route("/approach/:guid/activate", post(approach::activate))
        .route(
            "/approach/:guid/steps",
            get(approach::list_steps).post(approach::create_step),
        )
        .route(
            "/steps/:guid",
            put(approach::update_step).delete(approach::remove_step),
        )
        .route("/social", get(social::list).post(social::create))
        .route("/social/:guid", put(social::update).delete(social::remove))
        .route("/transform", get(transform::list).post(transform::create))
        .route(
            "/transform/:guid",
            put(transform::update).delete(transform::remove),
        )
        .route("/transform/:guid/activate", post(transform::activate))
        .route("/inquiries", get(inquiries::list))
}
