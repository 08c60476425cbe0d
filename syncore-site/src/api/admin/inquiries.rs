//! Visitor inquiry listing
//!
//! Read-only: inquiries are append-only records from the contact form.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use syncore_common::db::models::VisitorInquiry;
use syncore_common::db::visitors;

use crate::api::ApiError;
use crate::pagination::{self, PAGE_SIZE};
use crate::AppState;

/// Query parameters for the inquiry listing
#[derive(Debug, Deserialize)]
pub struct InquiryQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,

    /// Substring search over name, email, company, and service
    pub search: Option<String>,
}

fn default_page() -> i64 {
    1
}

/// Paginated inquiry listing response
#[derive(Debug, Serialize)]
pub struct InquiryListResponse {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub inquiries: Vec<VisitorInquiry>,
}

/// GET /api/admin/inquiries?page=N&search=term
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<InquiryQuery>,
) -> Result<Json<InquiryListResponse>, ApiError> {
    let search = query.search.as_deref();

    // First fetch with the requested page; re-fetch only if the pagination
    // clamp moved the offset (page out of range).
    let guess_offset = (query.page.max(1) - 1) * PAGE_SIZE;
    let (total, rows) = visitors::list_inquiries(&state.db, search, PAGE_SIZE, guess_offset).await?;

    let p = pagination::calculate_pagination(total, query.page);
    let inquiries = if p.offset == guess_offset {
        rows
    } else {
        visitors::list_inquiries(&state.db, search, PAGE_SIZE, p.offset)
            .await?
            .1
    };

    Ok(Json(InquiryListResponse {
        total,
        page: p.page,
        page_size: PAGE_SIZE,
        total_pages: p.total_pages,
        inquiries,
    }))
}
