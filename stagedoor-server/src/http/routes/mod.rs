//! Route handlers organized by resource

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

use axum::http::StatusCode;
use axum::response::Response;

use super::error::error_page;

/// Fallback for unmatched paths: rendered 404 page.
pub async fn not_found() -> Response {
    error_page(StatusCode::NOT_FOUND, "page not found".to_owned())
}
