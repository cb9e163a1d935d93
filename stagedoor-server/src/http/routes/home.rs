//! Home page

use askama::Template;
use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::http::error::PageError;
use crate::state::AppState;
use crate::views::HomeTemplate;

/// GET /
async fn home() -> Result<Html<String>, PageError> {
    Ok(Html(HomeTemplate.render()?))
}

/// Home routes
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home))
}
