//! Show pages: index and create

use askama::Template;
use axum::extract::{RawForm, State};
use axum::response::{Html, Redirect};
use axum::routing::get;
use axum::Router;

use crate::db::ShowRepo;
use crate::http::error::PageError;
use crate::http::forms::FormData;
use crate::models::NewShow;
use crate::state::AppState;
use crate::views::{ShowFormTemplate, ShowsTemplate};

/// GET /shows - all shows, newest start time first
async fn list_shows(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let shows = ShowRepo::new(state.pool())
        .list()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Html(ShowsTemplate { shows }.render()?))
}

/// GET /shows/create - empty form
async fn new_show_form() -> Result<Html<String>, PageError> {
    Ok(Html(ShowFormTemplate.render()?))
}

/// POST /shows/create - validate, insert, redirect to the listing
async fn create_show(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> Result<Redirect, PageError> {
    let show = NewShow::validate(FormData::parse(&body).show_input())?;
    let id = ShowRepo::new(state.pool()).insert(&show).await?;
    tracing::info!(
        show_id = id,
        venue_id = show.venue_id,
        artist_id = show.artist_id,
        "show listed"
    );
    Ok(Redirect::to("/shows"))
}

/// Show routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(new_show_form).post(create_show))
}
