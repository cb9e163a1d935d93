//! Venue pages: index, search, detail, create, edit, delete

use askama::Template;
use axum::extract::{Path, RawForm, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;

use crate::db::VenueRepo;
use crate::http::error::PageError;
use crate::http::forms::FormData;
use crate::models::{group_by_city, NewVenue};
use crate::state::AppState;
use crate::views::{SearchVenuesTemplate, VenueDetailTemplate, VenueFormTemplate, VenuesTemplate};

/// GET /venues - all venues grouped by (city, state)
async fn list_venues(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let rows = VenueRepo::new(state.pool()).list(Utc::now()).await?;
    let areas = group_by_city(rows);
    Ok(Html(VenuesTemplate { areas }.render()?))
}

/// POST /venues/search - substring match on name; empty term matches all
async fn search_venues(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> Result<Html<String>, PageError> {
    let term = FormData::parse(&body).get("search_term").unwrap_or_default();
    let results = VenueRepo::new(state.pool()).search(&term, Utc::now()).await?;
    Ok(Html(
        SearchVenuesTemplate {
            term,
            count: results.len(),
            results,
        }
        .render()?,
    ))
}

/// GET /venues/{id} - detail with past and upcoming shows
async fn venue_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let repo = VenueRepo::new(state.pool());
    let now = Utc::now();

    let venue = repo.get(id).await?;
    let past_shows: Vec<_> = repo
        .past_shows(id, now)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let upcoming_shows: Vec<_> = repo
        .upcoming_shows(id, now)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Html(
        VenueDetailTemplate {
            venue: venue.into(),
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
        .render()?,
    ))
}

/// GET /venues/create - empty form
async fn new_venue_form() -> Result<Html<String>, PageError> {
    Ok(Html(VenueFormTemplate::new_venue().render()?))
}

/// POST /venues/create - validate, insert, redirect to the new detail page
async fn create_venue(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> Result<Redirect, PageError> {
    let venue = NewVenue::validate(FormData::parse(&body).venue_input())?;
    let created = VenueRepo::new(state.pool()).insert(&venue).await?;
    tracing::info!(venue_id = created.id, name = %created.name, "venue listed");
    Ok(Redirect::to(&format!("/venues/{}", created.id)))
}

/// GET /venues/{id}/edit - form prefilled from the row
async fn edit_venue_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let venue = VenueRepo::new(state.pool()).get(id).await?;
    Ok(Html(VenueFormTemplate::edit_venue(venue).render()?))
}

/// POST /venues/{id}/edit - full replace of every editable field
async fn update_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    RawForm(body): RawForm,
) -> Result<Redirect, PageError> {
    let venue = NewVenue::validate(FormData::parse(&body).venue_input())?;
    let updated = VenueRepo::new(state.pool()).update(id, &venue).await?;
    tracing::info!(venue_id = updated.id, "venue updated");
    Ok(Redirect::to(&format!("/venues/{}", updated.id)))
}

/// POST /venues/{id}/delete - delete; conflicts if shows remain
async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, PageError> {
    VenueRepo::new(state.pool()).delete(id).await?;
    tracing::info!(venue_id = id, "venue deleted");
    Ok(Redirect::to("/"))
}

/// Venue routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(new_venue_form).post(create_venue))
        .route("/venues/{id}", get(venue_detail))
        .route("/venues/{id}/edit", get(edit_venue_form).post(update_venue))
        .route("/venues/{id}/delete", post(delete_venue))
}
