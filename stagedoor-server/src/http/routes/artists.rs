//! Artist pages: index, search, detail, create, edit

use askama::Template;
use axum::extract::{Path, RawForm, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;

use crate::db::ArtistRepo;
use crate::http::error::PageError;
use crate::http::forms::FormData;
use crate::models::NewArtist;
use crate::state::AppState;
use crate::views::{
    ArtistDetailTemplate, ArtistFormTemplate, ArtistsTemplate, SearchArtistsTemplate,
};

/// GET /artists - all artists ordered by id
async fn list_artists(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let artists = ArtistRepo::new(state.pool()).list().await?;
    Ok(Html(ArtistsTemplate { artists }.render()?))
}

/// POST /artists/search - substring match on name; empty term matches all
async fn search_artists(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> Result<Html<String>, PageError> {
    let term = FormData::parse(&body).get("search_term").unwrap_or_default();
    let results = ArtistRepo::new(state.pool()).search(&term, Utc::now()).await?;
    Ok(Html(
        SearchArtistsTemplate {
            term,
            count: results.len(),
            results,
        }
        .render()?,
    ))
}

/// GET /artists/{id} - detail with past and upcoming shows
async fn artist_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let repo = ArtistRepo::new(state.pool());
    let now = Utc::now();

    let artist = repo.get(id).await?;
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
        ArtistDetailTemplate {
            artist: artist.into(),
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
        .render()?,
    ))
}

/// GET /artists/create - empty form
async fn new_artist_form() -> Result<Html<String>, PageError> {
    Ok(Html(ArtistFormTemplate::new_artist().render()?))
}

/// POST /artists/create - validate, insert, redirect to the new detail page
async fn create_artist(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> Result<Redirect, PageError> {
    let artist = NewArtist::validate(FormData::parse(&body).artist_input())?;
    let created = ArtistRepo::new(state.pool()).insert(&artist).await?;
    tracing::info!(artist_id = created.id, name = %created.name, "artist listed");
    Ok(Redirect::to(&format!("/artists/{}", created.id)))
}

/// GET /artists/{id}/edit - form prefilled from the row
async fn edit_artist_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let artist = ArtistRepo::new(state.pool()).get(id).await?;
    Ok(Html(ArtistFormTemplate::edit_artist(artist).render()?))
}

/// POST /artists/{id}/edit - full replace of every editable field
async fn update_artist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    RawForm(body): RawForm,
) -> Result<Redirect, PageError> {
    let artist = NewArtist::validate(FormData::parse(&body).artist_input())?;
    let updated = ArtistRepo::new(state.pool()).update(id, &artist).await?;
    tracing::info!(artist_id = updated.id, "artist updated");
    Ok(Redirect::to(&format!("/artists/{}", updated.id)))
}

/// Artist routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(new_artist_form).post(create_artist))
        .route("/artists/{id}", get(artist_detail))
        .route("/artists/{id}/edit", get(edit_artist_form).post(update_artist))
}
