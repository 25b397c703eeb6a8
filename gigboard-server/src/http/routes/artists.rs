//! Artist endpoints: flat listing, search, detail, create, edit, delete

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{EditView, SearchForm, SearchResponse};
use crate::db::repos::{Artist, ArtistName, ArtistRepo, ArtistShow, DbError};
use crate::http::error::ApiError;
use crate::http::extractors::{parse_record_id, FormJson, RecordId};
use crate::http::server::AppState;
use crate::http::submission::{DeletionResponse, SubmissionResponse};
use crate::models::{format_start_time, partition_shows, ArtistForm};

/// Artist listing entry
#[derive(Debug, Serialize)]
pub struct ArtistEntry {
    pub id: i64,
    pub name: String,
}

impl From<ArtistName> for ArtistEntry {
    fn from(a: ArtistName) -> Self {
        Self { id: a.id, name: a.name }
    }
}

/// A show by the artist, seen from the artist: where and when
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistShowSummary {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

impl From<ArtistShow> for ArtistShowSummary {
    fn from(s: ArtistShow) -> Self {
        Self {
            venue_id: s.venue_id,
            venue_name: s.venue_name,
            venue_image_link: s.venue_image_link,
            start_time: format_start_time(s.start_time),
        }
    }
}

/// Artist detail page
#[derive(Debug, Clone, Serialize)]
pub struct ArtistDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistShowSummary>,
    pub upcoming_shows: Vec<ArtistShowSummary>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistDetail {
    pub fn new(artist: Artist, shows: Vec<ArtistShow>, now: DateTime<Utc>) -> Self {
        let split = partition_shows(shows, now, |s| s.start_time);
        let past_shows: Vec<ArtistShowSummary> = split.past.into_iter().map(Into::into).collect();
        let upcoming_shows: Vec<ArtistShowSummary> =
            split.upcoming.into_iter().map(Into::into).collect();

        Self {
            id: artist.id,
            name: artist.name,
            genres: artist.genres,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website: artist.website_link,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

impl From<Artist> for ArtistForm {
    fn from(a: Artist) -> Self {
        Self {
            name: a.name,
            city: a.city,
            state: a.state,
            phone: a.phone,
            genres: a.genres,
            image_link: a.image_link,
            facebook_link: a.facebook_link,
            website_link: a.website_link,
            seeking_venue: a.seeking_venue,
            seeking_description: a.seeking_description,
        }
    }
}

/// GET /artists - every artist by name
async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArtistEntry>>, ApiError> {
    let artists = ArtistRepo::new(&state.pool).list().await?;
    Ok(Json(artists.into_iter().map(ArtistEntry::from).collect()))
}

/// POST /artists/search
async fn search_artists(
    State(state): State<Arc<AppState>>,
    Json(form): Json<SearchForm>,
) -> Result<Json<SearchResponse>, ApiError> {
    let term = form.term()?;
    let matches = ArtistRepo::new(&state.pool).search(term).await?;

    Ok(Json(SearchResponse {
        search_term: term.to_owned(),
        results: matches.into(),
    }))
}

/// GET /artists/{id}
async fn show_artist(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<ArtistDetail>, ApiError> {
    let repo = ArtistRepo::new(&state.pool);
    let artist = repo.get(id).await?;
    let shows = repo.shows(id).await?;

    Ok(Json(ArtistDetail::new(artist, shows, Utc::now())))
}

/// GET /artists/create
async fn new_artist() -> Json<ArtistForm> {
    Json(ArtistForm::default())
}

/// POST /artists/create
async fn create_artist(
    State(state): State<Arc<AppState>>,
    FormJson(form): FormJson<ArtistForm>,
) -> SubmissionResponse {
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(e) => return SubmissionResponse::rejected(&e, "/artists/create"),
    };

    match ArtistRepo::new(&state.pool).create(&fields).await {
        Ok(artist) => {
            tracing::info!(id = artist.id, name = %artist.name, "artist listed");
            SubmissionResponse::created(
                format!("Artist {} was successfully listed!", artist.name),
                "/",
                artist.id,
            )
        }
        Err(e) => SubmissionResponse::failed(
            e,
            format!("Artist {} could not be listed.", fields.name),
            "/artists/create",
        ),
    }
}

/// GET /artists/{id}/edit
async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Response, ApiError> {
    match ArtistRepo::new(&state.pool).get(id).await {
        Ok(artist) => Ok(Json(EditView {
            id,
            form: ArtistForm::from(artist),
        })
        .into_response()),
        Err(DbError::NotFound { .. }) => Ok(Redirect::to("/").into_response()),
        Err(e) => Err(e.into()),
    }
}

/// POST /artists/{id}/edit
async fn edit_artist(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    FormJson(form): FormJson<ArtistForm>,
) -> SubmissionResponse {
    let form_view = format!("/artists/{}/edit", id);
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(e) => return SubmissionResponse::rejected(&e, form_view),
    };

    match ArtistRepo::new(&state.pool).update(id, &fields).await {
        Ok(artist) => {
            tracing::info!(id, name = %artist.name, "artist edited");
            SubmissionResponse::saved(
                format!("Artist {} was successfully edited!", artist.name),
                format!("/artists/{}", id),
                id,
            )
        }
        Err(e) => SubmissionResponse::failed(
            e,
            format!("Artist {} could not be edited.", fields.name),
            form_view,
        ),
    }
}

/// DELETE /artists/{id} - removes the artist and their shows
async fn delete_artist(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
) -> DeletionResponse {
    let result = match parse_record_id(&raw) {
        Some(id) => ArtistRepo::new(&state.pool).delete(id).await,
        None => Err(DbError::NotFound {
            resource: "artist",
            id: raw.clone(),
        }),
    };

    match result {
        Ok(artist) => {
            tracing::info!(id = artist.id, name = %artist.name, "artist deleted");
            DeletionResponse::deleted(
                format!("Artist {} was successfully deleted!", artist.name),
                "/",
            )
        }
        Err(e) => DeletionResponse::failed(
            e,
            "Artist could not be deleted.",
            "/artists",
            format!("/artists/{}", raw),
        ),
    }
}

/// Artist routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(new_artist).post(create_artist))
        .route("/artists/{id}", get(show_artist).delete(delete_artist))
        .route("/artists/{id}/edit", get(edit_artist_form).post(edit_artist))
}
