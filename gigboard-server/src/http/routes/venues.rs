//! Venue endpoints: grouped listing, search, detail, create, edit, delete

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
use crate::db::repos::{DbError, Venue, VenueRepo, VenueShow};
use crate::http::error::ApiError;
use crate::http::extractors::{parse_record_id, FormJson, RecordId};
use crate::http::server::AppState;
use crate::http::submission::{DeletionResponse, SubmissionResponse};
use crate::models::{format_start_time, group_by_area, partition_shows, Area, VenueForm};

/// A show at the venue, seen from the venue: who plays and when
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueShowSummary {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<VenueShow> for VenueShowSummary {
    fn from(s: VenueShow) -> Self {
        Self {
            artist_id: s.artist_id,
            artist_name: s.artist_name,
            artist_image_link: s.artist_image_link,
            start_time: format_start_time(s.start_time),
        }
    }
}

/// Venue detail page
#[derive(Debug, Clone, Serialize)]
pub struct VenueDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueShowSummary>,
    pub upcoming_shows: Vec<VenueShowSummary>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenueDetail {
    /// Combine the record with its shows split around `now`.
    pub fn new(venue: Venue, shows: Vec<VenueShow>, now: DateTime<Utc>) -> Self {
        let split = partition_shows(shows, now, |s| s.start_time);
        let past_shows: Vec<VenueShowSummary> = split.past.into_iter().map(Into::into).collect();
        let upcoming_shows: Vec<VenueShowSummary> =
            split.upcoming.into_iter().map(Into::into).collect();

        Self {
            id: venue.id,
            name: venue.name,
            genres: venue.genres,
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website: venue.website_link,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

impl From<Venue> for VenueForm {
    fn from(v: Venue) -> Self {
        Self {
            name: v.name,
            city: v.city,
            state: v.state,
            address: v.address,
            phone: v.phone,
            image_link: v.image_link,
            facebook_link: v.facebook_link,
            genres: v.genres,
            website_link: v.website_link,
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_description,
        }
    }
}

/// GET /venues - venues grouped by city and state
async fn list_venues(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Area>>, ApiError> {
    let rows = VenueRepo::new(&state.pool).list_by_area().await?;
    Ok(Json(group_by_area(rows)))
}

/// POST /venues/search - case-insensitive partial name match
async fn search_venues(
    State(state): State<Arc<AppState>>,
    Json(form): Json<SearchForm>,
) -> Result<Json<SearchResponse>, ApiError> {
    let term = form.term()?;
    let matches = VenueRepo::new(&state.pool).search(term).await?;

    Ok(Json(SearchResponse {
        search_term: term.to_owned(),
        results: matches.into(),
    }))
}

/// GET /venues/{id}
async fn show_venue(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<VenueDetail>, ApiError> {
    let repo = VenueRepo::new(&state.pool);
    let venue = repo.get(id).await?;
    let shows = repo.shows(id).await?;

    Ok(Json(VenueDetail::new(venue, shows, Utc::now())))
}

/// GET /venues/create - blank form
async fn new_venue() -> Json<VenueForm> {
    Json(VenueForm::default())
}

/// POST /venues/create
async fn create_venue(
    State(state): State<Arc<AppState>>,
    FormJson(form): FormJson<VenueForm>,
) -> SubmissionResponse {
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(e) => return SubmissionResponse::rejected(&e, "/venues/create"),
    };

    match VenueRepo::new(&state.pool).create(&fields).await {
        Ok(venue) => {
            tracing::info!(id = venue.id, name = %venue.name, "venue listed");
            SubmissionResponse::created(
                format!("Venue {} was successfully listed!", venue.name),
                "/",
                venue.id,
            )
        }
        Err(e) => SubmissionResponse::failed(
            e,
            format!("Venue {} could not be listed.", fields.name),
            "/venues/create",
        ),
    }
}

/// GET /venues/{id}/edit - form pre-filled from the record
async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Response, ApiError> {
    match VenueRepo::new(&state.pool).get(id).await {
        Ok(venue) => Ok(Json(EditView {
            id,
            form: VenueForm::from(venue),
        })
        .into_response()),
        Err(DbError::NotFound { .. }) => Ok(Redirect::to("/").into_response()),
        Err(e) => Err(e.into()),
    }
}

/// POST /venues/{id}/edit - overwrite every mutable field
async fn edit_venue(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    FormJson(form): FormJson<VenueForm>,
) -> SubmissionResponse {
    let form_view = format!("/venues/{}/edit", id);
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(e) => return SubmissionResponse::rejected(&e, form_view),
    };

    match VenueRepo::new(&state.pool).update(id, &fields).await {
        Ok(venue) => {
            tracing::info!(id, name = %venue.name, "venue edited");
            SubmissionResponse::saved(
                format!("Venue {} was successfully edited!", venue.name),
                format!("/venues/{}", id),
                id,
            )
        }
        Err(e) => SubmissionResponse::failed(
            e,
            format!("Venue {} could not be edited.", fields.name),
            form_view,
        ),
    }
}

/// DELETE /venues/{id} - removes the venue and its shows
async fn delete_venue(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
) -> DeletionResponse {
    let result = match parse_record_id(&raw) {
        Some(id) => VenueRepo::new(&state.pool).delete(id).await,
        None => Err(DbError::NotFound {
            resource: "venue",
            id: raw.clone(),
        }),
    };

    match result {
        Ok(venue) => {
            tracing::info!(id = venue.id, name = %venue.name, "venue deleted");
            DeletionResponse::deleted(
                format!("Venue {} was successfully deleted!", venue.name),
                "/",
            )
        }
        Err(e) => DeletionResponse::failed(
            e,
            "Venue could not be deleted.",
            "/venues",
            format!("/venues/{}", raw),
        ),
    }
}

/// Venue routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(new_venue).post(create_venue))
        .route("/venues/{id}", get(show_venue).delete(delete_venue))
        .route("/venues/{id}/edit", get(edit_venue_form).post(edit_venue))
}
