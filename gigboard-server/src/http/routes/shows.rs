//! Show endpoints: listing, create, delete

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;

use crate::db::repos::{DbError, ShowListing, ShowRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{parse_record_id, FormJson};
use crate::http::server::AppState;
use crate::http::submission::{DeletionResponse, SubmissionResponse};
use crate::models::{format_start_time, ShowForm};

/// Show listing entry
#[derive(Debug, Serialize)]
pub struct ShowEntry {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<ShowListing> for ShowEntry {
    fn from(s: ShowListing) -> Self {
        Self {
            id: s.id,
            venue_id: s.venue_id,
            venue_name: s.venue_name,
            artist_id: s.artist_id,
            artist_name: s.artist_name,
            artist_image_link: s.artist_image_link,
            start_time: format_start_time(s.start_time),
        }
    }
}

/// GET /shows - every show by start time
async fn list_shows(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ShowEntry>>, ApiError> {
    let shows = ShowRepo::new(&state.pool).list().await?;
    Ok(Json(shows.into_iter().map(ShowEntry::from).collect()))
}

/// GET /shows/create - blank form, start time pre-filled with now
async fn new_show() -> Json<ShowForm> {
    Json(ShowForm::blank(Utc::now()))
}

/// POST /shows/create
async fn create_show(
    State(state): State<Arc<AppState>>,
    FormJson(form): FormJson<ShowForm>,
) -> SubmissionResponse {
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(e) => return SubmissionResponse::rejected(&e, "/shows/create"),
    };

    match ShowRepo::new(&state.pool).create(&fields).await {
        Ok(show) => {
            tracing::info!(
                id = show.id,
                venue_id = show.venue_id,
                artist_id = show.artist_id,
                "show listed"
            );
            SubmissionResponse::created("Show was successfully listed!", "/", show.id)
        }
        Err(e) => SubmissionResponse::failed(e, "Show could not be listed.", "/shows/create"),
    }
}

/// DELETE /shows/{id}
async fn delete_show(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
) -> DeletionResponse {
    let result = match parse_record_id(&raw) {
        Some(id) => ShowRepo::new(&state.pool).delete(id).await,
        None => Err(DbError::NotFound {
            resource: "show",
            id: raw,
        }),
    };

    match result {
        Ok(show) => {
            tracing::info!(
                id = show.id,
                venue_id = show.venue_id,
                artist_id = show.artist_id,
                "show deleted"
            );
            DeletionResponse::deleted("Show was successfully deleted!", "/shows")
        }
        Err(e) => DeletionResponse::failed(e, "Show could not be deleted.", "/shows", "/shows"),
    }
}

/// Show routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(new_show).post(create_show))
        .route("/shows/{id}", delete(delete_show))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn listing_entry_formats_start_time() {
        let entry = ShowEntry::from(ShowListing {
            id: 1,
            venue_id: 1,
            venue_name: "The Musical Hop".into(),
            artist_id: 4,
            artist_name: "Guns N Petals".into(),
            artist_image_link: None,
            start_time: Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap(),
        });
        assert_eq!(entry.start_time, "2019-05-21 21:30:00");
    }

    #[tokio::test]
    async fn blank_form_prefills_start_time() {
        let Json(form) = new_show().await;
        assert!(form.start_time.is_some());
        assert_eq!(form.venue_id, None);
    }
}
