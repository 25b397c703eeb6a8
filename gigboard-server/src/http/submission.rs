//! Outcomes of form submissions and deletes
//!
//! Handlers for create, edit and delete never propagate a database error.
//! They answer with a flash message and the view the client should move to.
//! Missing records send the client to `/`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::repos::DbError;
use crate::models::ValidationError;

/// Safe view for submissions that reference a missing record
pub const FALLBACK_VIEW: &str = "/";

/// Body of a create/edit response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub success: bool,
    /// Flash message for the user
    pub message: String,
    /// View to navigate to next
    pub redirect: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

/// Submission body plus status code
#[derive(Debug)]
pub struct SubmissionResponse {
    pub status: StatusCode,
    pub body: Submission,
}

impl SubmissionResponse {
    /// A new record was committed (201).
    pub fn created(message: impl Into<String>, redirect: impl Into<String>, id: i64) -> Self {
        Self::succeeded(StatusCode::CREATED, message, redirect, id)
    }

    /// An existing record was updated (200).
    pub fn saved(message: impl Into<String>, redirect: impl Into<String>, id: i64) -> Self {
        Self::succeeded(StatusCode::OK, message, redirect, id)
    }

    /// The form failed validation; nothing was written (400).
    pub fn rejected(error: &ValidationError, redirect: impl Into<String>) -> Self {
        tracing::warn!(%error, "submission rejected");
        Self::unsuccessful(StatusCode::BAD_REQUEST, error.to_string(), redirect.into())
    }

    /// The request body could not be read as a form (400).
    pub fn malformed(reason: impl std::fmt::Display) -> Self {
        tracing::warn!(%reason, "malformed submission");
        Self::unsuccessful(
            StatusCode::BAD_REQUEST,
            format!("Invalid form submission: {}", reason),
            FALLBACK_VIEW.to_owned(),
        )
    }

    /// The transaction failed and was rolled back.
    ///
    /// `failure` describes what did not happen, e.g.
    /// `"Venue The Musical Hop could not be listed."`.
    pub fn failed(error: DbError, failure: impl AsRef<str>, redirect: impl Into<String>) -> Self {
        let failure = failure.as_ref();
        match error {
            DbError::NotFound { resource, id } => {
                tracing::warn!(resource, %id, "submission references a missing record");
                Self::unsuccessful(
                    StatusCode::NOT_FOUND,
                    format!("{} {} not found. {}", capitalize(resource), id, failure),
                    FALLBACK_VIEW.to_owned(),
                )
            }
            DbError::Sqlx(e) => {
                tracing::error!(error = %e, "transaction rolled back");
                Self::unsuccessful(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("An error occurred. {}", failure),
                    redirect.into(),
                )
            }
        }
    }

    fn succeeded(
        status: StatusCode,
        message: impl Into<String>,
        redirect: impl Into<String>,
        id: i64,
    ) -> Self {
        Self {
            status,
            body: Submission {
                success: true,
                message: message.into(),
                redirect: redirect.into(),
                id: Some(id),
            },
        }
    }

    fn unsuccessful(status: StatusCode, message: String, redirect: String) -> Self {
        Self {
            status,
            body: Submission {
                success: false,
                message,
                redirect,
                id: None,
            },
        }
    }
}

impl IntoResponse for SubmissionResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Body of a delete response: `{"delete": bool, "url": "..."}` plus the
/// flash message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deletion {
    #[serde(rename = "delete")]
    pub deleted: bool,
    #[serde(rename = "url")]
    pub redirect_target: String,
    pub message: String,
}

/// Deletion body plus status code
#[derive(Debug)]
pub struct DeletionResponse {
    pub status: StatusCode,
    pub body: Deletion,
}

impl DeletionResponse {
    /// The record and its dependents are gone (200).
    pub fn deleted(message: impl Into<String>, redirect_target: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: Deletion {
                deleted: true,
                redirect_target: redirect_target.into(),
                message: message.into(),
            },
        }
    }

    /// Nothing was deleted.
    ///
    /// A missing record answers 404 and points at `listing`; any other
    /// failure answers 500 and points back at `current`.
    pub fn failed(
        error: DbError,
        failure: impl Into<String>,
        listing: impl Into<String>,
        current: impl Into<String>,
    ) -> Self {
        let (status, redirect_target) = match &error {
            DbError::NotFound { resource, id } => {
                tracing::warn!(resource, %id, "delete of a missing record");
                (StatusCode::NOT_FOUND, listing.into())
            }
            DbError::Sqlx(e) => {
                tracing::error!(error = %e, "delete rolled back");
                (StatusCode::INTERNAL_SERVER_ERROR, current.into())
            }
        };

        Self {
            status,
            body: Deletion {
                deleted: false,
                redirect_target,
                message: format!("An error occurred. {}", failure.into()),
            },
        }
    }
}

impl IntoResponse for DeletionResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
