//! Custom Axum extractors

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::submission::SubmissionResponse;

/// Extract a numeric record id from the path.
///
/// Ids that do not parse can never name a row, so they are rejected as
/// not found rather than as bad requests.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound {
                resource: "record",
                id: String::new(),
            })?;

        let id = parse_record_id(&raw).ok_or_else(|| ApiError::NotFound {
            resource: "record",
            id: raw.clone(),
        })?;

        Ok(Self(id))
    }
}

/// Parse a path segment as a record id; `None` if it cannot name a row.
pub fn parse_record_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

/// JSON form body whose rejection is a submission outcome instead of
/// axum's plain-text error
#[derive(Debug)]
pub struct FormJson<T>(pub T);

impl<S, T> FromRequest<S> for FormJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = SubmissionResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(malformed(rejection)),
        }
    }
}

fn malformed(rejection: JsonRejection) -> SubmissionResponse {
    SubmissionResponse::malformed(rejection.body_text())
}
