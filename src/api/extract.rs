//! Request extractors for the booking endpoints.
//!
//! Both extractors reject with [`ApiError`] so that a bad body or a bad id
//! segment produces the same `{"error": ...}` envelope as handler failures,
//! instead of axum's plain-text rejections.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde_json::Value;

use crate::db::BookingInput;

use super::error::ApiError;
use super::validation::validate_booking;

/// A create/update body that parsed as JSON and passed validation
#[derive(Debug)]
pub struct BookingBody(pub BookingInput);

#[async_trait]
impl<S> FromRequest<S> for BookingBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("Rejected booking body: {}", rejection.body_text());
                ApiError::malformed()
            })?;

        let input = validate_booking(&value)?;
        Ok(BookingBody(input))
    }
}

/// The `{id}` path segment of a booking URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingId(pub i64);

/// Only plain non-negative integers can name a booking
pub fn parse_booking_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[async_trait]
impl<S> FromRequestParts<S> for BookingId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::not_found())?;

        parse_booking_id(&raw)
            .map(BookingId)
            .ok_or_else(ApiError::not_found)
    }
}
