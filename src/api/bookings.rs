//! Booking CRUD endpoints.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::db::Booking;
use crate::AppState;

use super::error::ApiError;
use super::extract::{BookingBody, BookingId};

/// List all bookings, newest first
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let bookings = Booking::list(&state.db).await?;
    Ok(Json(bookings))
}

/// Get a single booking by ID
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    BookingId(id): BookingId,
) -> Result<Json<Booking>, ApiError> {
    let booking = Booking::find(&state.db, id)
        .await?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(booking))
}

/// Create a new booking
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    BookingBody(input): BookingBody,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let booking = Booking::insert(&state.db, &input).await?;

    tracing::info!(booking_id = booking.id, "Created booking");

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Replace every mutable field of a booking
pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    BookingId(id): BookingId,
    BookingBody(input): BookingBody,
) -> Result<Json<Booking>, ApiError> {
    let booking = Booking::replace(&state.db, id, &input)
        .await?
        .ok_or_else(ApiError::not_found)?;

    tracing::info!(booking_id = id, "Updated booking");

    Ok(Json(booking))
}

/// Delete a booking
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    BookingId(id): BookingId,
) -> Result<StatusCode, ApiError> {
    if !Booking::delete(&state.db, id).await? {
        return Err(ApiError::not_found());
    }

    tracing::info!(booking_id = id, "Deleted booking");

    Ok(StatusCode::NO_CONTENT)
}
