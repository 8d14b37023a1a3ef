//! Booking endpoints: reservation, lookup, status updates.

use crate::WebResult;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use slotwise_core::booking::{Booking, ReservationRequest};
use slotwise_core::types::{BookingId, BookingStatus};

/// Reserve a slot and create the booking record.
///
/// Exactly one of N concurrent requests for the same slot gets a 201; the
/// rest get 409. An unknown expert or slot id also yields 409, because the
/// conditional update cannot distinguish it from an already-booked slot.
///
/// # Endpoint
///
/// ```text
/// POST /api/bookings
/// ```
///
/// # Errors
///
/// - 400 on validation failure,
/// - 409 on conflict,
/// - 500 on storage failure.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<ReservationRequest>,
) -> WebResult<(StatusCode, Json<Booking>)> {
    let booking = state.coordinator.reserve_slot(request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Query string for `GET /api/bookings`.
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    /// Requester email; matching is case-insensitive.
    pub email: Option<String>,
}

/// List bookings for a requester email, newest first.
///
/// # Endpoint
///
/// ```text
/// GET /api/bookings?email=user@example.com
/// ```
///
/// # Errors
///
/// - 400 when the email parameter is missing or blank,
/// - 500 on storage failure.
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> WebResult<Json<Vec<Booking>>> {
    let email = params.email.unwrap_or_default();
    let bookings = state.coordinator.bookings_by_email(&email).await?;
    Ok(Json(bookings))
}

/// Body for `PATCH /api/bookings/:id/status`.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    /// One of `pending`, `confirmed`, `completed`.
    pub status: String,
}

/// Update a booking's lifecycle status.
///
/// Only membership in the three-value set is enforced; there is no
/// transition-order check.
///
/// # Endpoint
///
/// ```text
/// PATCH /api/bookings/:id/status
/// ```
///
/// # Errors
///
/// - 400 for an unrecognized status string,
/// - 404 for an unknown booking id,
/// - 500 on storage failure.
pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<BookingId>,
    Json(update): Json<StatusUpdate>,
) -> WebResult<Json<Booking>> {
    let status = BookingStatus::parse(&update.status).map_err(AppError::from)?;
    let booking = state.coordinator.update_booking_status(id, status).await?;
    Ok(Json(booking))
}
