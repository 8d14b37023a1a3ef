//! The reservation coordinator.
//!
//! Orchestrates the one correctness-critical path in the system:
//!
//! 1. validate requester fields (no storage touched on failure),
//! 2. atomically flip the slot via the store's conditional update,
//! 3. insert the booking record,
//! 4. only then broadcast the change, fire-and-forget.
//!
//! There is no in-process locking and no retry loop anywhere. The storage
//! layer's conditional update is the sole concurrency-correctness mechanism:
//! repeating a reservation against a booked slot yields a conflict, never
//! corruption, so retries are unnecessary by construction.

use crate::booking::{Booking, NewBooking, ReservationRequest};
use crate::error::BookingError;
use crate::notifier::{ChangeEvent, ChangeNotifier};
use crate::store::{BookingStore, ExpertStore, StoreError};
use crate::types::{BookingId, BookingStatus};
use crate::validation;
use std::sync::Arc;
use tracing::{debug, warn};

/// Coordinates race-safe slot reservations and booking updates.
///
/// Stores and notifier are injected as trait objects so the Postgres
/// implementations and the in-memory test doubles are interchangeable.
#[derive(Clone)]
pub struct ReservationCoordinator {
    experts: Arc<dyn ExpertStore>,
    bookings: Arc<dyn BookingStore>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl ReservationCoordinator {
    /// Create a coordinator over the given stores and notifier.
    #[must_use]
    pub fn new(
        experts: Arc<dyn ExpertStore>,
        bookings: Arc<dyn BookingStore>,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            experts,
            bookings,
            notifier,
        }
    }

    /// Attempt to reserve a slot and record the booking.
    ///
    /// Exactly one of N concurrent calls against the same unbooked slot
    /// succeeds; the rest observe [`BookingError::Conflict`]. The
    /// `slotBooked` event is published only after the booking record is
    /// durably created, and the publish outcome never affects the result.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Validation`] before any storage access,
    /// - [`BookingError::Conflict`] when the slot is already booked (or does
    ///   not exist under that expert), and when the booking insert trips the
    ///   uniqueness safety net,
    /// - [`BookingError::Storage`] for any other storage failure.
    pub async fn reserve_slot(&self, request: ReservationRequest) -> Result<Booking, BookingError> {
        // Fail fast: nothing below runs for malformed input.
        let email = validation::validate_reservation(&request)?;

        // The single indivisible operation: set is_booked only if it is
        // currently false and the slot belongs to this expert.
        let reserved = self
            .experts
            .reserve_slot(request.expert_id, request.slot_id)
            .await?;

        let Some(expert_name) = reserved else {
            debug!(
                expert_id = %request.expert_id,
                slot_id = %request.slot_id,
                "Reservation conflict: slot unavailable"
            );
            metrics::counter!("reservation.conflict").increment(1);
            return Err(BookingError::Conflict);
        };

        let new_booking = NewBooking {
            expert_id: request.expert_id,
            slot_id: request.slot_id,
            expert_name,
            user_name: request.user_name,
            email,
            phone: request.phone,
            date: request.date,
            time_slot: request.time_slot,
            notes: request.notes.unwrap_or_default(),
        };

        let booking = match self.bookings.create(new_booking).await {
            Ok(booking) => booking,
            Err(StoreError::DuplicateBooking) => {
                // Uniqueness safety net caught a race the conditional update
                // alone could not see (two slot ids mapping to the same
                // expert/date/time triple). The slot flip is not rolled
                // back; the slot stays booked with no record behind it.
                warn!(
                    expert_id = %request.expert_id,
                    slot_id = %request.slot_id,
                    "Duplicate booking tuple after slot flip; slot left booked without a record"
                );
                metrics::counter!("reservation.duplicate_tuple").increment(1);
                return Err(BookingError::Conflict);
            }
            Err(e) => return Err(e.into()),
        };

        metrics::counter!("reservation.booked").increment(1);

        // Never notify before persistence has succeeded.
        self.notifier
            .publish(ChangeEvent::SlotBooked {
                expert_id: booking.expert_id,
                slot_id: booking.slot_id,
            })
            .await;

        Ok(booking)
    }

    /// Update a booking's status and broadcast the change.
    ///
    /// The status is already a parsed [`BookingStatus`]; unrecognized
    /// strings are rejected at the edge before this is called. No
    /// transition-order enforcement beyond the three-state set.
    ///
    /// # Errors
    ///
    /// - [`BookingError::NotFound`] for an unknown booking id,
    /// - [`BookingError::Storage`] on storage failure.
    pub async fn update_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Booking, BookingError> {
        let Some(booking) = self.bookings.update_status(id, status).await? else {
            return Err(BookingError::not_found("Booking", id));
        };

        self.notifier
            .publish(ChangeEvent::BookingStatusUpdated {
                booking_id: booking.id,
                status,
            })
            .await;

        Ok(booking)
    }

    /// Fetch bookings for a requester email, newest first. The match is
    /// case-insensitive: the email is lower-cased before the lookup, and
    /// records were lower-cased on insert.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Validation`] when the email is blank,
    /// - [`BookingError::Storage`] on storage failure.
    pub async fn bookings_by_email(&self, email: &str) -> Result<Vec<Booking>, BookingError> {
        if email.trim().is_empty() {
            return Err(BookingError::validation(
                "email",
                "Email query parameter is required",
            ));
        }
        Ok(self.bookings.find_by_email(&email.to_lowercase()).await?)
    }
}
