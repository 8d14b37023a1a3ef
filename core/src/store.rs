//! Storage traits for experts and bookings.
//!
//! The whole concurrency story of the system rests on one contract here:
//! [`ExpertStore::reserve_slot`] must be a single indivisible
//! check-and-set at the storage layer. Implementations must never realize it
//! as a read followed by a write from application code; that reopens the
//! race the operation exists to close.

use crate::booking::{Booking, NewBooking};
use crate::expert::{Expert, ExpertPage, ExpertQuery};
use crate::types::{BookingId, BookingStatus, ExpertId, SlotId};
use async_trait::async_trait;
use thiserror::Error;

/// Errors from the storage layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The booking uniqueness constraint on (expert, date, time slot) was
    /// violated. Distinguished so callers can report a conflict instead of
    /// an internal error.
    #[error("A booking already exists for this expert, date and time slot")]
    DuplicateBooking,

    /// Any other backend failure (connection, query, serialization).
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Read and conditional-write access to experts and their slots.
#[async_trait]
pub trait ExpertStore: Send + Sync {
    /// List experts matching a query, slots omitted, sorted by rating
    /// descending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on storage failure.
    async fn list(&self, query: &ExpertQuery) -> Result<ExpertPage, StoreError>;

    /// Fetch one expert with its full slot calendar.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on storage failure.
    async fn get(&self, id: ExpertId) -> Result<Option<Expert>, StoreError>;

    /// Atomically flip the slot's `is_booked` flag from `false` to `true`,
    /// but only if the slot currently belongs to `expert_id` and is not yet
    /// booked.
    ///
    /// Returns the expert's display name when the precondition held, or
    /// `None` when no slot matched, which collapses "already booked" and
    /// "no such slot under that expert" into one outcome. For N concurrent
    /// calls against the same unbooked slot, exactly one receives `Some`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on storage failure (a precondition
    /// miss is `Ok(None)`, not an error).
    async fn reserve_slot(
        &self,
        expert_id: ExpertId,
        slot_id: SlotId,
    ) -> Result<Option<String>, StoreError>;
}

/// Persistence for booking records.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Insert a new booking with status `pending`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateBooking`] when the
    /// (expert, date, time slot) uniqueness index rejects the insert, and
    /// [`StoreError::Backend`] for any other failure.
    async fn create(&self, booking: NewBooking) -> Result<Booking, StoreError>;

    /// Fetch bookings for a (already lower-cased) email, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on storage failure.
    async fn find_by_email(&self, email: &str) -> Result<Vec<Booking>, StoreError>;

    /// Update a booking's status. Returns `None` if the booking id is
    /// unknown.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on storage failure.
    async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, StoreError>;
}
