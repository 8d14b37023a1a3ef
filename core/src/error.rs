//! Error taxonomy for the booking core.
//!
//! Conflict and validation failures are expected, routine outcomes: callers
//! surface them to the user, and nothing here logs them as failures. Only
//! [`BookingError::Storage`] represents something actually going wrong.

use crate::store::StoreError;
use thiserror::Error;

/// Errors produced by the reservation coordinator.
#[derive(Error, Debug)]
pub enum BookingError {
    /// Malformed or missing input, detected before any storage access.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The offending input field.
        field: &'static str,
        /// Human-readable detail.
        message: String,
    },

    /// The slot is already booked (or does not exist under that expert).
    ///
    /// The conditional update cannot distinguish the two cases and the
    /// coordinator does not try to; the user should pick another slot
    /// rather than retry the same request.
    #[error("This slot is already booked. Please choose another slot.")]
    Conflict,

    /// A referenced entity does not exist.
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// Resource kind ("Expert", "Booking").
        resource: &'static str,
        /// The id that was looked up.
        id: String,
    },

    /// Storage or transport failure. Diagnostic detail stays server-side.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl BookingError {
    /// Convenience constructor for validation failures.
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Convenience constructor for not-found failures.
    #[must_use]
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Whether this error is a routine, user-correctable outcome.
    #[must_use]
    pub const fn is_routine(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::Conflict | Self::NotFound { .. }
        )
    }
}
