//! # Slotwise Core
//!
//! Domain model and reservation logic for the Slotwise expert-booking
//! marketplace.
//!
//! The crate is the functional center of the system: it owns the entities
//! ([`expert::Expert`], [`expert::Slot`], [`booking::Booking`]), the storage
//! seams ([`store::ExpertStore`], [`store::BookingStore`]), the notification
//! seam ([`notifier::ChangeNotifier`]), and the
//! [`reservation::ReservationCoordinator`] that ties them together.
//!
//! # Concurrency model
//!
//! Multiple reservation requests may arrive concurrently; no global lock is
//! taken and nothing here blocks. Correctness rests entirely on the storage
//! layer's atomic conditional update, "flip this slot to booked only if it
//! is currently unbooked and belongs to this expert", expressed by
//! [`store::ExpertStore::reserve_slot`]. Everything else is ordinary
//! sequential logic.
//!
//! # Example
//!
//! ```ignore
//! use slotwise_core::reservation::ReservationCoordinator;
//!
//! let coordinator = ReservationCoordinator::new(experts, bookings, notifier);
//! match coordinator.reserve_slot(request).await {
//!     Ok(booking) => println!("booked: {}", booking.id),
//!     Err(BookingError::Conflict) => println!("pick another slot"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod booking;
pub mod error;
pub mod expert;
pub mod notifier;
pub mod reservation;
pub mod store;
pub mod types;
pub mod validation;

// Re-export key types for convenience
pub use booking::{Booking, NewBooking, ReservationRequest};
pub use error::BookingError;
pub use expert::{Expert, ExpertPage, ExpertQuery, Slot};
pub use notifier::{ChangeEvent, ChangeNotifier};
pub use reservation::ReservationCoordinator;
pub use store::{BookingStore, ExpertStore, StoreError};
pub use types::{BookingId, BookingStatus, ExpertCategory, ExpertId, SlotId};
