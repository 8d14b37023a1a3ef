//! Change-notification contract.
//!
//! State transitions fan out to connected observers as best-effort
//! broadcasts: no persistence, no delivery guarantee, no acknowledgment.
//! The notifier is injected into the coordinator as a trait object so tests
//! can swap in a recording implementation.

use crate::types::{BookingId, BookingStatus, ExpertId, SlotId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A slot/booking state transition, in its wire shape.
///
/// Serialized with the event name as the tag, matching the client contract:
/// `slotBooked {expertId, slotId}` and
/// `bookingStatusUpdated {bookingId, status}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ChangeEvent {
    /// A slot was just reserved.
    #[serde(rename_all = "camelCase")]
    SlotBooked {
        /// Owning expert.
        expert_id: ExpertId,
        /// The slot that flipped to booked.
        slot_id: SlotId,
    },
    /// A booking's status changed.
    #[serde(rename_all = "camelCase")]
    BookingStatusUpdated {
        /// The booking that changed.
        booking_id: BookingId,
        /// Its new status.
        status: BookingStatus,
    },
}

impl ChangeEvent {
    /// Wire name of the event.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SlotBooked { .. } => "slotBooked",
            Self::BookingStatusUpdated { .. } => "bookingStatusUpdated",
        }
    }

    /// Expert-scoped topic this event belongs to, when it has one.
    ///
    /// Both current events broadcast globally; the topic exists so
    /// narrowing delivery later is not a breaking change.
    #[must_use]
    pub fn topic(&self) -> Option<String> {
        match self {
            Self::SlotBooked { expert_id, .. } => Some(expert_topic(*expert_id)),
            Self::BookingStatusUpdated { .. } => None,
        }
    }
}

/// Topic name for an expert-scoped subscription.
#[must_use]
pub fn expert_topic(expert_id: ExpertId) -> String {
    format!("expert_{expert_id}")
}

/// Best-effort broadcast of state transitions to connected observers.
///
/// Failures here must never affect the caller's transactional outcome;
/// implementations swallow delivery problems and at most log them.
#[async_trait]
pub trait ChangeNotifier: Send + Sync {
    /// Fan the event out to every currently connected subscriber.
    async fn publish(&self, event: ChangeEvent);
}
