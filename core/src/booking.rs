//! Booking records and reservation requests.

use crate::types::{BookingId, BookingStatus, ExpertId, SlotId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A confirmed reservation of one slot.
///
/// Immutable after creation except for `status`. The expert's display name
/// and the (date, time) pair are denormalized copies taken at creation time;
/// a later expert rename does not propagate here.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Booking identifier.
    pub id: BookingId,
    /// The expert this booking is against.
    pub expert_id: ExpertId,
    /// The reserved slot.
    pub slot_id: SlotId,
    /// Expert display name at creation time.
    pub expert_name: String,
    /// Requester name.
    pub user_name: String,
    /// Requester email, stored lower-cased.
    pub email: String,
    /// Requester phone.
    pub phone: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Display time label.
    pub time_slot: String,
    /// Optional free-text note (empty when omitted).
    pub notes: String,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// The fields needed to insert a booking after a successful slot reservation.
///
/// Built by the coordinator only once the conditional slot update has
/// succeeded; the email is already normalized and the expert name already
/// resolved by then.
#[derive(Clone, Debug)]
pub struct NewBooking {
    /// The expert the slot belongs to.
    pub expert_id: ExpertId,
    /// The slot that was just reserved.
    pub slot_id: SlotId,
    /// Expert display name, copied from the updated expert document.
    pub expert_name: String,
    /// Requester name.
    pub user_name: String,
    /// Requester email, lower-cased.
    pub email: String,
    /// Requester phone.
    pub phone: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Display time label.
    pub time_slot: String,
    /// Free-text note.
    pub notes: String,
}

/// An incoming reservation request, before validation.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    /// Target expert.
    pub expert_id: ExpertId,
    /// Target slot.
    pub slot_id: SlotId,
    /// Requester name.
    pub user_name: String,
    /// Requester email.
    pub email: String,
    /// Requester phone.
    pub phone: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Display time label.
    pub time_slot: String,
    /// Optional note.
    #[serde(default)]
    pub notes: Option<String>,
}
