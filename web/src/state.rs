//! Application state for Axum handlers.

use crate::broadcast::SlotBroadcaster;
use slotwise_core::reservation::ReservationCoordinator;
use slotwise_core::store::ExpertStore;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned (cheaply via Arc) for each request. The expert store appears
/// both inside the coordinator and directly, because listing and detail
/// queries bypass the reservation path entirely.
#[derive(Clone)]
pub struct AppState {
    /// Orchestrates the race-safe reservation path.
    pub coordinator: ReservationCoordinator,

    /// Direct read access for expert listing and detail queries.
    pub experts: Arc<dyn ExpertStore>,

    /// WebSocket fan-out hub; also the coordinator's notifier.
    pub broadcaster: SlotBroadcaster,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(
        coordinator: ReservationCoordinator,
        experts: Arc<dyn ExpertStore>,
        broadcaster: SlotBroadcaster,
    ) -> Self {
        Self {
            coordinator,
            experts,
            broadcaster,
        }
    }
}
