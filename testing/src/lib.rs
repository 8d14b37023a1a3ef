//! # Slotwise Testing
//!
//! Test doubles for the Slotwise booking core.
//!
//! This crate provides:
//! - In-memory implementations of the storage traits, honoring the same
//!   contracts as the Postgres stores (indivisible conditional slot flip,
//!   booking uniqueness constraint)
//! - A recording [`ChangeNotifier`](slotwise_core::ChangeNotifier)
//! - Builders for seeded test experts
//!
//! The behavioral properties of the reservation protocol (at-most-one
//! winner, idempotent conflict, validation before side effects, notification
//! ordering) are exercised in this crate's `tests/` directory.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod notifier;
pub mod stores;

pub use notifier::RecordingNotifier;
pub use stores::{InMemoryBookingStore, InMemoryExpertStore};

/// Builders for test data.
pub mod helpers {
    use chrono::Utc;
    use slotwise_core::expert::{Expert, Slot};
    use slotwise_core::types::{ExpertCategory, ExpertId};

    /// Build an expert with `slot_count` unbooked slots on consecutive
    /// dates, all at the same time label.
    #[must_use]
    pub fn expert_with_slots(name: &str, slot_count: usize) -> Expert {
        let now = Utc::now();
        let slots = (0..slot_count)
            .map(|i| Slot::new(format!("2025-06-{:02}", i + 1), "10:00 AM"))
            .collect();

        Expert {
            id: ExpertId::new(),
            name: name.to_string(),
            category: ExpertCategory::Technology,
            experience: 10,
            rating: 4.5,
            bio: format!("{name} is a seasoned mentor."),
            image_url: String::new(),
            hourly_rate: 1500,
            slots,
            created_at: now,
            updated_at: now,
        }
    }
}
