//! Behavioral tests for the reservation protocol.
//!
//! These cover the core guarantees of the coordinator against the in-memory
//! stores: at-most-one winner under concurrency, idempotent conflicts,
//! validation before side effects, status-set enforcement, notification
//! ordering, and case-insensitive email lookups.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

use async_trait::async_trait;
use slotwise_core::booking::ReservationRequest;
use slotwise_core::error::BookingError;
use slotwise_core::notifier::{ChangeEvent, ChangeNotifier};
use slotwise_core::reservation::ReservationCoordinator;
use slotwise_core::store::{BookingStore, ExpertStore};
use slotwise_core::types::{BookingId, BookingStatus, ExpertId, SlotId};
use slotwise_testing::{helpers, InMemoryBookingStore, InMemoryExpertStore, RecordingNotifier};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct Fixture {
    experts: Arc<InMemoryExpertStore>,
    bookings: Arc<InMemoryBookingStore>,
    notifier: Arc<RecordingNotifier>,
    coordinator: ReservationCoordinator,
    expert_id: ExpertId,
    slot_ids: Vec<SlotId>,
    slot_meta: Vec<(String, String)>,
}

async fn fixture(slot_count: usize) -> Fixture {
    let experts = Arc::new(InMemoryExpertStore::new());
    let bookings = Arc::new(InMemoryBookingStore::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let expert = helpers::expert_with_slots("Asha Rao", slot_count);
    let expert_id = expert.id;
    let slot_ids: Vec<SlotId> = expert.slots.iter().map(|s| s.id).collect();
    let slot_meta: Vec<(String, String)> = expert
        .slots
        .iter()
        .map(|s| (s.date.clone(), s.time.clone()))
        .collect();
    experts.insert(expert).await;

    let coordinator = ReservationCoordinator::new(
        Arc::clone(&experts) as Arc<dyn ExpertStore>,
        Arc::clone(&bookings) as Arc<dyn BookingStore>,
        Arc::clone(&notifier) as Arc<dyn ChangeNotifier>,
    );

    Fixture {
        experts,
        bookings,
        notifier,
        coordinator,
        expert_id,
        slot_ids,
        slot_meta,
    }
}

impl Fixture {
    fn request(&self, slot_index: usize, email: &str) -> ReservationRequest {
        let (date, time) = self.slot_meta[slot_index].clone();
        ReservationRequest {
            expert_id: self.expert_id,
            slot_id: self.slot_ids[slot_index],
            user_name: "Asha Client".to_string(),
            email: email.to_string(),
            phone: "9876543210".to_string(),
            date,
            time_slot: time,
            notes: None,
        }
    }
}

#[tokio::test]
async fn at_most_one_winner_under_concurrent_attempts() {
    let fx = fixture(1).await;
    let attempts = 25;

    let mut handles = Vec::new();
    for i in 0..attempts {
        let coordinator = fx.coordinator.clone();
        let request = fx.request(0, &format!("caller{i}@example.com"));
        handles.push(tokio::spawn(
            async move { coordinator.reserve_slot(request).await },
        ));
    }

    let mut successes = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(BookingError::Conflict) => conflicts += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(successes, 1, "exactly one concurrent attempt may win");
    assert_eq!(conflicts, attempts - 1);
    assert_eq!(
        fx.experts
            .slot_is_booked(fx.expert_id, fx.slot_ids[0])
            .await,
        Some(true)
    );
    assert_eq!(fx.bookings.len().await, 1, "exactly one booking record");

    let events = fx.notifier.events().await;
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], ChangeEvent::SlotBooked { .. }));
}

#[tokio::test]
async fn repeating_a_reservation_always_conflicts() {
    let fx = fixture(1).await;

    let booking = fx
        .coordinator
        .reserve_slot(fx.request(0, "first@example.com"))
        .await
        .unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.expert_name, "Asha Rao");

    for _ in 0..3 {
        let err = fx
            .coordinator
            .reserve_slot(fx.request(0, "second@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Conflict));
    }

    assert_eq!(fx.bookings.len().await, 1, "no duplicate records");
    assert_eq!(fx.notifier.count().await, 1, "no duplicate events");
}

#[tokio::test]
async fn invalid_input_never_touches_storage() {
    let fx = fixture(1).await;

    let mut bad_email = fx.request(0, "bad@@example.com");
    let err = fx
        .coordinator
        .reserve_slot(bad_email.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation { field: "email", .. }));

    bad_email.email = "ok@example.com".to_string();
    bad_email.phone = "12345".to_string();
    let err = fx.coordinator.reserve_slot(bad_email).await.unwrap_err();
    assert!(matches!(err, BookingError::Validation { field: "phone", .. }));

    assert_eq!(fx.experts.reserve_call_count(), 0, "storage never reached");
    assert_eq!(
        fx.experts
            .slot_is_booked(fx.expert_id, fx.slot_ids[0])
            .await,
        Some(false),
        "slot unchanged"
    );
    assert!(fx.bookings.is_empty().await);
    assert_eq!(fx.notifier.count().await, 0);
}

#[tokio::test]
async fn unknown_expert_or_slot_reports_conflict() {
    let fx = fixture(1).await;

    // Wrong slot under a real expert.
    let mut request = fx.request(0, "a@example.com");
    request.slot_id = SlotId::new();
    assert!(matches!(
        fx.coordinator.reserve_slot(request).await.unwrap_err(),
        BookingError::Conflict
    ));

    // Real slot under a nonexistent expert.
    let mut request = fx.request(0, "a@example.com");
    request.expert_id = ExpertId::new();
    assert!(matches!(
        fx.coordinator.reserve_slot(request).await.unwrap_err(),
        BookingError::Conflict
    ));
}

#[tokio::test]
async fn duplicate_tuple_safety_net_reports_conflict_without_rollback() {
    // Two distinct slots sharing the same (date, time) under one expert:
    // the conditional update lets the second one through, the booking
    // uniqueness index does not.
    let experts = Arc::new(InMemoryExpertStore::new());
    let bookings = Arc::new(InMemoryBookingStore::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let mut expert = helpers::expert_with_slots("Asha Rao", 1);
    let twin = slotwise_core::expert::Slot::new(
        expert.slots[0].date.clone(),
        expert.slots[0].time.clone(),
    );
    expert.slots.push(twin.clone());
    let expert_id = expert.id;
    let first_slot = expert.slots[0].clone();
    experts.insert(expert).await;

    let coordinator = ReservationCoordinator::new(
        Arc::clone(&experts) as Arc<dyn ExpertStore>,
        Arc::clone(&bookings) as Arc<dyn BookingStore>,
        Arc::clone(&notifier) as Arc<dyn ChangeNotifier>,
    );

    let request = |slot: &slotwise_core::expert::Slot, email: &str| ReservationRequest {
        expert_id,
        slot_id: slot.id,
        user_name: "Asha Client".to_string(),
        email: email.to_string(),
        phone: "9876543210".to_string(),
        date: slot.date.clone(),
        time_slot: slot.time.clone(),
        notes: None,
    };

    coordinator
        .reserve_slot(request(&first_slot, "a@example.com"))
        .await
        .unwrap();

    let err = coordinator
        .reserve_slot(request(&twin, "b@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Conflict));

    assert_eq!(bookings.len().await, 1);
    // Documented no-rollback behavior: the twin slot stays flipped even
    // though its booking insert was rejected.
    assert_eq!(experts.slot_is_booked(expert_id, twin.id).await, Some(true));
    assert_eq!(notifier.count().await, 1, "no event for the rejected insert");
}

#[tokio::test]
async fn status_updates_enforce_the_finite_set() {
    let fx = fixture(1).await;
    let booking = fx
        .coordinator
        .reserve_slot(fx.request(0, "a@example.com"))
        .await
        .unwrap();

    // Unknown values are rejected at the parsing edge, before the
    // coordinator ever runs.
    assert!(BookingStatus::parse("archived").is_err());
    let stored = fx.bookings.get(booking.id).await.unwrap();
    assert_eq!(stored.status, BookingStatus::Pending, "record unchanged");

    // A valid transition goes through and is broadcast.
    let updated = fx
        .coordinator
        .update_booking_status(booking.id, BookingStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(updated.status, BookingStatus::Confirmed);

    let events = fx.notifier.events().await;
    assert!(matches!(
        events.last().unwrap(),
        ChangeEvent::BookingStatusUpdated {
            status: BookingStatus::Confirmed,
            ..
        }
    ));

    // Skipping confirmed is allowed; there is no monotonicity check.
    let done = fx
        .coordinator
        .update_booking_status(booking.id, BookingStatus::Completed)
        .await
        .unwrap();
    assert_eq!(done.status, BookingStatus::Completed);
}

#[tokio::test]
async fn status_update_for_unknown_booking_is_not_found() {
    let fx = fixture(1).await;
    let err = fx
        .coordinator
        .update_booking_status(BookingId::new(), BookingStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::NotFound { .. }));
    assert_eq!(fx.notifier.count().await, 0, "no event on failure");
}

#[tokio::test]
async fn email_lookup_is_case_insensitive() {
    let fx = fixture(2).await;
    fx.coordinator
        .reserve_slot(fx.request(0, "User@Example.com"))
        .await
        .unwrap();
    fx.coordinator
        .reserve_slot(fx.request(1, "user@example.com"))
        .await
        .unwrap();

    let lower = fx
        .coordinator
        .bookings_by_email("user@example.com")
        .await
        .unwrap();
    let mixed = fx
        .coordinator
        .bookings_by_email("User@Example.com")
        .await
        .unwrap();

    assert_eq!(lower.len(), 2);
    let lower_ids: Vec<_> = lower.iter().map(|b| b.id).collect();
    let mixed_ids: Vec<_> = mixed.iter().map(|b| b.id).collect();
    assert_eq!(lower_ids, mixed_ids, "identical result sets");

    // Newest first.
    assert!(lower[0].created_at >= lower[1].created_at);
}

#[tokio::test]
async fn blank_email_query_is_a_validation_error() {
    let fx = fixture(1).await;
    let err = fx.coordinator.bookings_by_email("  ").await.unwrap_err();
    assert!(matches!(err, BookingError::Validation { field: "email", .. }));
}

/// Notifier that checks, at publish time, that the booking the event refers
/// to is already queryable through the store. Proves the coordinator never
/// notifies before persistence.
struct OrderingProbe {
    bookings: Arc<InMemoryBookingStore>,
    saw_event: AtomicBool,
    booking_was_queryable: AtomicBool,
}

#[async_trait]
impl ChangeNotifier for OrderingProbe {
    async fn publish(&self, event: ChangeEvent) {
        if let ChangeEvent::SlotBooked { .. } = event {
            self.saw_event.store(true, Ordering::SeqCst);
            let queryable = self
                .bookings
                .find_by_email("probe@example.com")
                .await
                .map(|b| !b.is_empty())
                .unwrap_or(false);
            self.booking_was_queryable.store(queryable, Ordering::SeqCst);
        }
    }
}

#[tokio::test]
async fn slot_booked_event_never_precedes_the_booking_record() {
    let experts = Arc::new(InMemoryExpertStore::new());
    let bookings = Arc::new(InMemoryBookingStore::new());
    let probe = Arc::new(OrderingProbe {
        bookings: Arc::clone(&bookings),
        saw_event: AtomicBool::new(false),
        booking_was_queryable: AtomicBool::new(false),
    });

    let expert = helpers::expert_with_slots("Asha Rao", 1);
    let expert_id = expert.id;
    let slot = expert.slots[0].clone();
    experts.insert(expert).await;

    let coordinator = ReservationCoordinator::new(
        Arc::clone(&experts) as Arc<dyn ExpertStore>,
        Arc::clone(&bookings) as Arc<dyn BookingStore>,
        Arc::clone(&probe) as Arc<dyn ChangeNotifier>,
    );

    coordinator
        .reserve_slot(ReservationRequest {
            expert_id,
            slot_id: slot.id,
            user_name: "Probe".to_string(),
            email: "Probe@Example.com".to_string(),
            phone: "9876543210".to_string(),
            date: slot.date,
            time_slot: slot.time,
            notes: Some("checking ordering".to_string()),
        })
        .await
        .unwrap();

    assert!(probe.saw_event.load(Ordering::SeqCst));
    assert!(
        probe.booking_was_queryable.load(Ordering::SeqCst),
        "booking must be durably created before the event is published"
    );
}
