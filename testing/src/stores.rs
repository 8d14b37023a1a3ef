//! In-memory store implementations.
//!
//! These uphold the same contracts as the Postgres stores, most importantly
//! that `reserve_slot` is one indivisible check-and-set: the check and the
//! flip happen under a single lock guard, so concurrent callers observe
//! exactly the semantics the real conditional update provides.

use async_trait::async_trait;
use chrono::Utc;
use slotwise_core::booking::{Booking, NewBooking};
use slotwise_core::expert::{Expert, ExpertPage, ExpertQuery};
use slotwise_core::store::{BookingStore, ExpertStore, StoreError};
use slotwise_core::types::{BookingId, BookingStatus, ExpertId, SlotId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// In-memory [`ExpertStore`] for tests.
#[derive(Default)]
pub struct InMemoryExpertStore {
    experts: Mutex<HashMap<ExpertId, Expert>>,
    reserve_calls: AtomicUsize,
}

impl InMemoryExpertStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) an expert.
    pub async fn insert(&self, expert: Expert) {
        self.experts.lock().await.insert(expert.id, expert);
    }

    /// Number of times `reserve_slot` has been called, regardless of
    /// outcome. Lets tests assert that invalid requests never reach storage.
    #[must_use]
    pub fn reserve_call_count(&self) -> usize {
        self.reserve_calls.load(Ordering::SeqCst)
    }

    /// Current booked flag of a slot, if the slot exists.
    pub async fn slot_is_booked(&self, expert_id: ExpertId, slot_id: SlotId) -> Option<bool> {
        let experts = self.experts.lock().await;
        experts
            .get(&expert_id)?
            .slots
            .iter()
            .find(|s| s.id == slot_id)
            .map(|s| s.is_booked)
    }
}

#[async_trait]
impl ExpertStore for InMemoryExpertStore {
    async fn list(&self, query: &ExpertQuery) -> Result<ExpertPage, StoreError> {
        let experts = self.experts.lock().await;

        let mut matching: Vec<Expert> = experts
            .values()
            .filter(|e| {
                query
                    .search
                    .as_ref()
                    .is_none_or(|s| e.name.to_lowercase().contains(&s.to_lowercase()))
            })
            .filter(|e| query.category.is_none_or(|c| e.category == c))
            .cloned()
            .collect();

        matching.sort_by(|a, b| b.rating.total_cmp(&a.rating));

        let total = matching.len() as u64;
        let total_pages = total.div_ceil(u64::from(query.limit));
        let page: Vec<Expert> = matching
            .into_iter()
            .skip(usize::try_from(query.offset()).unwrap_or(usize::MAX))
            .take(query.limit as usize)
            .map(|mut e| {
                // Listings omit slots.
                e.slots = Vec::new();
                e
            })
            .collect();

        Ok(ExpertPage {
            experts: page,
            total,
            page: query.page,
            limit: query.limit,
            total_pages,
        })
    }

    async fn get(&self, id: ExpertId) -> Result<Option<Expert>, StoreError> {
        Ok(self.experts.lock().await.get(&id).cloned())
    }

    async fn reserve_slot(
        &self,
        expert_id: ExpertId,
        slot_id: SlotId,
    ) -> Result<Option<String>, StoreError> {
        self.reserve_calls.fetch_add(1, Ordering::SeqCst);

        // Check and flip under one guard; this is the indivisible operation.
        let mut experts = self.experts.lock().await;
        let Some(expert) = experts.get_mut(&expert_id) else {
            return Ok(None);
        };
        let Some(slot) = expert.slots.iter_mut().find(|s| s.id == slot_id) else {
            return Ok(None);
        };
        if slot.is_booked {
            return Ok(None);
        }
        slot.is_booked = true;
        Ok(Some(expert.name.clone()))
    }
}

/// In-memory [`BookingStore`] for tests. Enforces the same uniqueness
/// constraint on (expert, date, time slot) as the Postgres index.
#[derive(Default)]
pub struct InMemoryBookingStore {
    bookings: Mutex<Vec<Booking>>,
}

impl InMemoryBookingStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored bookings.
    pub async fn len(&self) -> usize {
        self.bookings.lock().await.len()
    }

    /// Whether the store holds no bookings.
    pub async fn is_empty(&self) -> bool {
        self.bookings.lock().await.is_empty()
    }

    /// Fetch a booking by id.
    pub async fn get(&self, id: BookingId) -> Option<Booking> {
        self.bookings.lock().await.iter().find(|b| b.id == id).cloned()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn create(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        let mut bookings = self.bookings.lock().await;

        let duplicate = bookings.iter().any(|b| {
            b.expert_id == booking.expert_id
                && b.date == booking.date
                && b.time_slot == booking.time_slot
        });
        if duplicate {
            return Err(StoreError::DuplicateBooking);
        }

        let now = Utc::now();
        let record = Booking {
            id: BookingId::new(),
            expert_id: booking.expert_id,
            slot_id: booking.slot_id,
            expert_name: booking.expert_name,
            user_name: booking.user_name,
            email: booking.email,
            phone: booking.phone,
            date: booking.date,
            time_slot: booking.time_slot,
            notes: booking.notes,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        bookings.push(record.clone());
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Booking>, StoreError> {
        let bookings = self.bookings.lock().await;
        // Insertion order is creation order; newest first means reversed.
        Ok(bookings
            .iter()
            .rev()
            .filter(|b| b.email == email)
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, StoreError> {
        let mut bookings = self.bookings.lock().await;
        let Some(booking) = bookings.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        booking.status = status;
        booking.updated_at = Utc::now();
        Ok(Some(booking.clone()))
    }
}
