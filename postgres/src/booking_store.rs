//! Booking record persistence.

use crate::backend_error;
use async_trait::async_trait;
use slotwise_core::booking::{Booking, NewBooking};
use slotwise_core::store::{BookingStore, StoreError};
use slotwise_core::types::{BookingId, BookingStatus, ExpertId, SlotId};
use sqlx::{PgPool, Row};

/// `PostgreSQL`-backed [`BookingStore`].
pub struct PostgresBookingStore {
    pool: PgPool,
}

impl PostgresBookingStore {
    /// Create a store over the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_booking(row: &sqlx::postgres::PgRow) -> Result<Booking, StoreError> {
        let status_str: String = row.get("status");
        let status = BookingStatus::parse(&status_str)
            .map_err(|_| StoreError::Backend(format!("Unknown status in database: {status_str}")))?;

        Ok(Booking {
            id: BookingId::from_uuid(row.get("id")),
            expert_id: ExpertId::from_uuid(row.get("expert_id")),
            slot_id: SlotId::from_uuid(row.get("slot_id")),
            expert_name: row.get("expert_name"),
            user_name: row.get("user_name"),
            email: row.get("email"),
            phone: row.get("phone"),
            date: row.get("date"),
            time_slot: row.get("time_slot"),
            notes: row.get("notes"),
            status,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}

#[async_trait]
impl BookingStore for PostgresBookingStore {
    async fn create(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        let id = BookingId::new();

        let row = sqlx::query(
            r"
            INSERT INTO bookings (id, expert_id, slot_id, expert_name, user_name,
                                  email, phone, date, time_slot, notes, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'pending')
            RETURNING id, expert_id, slot_id, expert_name, user_name, email, phone,
                      date, time_slot, notes, status, created_at, updated_at
            ",
        )
        .bind(id.as_uuid())
        .bind(booking.expert_id.as_uuid())
        .bind(booking.slot_id.as_uuid())
        .bind(&booking.expert_name)
        .bind(&booking.user_name)
        .bind(&booking.email)
        .bind(&booking.phone)
        .bind(&booking.date)
        .bind(&booking.time_slot)
        .bind(&booking.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // SQLSTATE 23505: the (expert, date, time_slot) index rejected
            // the tuple. Callers treat this as a conflict, not a failure.
            if e.as_database_error()
                .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
            {
                StoreError::DuplicateBooking
            } else {
                backend_error(e)
            }
        })?;

        Self::row_to_booking(&row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Booking>, StoreError> {
        let rows = sqlx::query(
            r"
            SELECT id, expert_id, slot_id, expert_name, user_name, email, phone,
                   date, time_slot, notes, status, created_at, updated_at
            FROM bookings
            WHERE email = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(backend_error)?;

        rows.iter().map(Self::row_to_booking).collect()
    }

    async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, StoreError> {
        let row = sqlx::query(
            r"
            UPDATE bookings
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, expert_id, slot_id, expert_name, user_name, email, phone,
                      date, time_slot, notes, status, created_at, updated_at
            ",
        )
        .bind(status.as_str())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend_error)?;

        row.as_ref().map(Self::row_to_booking).transpose()
    }
}
