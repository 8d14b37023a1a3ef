//! Schema bootstrap.
//!
//! The unique index on (expert, date, time slot) is the second safety net
//! behind the conditional slot update: any duplicate tuple that slips past
//! the flip is rejected at insert time.

use crate::backend_error;
use slotwise_core::store::StoreError;
use sqlx::PgPool;

/// Schema DDL, idempotent.
const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS experts (
    id          UUID PRIMARY KEY,
    name        TEXT NOT NULL,
    category    TEXT NOT NULL,
    experience  INT NOT NULL,
    rating      DOUBLE PRECISION NOT NULL DEFAULT 4.0,
    bio         TEXT NOT NULL,
    image_url   TEXT NOT NULL DEFAULT '',
    hourly_rate BIGINT NOT NULL DEFAULT 500,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS slots (
    id         UUID PRIMARY KEY,
    expert_id  UUID NOT NULL REFERENCES experts(id) ON DELETE CASCADE,
    date       TEXT NOT NULL,
    time_label TEXT NOT NULL,
    is_booked  BOOLEAN NOT NULL DEFAULT FALSE,
    ordinal    INT NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_slots_expert ON slots (expert_id, ordinal);

CREATE TABLE IF NOT EXISTS bookings (
    id          UUID PRIMARY KEY,
    expert_id   UUID NOT NULL REFERENCES experts(id),
    slot_id     UUID NOT NULL,
    expert_name TEXT NOT NULL,
    user_name   TEXT NOT NULL,
    email       TEXT NOT NULL,
    phone       TEXT NOT NULL,
    date        TEXT NOT NULL,
    time_slot   TEXT NOT NULL,
    notes       TEXT NOT NULL DEFAULT '',
    status      TEXT NOT NULL DEFAULT 'pending',
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_bookings_email ON bookings (email);

CREATE UNIQUE INDEX IF NOT EXISTS idx_bookings_expert_date_time
    ON bookings (expert_id, date, time_slot);
";

/// Create tables and indexes if they do not exist yet.
///
/// # Errors
///
/// Returns [`StoreError::Backend`] when DDL execution fails.
pub async fn init(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .map_err(backend_error)?;
    tracing::info!("Database schema ready");
    Ok(())
}
