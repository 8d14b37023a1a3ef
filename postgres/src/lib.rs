//! `PostgreSQL` storage layer for Slotwise.
//!
//! Implements the `slotwise-core` storage traits over sqlx. The one
//! operation with real correctness weight is
//! [`PostgresExpertStore::reserve_slot`]: a single conditional `UPDATE`
//! whose predicate carries the whole double-booking prevention story.
//!
//! # Example
//!
//! ```ignore
//! use slotwise_postgres::{connect, schema, PostgresBookingStore, PostgresExpertStore};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = connect("postgres://localhost/slotwise", 10).await?;
//!     schema::init(&pool).await?;
//!     let experts = PostgresExpertStore::new(pool.clone());
//!     let bookings = PostgresBookingStore::new(pool);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod booking_store;
pub mod expert_store;
pub mod schema;
pub mod seed;

pub use booking_store::PostgresBookingStore;
pub use expert_store::PostgresExpertStore;

use slotwise_core::store::StoreError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Open a connection pool against the given database URL.
///
/// # Errors
///
/// Returns [`StoreError::Backend`] when the pool cannot be established.
pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool, StoreError> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(url)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))
}

/// Map any sqlx error to the backend variant of [`StoreError`].
pub(crate) fn backend_error(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}
