//! Expert storage, including the atomic conditional slot update.

use crate::backend_error;
use async_trait::async_trait;
use slotwise_core::expert::{Expert, ExpertPage, ExpertQuery, Slot};
use slotwise_core::store::{ExpertStore, StoreError};
use slotwise_core::types::{ExpertCategory, ExpertId, SlotId};
use sqlx::{PgPool, Row};

/// `PostgreSQL`-backed [`ExpertStore`].
pub struct PostgresExpertStore {
    pool: PgPool,
}

impl PostgresExpertStore {
    /// Create a store over the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an expert and its slot calendar. Used by seeding.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when any insert fails.
    pub async fn insert(&self, expert: &Expert) -> Result<(), StoreError> {
        sqlx::query(
            r"
            INSERT INTO experts (id, name, category, experience, rating, bio,
                                 image_url, hourly_rate, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(expert.id.as_uuid())
        .bind(&expert.name)
        .bind(expert.category.as_str())
        .bind(expert.experience)
        .bind(expert.rating)
        .bind(&expert.bio)
        .bind(&expert.image_url)
        .bind(expert.hourly_rate)
        .bind(expert.created_at)
        .bind(expert.updated_at)
        .execute(&self.pool)
        .await
        .map_err(backend_error)?;

        for (ordinal, slot) in expert.slots.iter().enumerate() {
            #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
            // Slot calendars are small
            sqlx::query(
                r"
                INSERT INTO slots (id, expert_id, date, time_label, is_booked, ordinal)
                VALUES ($1, $2, $3, $4, $5, $6)
                ",
            )
            .bind(slot.id.as_uuid())
            .bind(expert.id.as_uuid())
            .bind(&slot.date)
            .bind(&slot.time)
            .bind(slot.is_booked)
            .bind(ordinal as i32)
            .execute(&self.pool)
            .await
            .map_err(backend_error)?;
        }

        Ok(())
    }

    fn row_to_expert(row: &sqlx::postgres::PgRow) -> Result<Expert, StoreError> {
        let category_str: String = row.get("category");
        let category = parse_category(&category_str)?;

        Ok(Expert {
            id: ExpertId::from_uuid(row.get("id")),
            name: row.get("name"),
            category,
            experience: row.get("experience"),
            rating: row.get("rating"),
            bio: row.get("bio"),
            image_url: row.get("image_url"),
            hourly_rate: row.get("hourly_rate"),
            slots: Vec::new(),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}

fn parse_category(s: &str) -> Result<ExpertCategory, StoreError> {
    ExpertCategory::parse(s)
        .map_err(|_| StoreError::Backend(format!("Unknown category in database: {s}")))
}

#[async_trait]
impl ExpertStore for PostgresExpertStore {
    async fn list(&self, query: &ExpertQuery) -> Result<ExpertPage, StoreError> {
        let search = query.search.as_deref();
        let category = query.category.map(|c| c.as_str());

        let (total,): (i64,) = sqlx::query_as(
            r"
            SELECT COUNT(*)
            FROM experts
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR category = $2)
            ",
        )
        .bind(search)
        .bind(category)
        .fetch_one(&self.pool)
        .await
        .map_err(backend_error)?;

        let rows = sqlx::query(
            r"
            SELECT id, name, category, experience, rating, bio, image_url, hourly_rate,
                   created_at, updated_at
            FROM experts
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR category = $2)
            ORDER BY rating DESC
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(search)
        .bind(category)
        .bind(i64::from(query.limit))
        .bind(i64::try_from(query.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(backend_error)?;

        let experts = rows
            .iter()
            .map(Self::row_to_expert)
            .collect::<Result<Vec<_>, _>>()?;

        #[allow(clippy::cast_sign_loss)] // COUNT(*) is never negative
        let total = total as u64;

        Ok(ExpertPage {
            experts,
            total,
            page: query.page,
            limit: query.limit,
            total_pages: total.div_ceil(u64::from(query.limit)),
        })
    }

    async fn get(&self, id: ExpertId) -> Result<Option<Expert>, StoreError> {
        let row = sqlx::query(
            r"
            SELECT id, name, category, experience, rating, bio, image_url, hourly_rate,
                   created_at, updated_at
            FROM experts
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut expert = Self::row_to_expert(&row)?;

        let slot_rows = sqlx::query(
            r"
            SELECT id, date, time_label, is_booked
            FROM slots
            WHERE expert_id = $1
            ORDER BY ordinal
            ",
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(backend_error)?;

        expert.slots = slot_rows
            .iter()
            .map(|row| Slot {
                id: SlotId::from_uuid(row.get("id")),
                date: row.get("date"),
                time: row.get("time_label"),
                is_booked: row.get("is_booked"),
            })
            .collect();

        Ok(Some(expert))
    }

    async fn reserve_slot(
        &self,
        expert_id: ExpertId,
        slot_id: SlotId,
    ) -> Result<Option<String>, StoreError> {
        // The whole double-booking prevention mechanism is this single
        // statement: the row only matches while is_booked is still false,
        // so of N concurrent executions exactly one updates a row. Never
        // split this into a SELECT followed by an UPDATE.
        let row = sqlx::query(
            r"
            UPDATE slots
            SET is_booked = TRUE
            FROM experts
            WHERE slots.id = $1
              AND slots.expert_id = $2
              AND experts.id = slots.expert_id
              AND slots.is_booked = FALSE
            RETURNING experts.name
            ",
        )
        .bind(slot_id.as_uuid())
        .bind(expert_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend_error)?;

        Ok(row.map(|r| r.get("name")))
    }
}
