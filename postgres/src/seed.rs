//! Development seed data.
//!
//! Gives every sample expert a slot calendar covering the next seven days
//! at nine fixed time labels, all unbooked.

use crate::expert_store::PostgresExpertStore;
use crate::backend_error;
use chrono::{Days, Utc};
use slotwise_core::expert::{Expert, Slot};
use slotwise_core::store::StoreError;
use slotwise_core::types::{ExpertCategory, ExpertId};
use sqlx::PgPool;

/// Daily time labels offered by every seeded expert.
const TIME_LABELS: [&str; 9] = [
    "09:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "02:00 PM", "03:00 PM", "04:00 PM", "05:00 PM",
    "06:00 PM",
];

/// Number of days of availability to generate.
const SEED_DAYS: u64 = 7;

/// Generate an unbooked slot calendar starting today.
#[must_use]
pub fn generate_slots() -> Vec<Slot> {
    let today = Utc::now().date_naive();
    let mut slots = Vec::with_capacity(TIME_LABELS.len() * SEED_DAYS as usize);

    for day in 0..SEED_DAYS {
        let date = today
            .checked_add_days(Days::new(day))
            .unwrap_or(today)
            .format("%Y-%m-%d")
            .to_string();
        for time in TIME_LABELS {
            slots.push(Slot::new(date.clone(), time));
        }
    }
    slots
}

fn expert(
    name: &str,
    category: ExpertCategory,
    experience: i32,
    rating: f64,
    bio: &str,
    hourly_rate: i64,
) -> Expert {
    let now = Utc::now();
    Expert {
        id: ExpertId::new(),
        name: name.to_string(),
        category,
        experience,
        rating,
        bio: bio.to_string(),
        image_url: format!(
            "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
            name.replace(' ', "")
        ),
        hourly_rate,
        slots: generate_slots(),
        created_at: now,
        updated_at: now,
    }
}

/// Sample marketplace experts, one per featured category.
#[must_use]
pub fn sample_experts() -> Vec<Expert> {
    vec![
        expert(
            "Dr. Kavita Iyer",
            ExpertCategory::Technology,
            14,
            4.9,
            "Distributed-systems architect and former platform lead. Helps teams \
             design for scale and mentors engineers on systems thinking.",
            2400,
        ),
        expert(
            "Rohan Deshmukh",
            ExpertCategory::Business,
            11,
            4.8,
            "Two-time founder with one exit. Advises early-stage startups on \
             strategy, hiring, and fundraising.",
            2000,
        ),
        expert(
            "Meera Nair",
            ExpertCategory::Design,
            9,
            4.7,
            "Product designer behind several consumer apps. Runs portfolio \
             reviews and design-system workshops.",
            1700,
        ),
        expert(
            "Arjun Bhatt",
            ExpertCategory::Marketing,
            8,
            4.6,
            "Growth marketer focused on organic channels. Built content engines \
             that took two startups past a million monthly visits.",
            1500,
        ),
        expert(
            "Sanya Kulkarni",
            ExpertCategory::Finance,
            12,
            4.8,
            "Chartered accountant and personal-finance coach. Simplifies tax \
             planning and long-term investing for professionals.",
            1800,
        ),
        expert(
            "Dr. Nikhil Menon",
            ExpertCategory::Health,
            15,
            4.9,
            "Sports physician and nutrition consultant. Designs sustainable \
             fitness plans for desk-bound professionals.",
            2200,
        ),
    ]
}

/// Reset and reseed the database with sample experts.
///
/// Clears bookings, slots, and experts before inserting, so the seed is
/// repeatable.
///
/// # Errors
///
/// Returns [`StoreError::Backend`] when any statement fails.
pub async fn run(pool: &PgPool) -> Result<usize, StoreError> {
    sqlx::raw_sql("TRUNCATE bookings, slots, experts")
        .execute(pool)
        .await
        .map_err(backend_error)?;

    let store = PostgresExpertStore::new(pool.clone());
    let experts = sample_experts();
    for expert in &experts {
        store.insert(expert).await?;
    }

    tracing::info!(count = experts.len(), "Seeded sample experts");
    Ok(experts.len())
}
