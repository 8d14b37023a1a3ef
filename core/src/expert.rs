//! Expert and slot entities.
//!
//! A [`Slot`] is a bookable (date, time) unit owned by exactly one expert.
//! Slots live inside their expert document; they are created when the expert
//! is seeded and there is no independent deletion path.

use crate::types::{ExpertCategory, ExpertId, SlotId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bookable time slot.
///
/// Invariant: `is_booked` transitions `false` → `true` exactly once, through
/// the storage layer's conditional update. Nothing in this system transitions
/// it back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Slot identifier.
    pub id: SlotId,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Display time label, e.g. `"10:00 AM"`.
    pub time: String,
    /// Whether the slot has been claimed.
    pub is_booked: bool,
}

impl Slot {
    /// Create a fresh, unbooked slot.
    #[must_use]
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            id: SlotId::new(),
            date: date.into(),
            time: time.into(),
            is_booked: false,
        }
    }
}

/// An expert profile with its slot calendar.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expert {
    /// Expert identifier.
    pub id: ExpertId,
    /// Display name.
    pub name: String,
    /// Advertised category.
    pub category: ExpertCategory,
    /// Years of experience.
    pub experience: i32,
    /// Average rating, 1.0–5.0.
    pub rating: f64,
    /// Free-text biography.
    pub bio: String,
    /// Avatar URL (may be empty).
    pub image_url: String,
    /// Hourly rate in the marketplace currency.
    pub hourly_rate: i64,
    /// Ordered slot calendar. Empty in listing responses.
    pub slots: Vec<Slot>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A page of experts plus pagination metadata, as returned by listings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertPage {
    /// Experts on this page (slots omitted).
    pub experts: Vec<Expert>,
    /// Total experts matching the query.
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Total number of pages.
    pub total_pages: u64,
}

/// Query parameters for expert listings.
///
/// Invariant: `page >= 1` and `limit >= 1`, upheld by both [`Self::new`]
/// and [`Default`]. `offset()` and the stores' page math rely on it.
#[derive(Clone, Debug)]
pub struct ExpertQuery {
    /// Case-insensitive name substring filter.
    pub search: Option<String>,
    /// Category filter; `None` means all categories.
    pub category: Option<ExpertCategory>,
    /// 1-based page number (default 1).
    pub page: u32,
    /// Page size (default 6).
    pub limit: u32,
}

impl ExpertQuery {
    /// Default page size used by listings.
    pub const DEFAULT_LIMIT: u32 = 6;

    /// Build a query with defaults applied: page >= 1, limit >= 1.
    #[must_use]
    pub fn new(
        search: Option<String>,
        category: Option<ExpertCategory>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Self {
        Self {
            search: search.filter(|s| !s.trim().is_empty()),
            category,
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT).max(1),
        }
    }

    /// Number of rows to skip for this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

impl Default for ExpertQuery {
    fn default() -> Self {
        Self::new(None, None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_slot_is_unbooked() {
        let slot = Slot::new("2025-06-01", "10:00 AM");
        assert!(!slot.is_booked);
    }

    #[test]
    fn query_defaults() {
        let q = ExpertQuery::new(None, None, None, None);
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, ExpertQuery::DEFAULT_LIMIT);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn default_query_upholds_the_page_and_limit_invariant() {
        let q = ExpertQuery::default();
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, ExpertQuery::DEFAULT_LIMIT);
        // Underflows in debug builds if page could ever be zero.
        assert_eq!(q.offset(), 0);
        // Page math divides by limit; a zero limit would panic here.
        assert_eq!(0u64.div_ceil(u64::from(q.limit)), 0);
    }

    #[test]
    fn explicit_zero_page_and_limit_are_clamped() {
        let q = ExpertQuery::new(None, None, Some(0), Some(0));
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 1);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn query_blank_search_is_dropped() {
        let q = ExpertQuery::new(Some("   ".to_string()), None, Some(3), Some(10));
        assert!(q.search.is_none());
        assert_eq!(q.offset(), 20);
    }
}
