//! Identifier and enumeration types for the booking domain.
//!
//! All identifiers are UUID newtypes so an expert id can never be passed
//! where a slot id is expected.

use crate::error::BookingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for an expert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpertId(Uuid);

impl ExpertId {
    /// Creates a new random `ExpertId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an `ExpertId` from a `Uuid`.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ExpertId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a slot. Unique within its owning expert, but
/// generated globally unique so ids never collide across experts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(Uuid);

impl SlotId {
    /// Creates a new random `SlotId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `SlotId` from a `Uuid`.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SlotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a booking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(Uuid);

impl BookingId {
    /// Creates a new random `BookingId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `BookingId` from a `Uuid`.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Booking status
// ============================================================================

/// Lifecycle status of a booking.
///
/// The intended progression is `Pending` → `Confirmed` → `Completed`.
/// Only membership in this set is enforced; skipping `Confirmed` is allowed
/// and no transition-order check is performed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Newly created booking awaiting confirmation.
    #[default]
    Pending,
    /// Booking confirmed by the expert.
    Confirmed,
    /// Session took place.
    Completed,
}

impl BookingStatus {
    /// Convert status to its wire/database string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
        }
    }

    /// Parse a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Validation`] if the string is not one of
    /// `pending`, `confirmed`, `completed`.
    pub fn parse(s: &str) -> Result<Self, BookingError> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            _ => Err(BookingError::Validation {
                field: "status",
                message: "Status must be one of: pending, confirmed, completed".to_string(),
            }),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Expert category
// ============================================================================

/// Category an expert advertises under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpertCategory {
    /// Software, AI/ML, infrastructure.
    Technology,
    /// Strategy, operations, fundraising.
    Business,
    /// Product and UX design.
    Design,
    /// Growth and brand marketing.
    Marketing,
    /// Personal and corporate finance.
    Finance,
    /// Fitness, nutrition, wellness.
    Health,
    /// Teaching and exam preparation.
    Education,
    /// Contracts and compliance.
    Legal,
}

impl ExpertCategory {
    /// Convert category to its wire/database string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::Business => "Business",
            Self::Design => "Design",
            Self::Marketing => "Marketing",
            Self::Finance => "Finance",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Legal => "Legal",
        }
    }

    /// Parse a category from its string representation.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Validation`] for unknown categories.
    pub fn parse(s: &str) -> Result<Self, BookingError> {
        match s {
            "Technology" => Ok(Self::Technology),
            "Business" => Ok(Self::Business),
            "Design" => Ok(Self::Design),
            "Marketing" => Ok(Self::Marketing),
            "Finance" => Ok(Self::Finance),
            "Health" => Ok(Self::Health),
            "Education" => Ok(Self::Education),
            "Legal" => Ok(Self::Legal),
            _ => Err(BookingError::Validation {
                field: "category",
                message: format!("Unknown category: {s}"),
            }),
        }
    }
}

impl fmt::Display for ExpertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code
mod tests {
    use super::*;

    #[test]
    fn status_roundtrip() {
        for status in &[
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
        ] {
            let parsed = BookingStatus::parse(status.as_str()).expect("valid status should parse");
            assert_eq!(*status, parsed);
        }
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert!(BookingStatus::parse("archived").is_err());
        assert!(BookingStatus::parse("PENDING").is_err());
        assert!(BookingStatus::parse("").is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&BookingStatus::Confirmed).unwrap();
        assert_eq!(json, r#""confirmed""#);
    }

    #[test]
    fn category_roundtrip() {
        let parsed = ExpertCategory::parse("Design").unwrap();
        assert_eq!(parsed, ExpertCategory::Design);
        assert!(ExpertCategory::parse("Astrology").is_err());
    }

    #[test]
    fn ids_are_distinct_types() {
        let expert = ExpertId::new();
        let slot = SlotId::new();
        assert_ne!(expert.as_uuid(), slot.as_uuid());
    }
}
