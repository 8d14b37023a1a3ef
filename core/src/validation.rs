//! Requester-field validation.
//!
//! Validation runs before any storage access so malformed requests fail fast
//! without consuming a conditional-update attempt. Order: presence → email
//! format → phone format, mirroring the external contract.

use crate::booking::ReservationRequest;
use crate::error::BookingError;
use regex::Regex;
use std::sync::LazyLock;

/// Loose `local@domain.tld` pattern: something before the `@`, something
/// after it, and a dot-separated tail. No whitespace or extra `@` anywhere.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Pattern is a compile-time constant
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Validate a reservation request and return the normalized (lower-cased)
/// email on success.
///
/// # Errors
///
/// Returns [`BookingError::Validation`] naming the first offending field.
pub fn validate_reservation(request: &ReservationRequest) -> Result<String, BookingError> {
    require_present("userName", &request.user_name)?;
    require_present("email", &request.email)?;
    require_present("phone", &request.phone)?;
    require_present("date", &request.date)?;
    require_present("timeSlot", &request.time_slot)?;

    validate_email(&request.email)?;
    validate_phone(&request.phone)?;

    Ok(request.email.to_lowercase())
}

fn require_present(field: &'static str, value: &str) -> Result<(), BookingError> {
    if value.trim().is_empty() {
        return Err(BookingError::validation(
            field,
            format!("{field} is required"),
        ));
    }
    Ok(())
}

/// Check the email against the `local@domain.tld` pattern.
///
/// # Errors
///
/// Returns [`BookingError::Validation`] when the pattern does not match.
pub fn validate_email(email: &str) -> Result<(), BookingError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(BookingError::validation("email", "Invalid email address"))
    }
}

/// Check the phone is exactly 10 digits after stripping whitespace.
///
/// # Errors
///
/// Returns [`BookingError::Validation`] otherwise.
pub fn validate_phone(phone: &str) -> Result<(), BookingError> {
    let stripped: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.len() == 10 && stripped.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(BookingError::validation(
            "phone",
            "Phone must be a valid 10-digit number",
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use crate::types::{ExpertId, SlotId};

    fn request() -> ReservationRequest {
        ReservationRequest {
            expert_id: ExpertId::new(),
            slot_id: SlotId::new(),
            user_name: "Asha Rao".to_string(),
            email: "Asha.Rao@Example.com".to_string(),
            phone: "98765 43210".to_string(),
            date: "2025-06-01".to_string(),
            time_slot: "10:00 AM".to_string(),
            notes: None,
        }
    }

    #[test]
    fn valid_request_yields_normalized_email() {
        let email = validate_reservation(&request()).unwrap();
        assert_eq!(email, "asha.rao@example.com");
    }

    #[test]
    fn email_rejects_double_at_and_missing_tld() {
        assert!(validate_email("bad@@example.com").is_err());
        assert!(validate_email("bad@example").is_err());
        assert!(validate_email("has space@example.com").is_err());
        assert!(validate_email("ok@example.co.in").is_ok());
    }

    #[test]
    fn phone_allows_embedded_whitespace() {
        assert!(validate_phone("98765 43210").is_ok());
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("987654321").is_err());
        assert!(validate_phone("98765432100").is_err());
        assert!(validate_phone("98765-4321").is_err());
    }

    #[test]
    fn presence_checked_before_format() {
        let mut req = request();
        req.email = String::new();
        let err = validate_reservation(&req).unwrap_err();
        assert!(matches!(err, BookingError::Validation { field: "email", .. }));
        assert!(err.to_string().contains("required"));
    }
}
