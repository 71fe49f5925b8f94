//! Request and response payloads exchanged over the REST surface.
//!
//! JSON field names are camelCase. Create payloads keep every field optional
//! at the serde level so a missing field surfaces as a validation error
//! (400) from the service rather than a deserialization rejection.

pub mod activity;
pub mod customer;
pub mod order;
pub mod product;

use crate::errors::ServiceError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use validator::ValidationError;

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9(][0-9\s\-\.\(\)]{5,18}[0-9]$").expect("phone pattern is valid")
});

/// Returns the trimmed-non-empty value or a validation error carrying `message`
pub(crate) fn require_text<'a>(
    value: &'a Option<String>,
    message: &str,
) -> Result<&'a str, ServiceError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ServiceError::ValidationError(message.to_string())),
    }
}

pub(crate) fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.trim().is_empty() || PHONE_REGEX.is_match(phone.trim()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("Invalid phone number".into());
        Err(err)
    }
}

/// Email format check that lets blank values through (updates store them as given)
pub(crate) fn validate_email_or_blank(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() || validator::validate_email(email) {
        Ok(())
    } else {
        let mut err = ValidationError::new("email");
        err.message = Some("Invalid email address".into());
        Err(err)
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`)
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    #[test]
    fn phone_numbers() {
        assert!(validate_phone("1234567890").is_ok());
        assert!(validate_phone("+1 (555) 123-4567").is_ok());
        assert!(validate_phone("555.123.4567").is_ok());
        assert!(validate_phone("call me").is_err());
        assert!(validate_phone("12").is_err());
    }

    #[test]
    fn email_or_blank() {
        assert!(validate_email_or_blank("").is_ok());
        assert!(validate_email_or_blank("jane@example.com").is_ok());
        assert!(validate_email_or_blank("not-an-email").is_err());
    }

    #[test]
    fn require_text_rejects_missing() {
        assert_matches!(
            require_text(&None, "Name is required"),
            Err(ServiceError::ValidationError(msg)) if msg == "Name is required"
        );
        assert_eq!(require_text(&Some("Ada".into()), "x").unwrap(), "Ada");
    }

    proptest! {
        #[test]
        fn require_text_rejects_any_whitespace(ws in "[ \t\r\n]{0,16}") {
            prop_assert!(require_text(&Some(ws), "required").is_err());
        }
    }
}
