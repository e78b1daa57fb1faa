//! Request identifier validation
//!
//! Malformed identifiers are rejected here, before any statement
//! reaches the data layer.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Error, Result};

/// Lead ids: 1-100 characters of letters, digits, hyphen, underscore,
/// dot. Anything else (path separators, spaces, empty) is rejected.
static LEAD_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]{1,100}$").expect("static regex"));

/// Validate a seller id: must parse as a positive integer.
pub fn validate_seller_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| Error::Validation(format!("seller id must be a positive integer: {raw:?}")))
}

/// Validate a lead id against the allowed character pattern.
pub fn validate_lead_id(raw: &str) -> Result<&str> {
    if LEAD_ID.is_match(raw) {
        Ok(raw)
    } else {
        Err(Error::Validation(format!("malformed lead id: {raw:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seller_id_accepts_positive_integers() {
        assert_eq!(validate_seller_id("42").unwrap(), 42);
    }

    #[test]
    fn seller_id_rejects_non_numeric() {
        assert!(validate_seller_id("abc").is_err());
        assert!(validate_seller_id("4.2").is_err());
        assert!(validate_seller_id("").is_err());
    }

    #[test]
    fn seller_id_rejects_non_positive() {
        assert!(validate_seller_id("0").is_err());
        assert!(validate_seller_id("-7").is_err());
    }

    #[test]
    fn lead_id_accepts_allowed_characters() {
        assert!(validate_lead_id("L-2024.03_0042").is_ok());
        assert!(validate_lead_id("a").is_ok());
    }

    #[test]
    fn lead_id_rejects_traversal_and_specials() {
        assert!(validate_lead_id("../etc").is_err());
        assert!(validate_lead_id("id with spaces").is_err());
        assert!(validate_lead_id("").is_err());
    }

    #[test]
    fn lead_id_rejects_over_length() {
        let long = "x".repeat(101);
        assert!(validate_lead_id(&long).is_err());
        let max = "x".repeat(100);
        assert!(validate_lead_id(&max).is_ok());
    }
}
