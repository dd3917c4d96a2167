//! Phone number and email normalization.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::EngagementError;

/// Country prefix applied to national-format numbers (leading zero).
const DEFAULT_COUNTRY_PREFIX: &str = "+254";
const COUNTRY_CODE_DIGITS: &str = "254";

lazy_static! {
    static ref E164_RE: Regex = Regex::new(r"^\+[1-9]\d{7,14}$").unwrap();
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// Normalize a phone number to E.164.
///
/// Accepted input forms:
/// - international with plus: `+254711223344`
/// - international without plus: `254711223344`
/// - national with leading zero: `0711223344`
///
/// Normalization is idempotent: the output always re-normalizes to itself.
pub fn normalize_msisdn(input: &str) -> Result<String, EngagementError> {
    let digits: String = input.chars().filter(|c| !c.is_whitespace()).collect();

    let candidate = if digits.starts_with('+') {
        digits.clone()
    } else if digits.starts_with(COUNTRY_CODE_DIGITS) && digits.len() == 12 {
        format!("+{}", digits)
    } else if digits.starts_with('0') && digits.len() == 10 {
        format!("{}{}", DEFAULT_COUNTRY_PREFIX, &digits[1..])
    } else {
        return Err(EngagementError::validation(format!(
            "invalid phone number: {}",
            input
        )));
    };

    if !E164_RE.is_match(&candidate) {
        return Err(EngagementError::validation(format!(
            "invalid phone number: {}",
            input
        )));
    }

    Ok(candidate)
}

/// Validate an email address and return it lowercased, which is the form
/// used as an OTP identifier.
pub fn validate_email(input: &str) -> Result<String, EngagementError> {
    let trimmed = input.trim();
    if !EMAIL_RE.is_match(trimmed) {
        return Err(EngagementError::validation(format!(
            "invalid email address: {}",
            input
        )));
    }
    Ok(trimmed.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PHONE: &str = "+254711223344";

    #[test]
    fn international_with_plus_passes_through() {
        assert_eq!(normalize_msisdn(TEST_PHONE).unwrap(), TEST_PHONE);
    }

    #[test]
    fn international_without_plus_gains_one() {
        assert_eq!(normalize_msisdn("254711223344").unwrap(), TEST_PHONE);
    }

    #[test]
    fn national_zero_prefix_is_rewritten() {
        assert_eq!(normalize_msisdn("0711223344").unwrap(), TEST_PHONE);
    }

    #[test]
    fn national_without_zero_prefix_is_rejected() {
        let err = normalize_msisdn("711223344").unwrap_err();
        assert_eq!(err.to_string(), "invalid phone number: 711223344");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(normalize_msisdn("1").is_err());
        assert!(normalize_msisdn("").is_err());
        assert!(normalize_msisdn("+abc").is_err());
    }

    #[test]
    fn normalization_is_idempotent() {
        for input in ["+254711223344", "254711223344", "0711223344"] {
            let once = normalize_msisdn(input).unwrap();
            let twice = normalize_msisdn(&once).unwrap();
            assert_eq!(once, twice, "normalize(normalize({})) changed", input);
        }
    }

    #[test]
    fn whitespace_is_stripped() {
        assert_eq!(normalize_msisdn(" +254 711 223 344 ").unwrap(), TEST_PHONE);
    }

    #[test]
    fn emails_are_lowercased() {
        assert_eq!(
            validate_email("User@Example.COM").unwrap(),
            "user@example.com"
        );
    }

    #[test]
    fn bad_emails_are_rejected() {
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("").is_err());
    }
}
