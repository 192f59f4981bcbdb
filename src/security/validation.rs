use once_cell::sync::Lazy;
use regex::Regex;

// RFC 5322 compliant email regex (simplified but robust).
// Requires at least one dot after @ for TLD.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$"
    ).unwrap()
});

/// Static methods for input validation
pub struct Validator;

impl Validator {
    /// Validates email address format
    pub fn validate_email(email: &str) -> bool {
        if email.is_empty() || email.len() > 255 {
            return false;
        }

        // Consecutive dots are invalid but pass the regex.
        if email.contains("..") {
            return false;
        }

        EMAIL_REGEX.is_match(email)
    }

    /// Validates string length is within inclusive bounds
    pub fn validate_length(input: &str, min: usize, max: usize) -> bool {
        let len = input.len();

        len >= min && len <= max
    }
}
