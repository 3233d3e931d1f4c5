//! Email address check for the payment form.
//!
//! The pattern is searched for anywhere in the input, so text around an
//! address-shaped substring is tolerated.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
        .expect("EMAIL_REGEX: invalid regex pattern")
});

/// Returns true if `input` contains something shaped like an email address.
///
/// # Example
///
/// ```
/// use cardform::email;
///
/// assert!(email::validate("someone@testing.com"));
/// assert!(!email::validate("someone@testing"));
/// ```
pub fn validate(input: &str) -> bool {
    EMAIL_REGEX.is_match(input)
}
