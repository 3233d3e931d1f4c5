//! Card brand detection.
//!
//! Two entry points share the rule table in [`crate::rules`]:
//!
//! - [`detect_brand`] guesses the brand from the first four digits, so the
//!   form can show a brand icon while the user is still typing.
//! - [`detect_brand_full`] classifies a complete number, requiring the
//!   brand's exact length.

use crate::rules::{self, PREFIX_DIGITS};
use crate::CardBrand;

/// Detects the card brand from the leading digits of a card number.
///
/// Only the first four characters are examined. Inputs shorter than four
/// characters return `CardBrand::Invalid`.
///
/// # Example
///
/// ```
/// use cardform::detect::detect_brand;
/// use cardform::CardBrand;
///
/// assert_eq!(detect_brand("4012"), CardBrand::Visa);
/// assert_eq!(detect_brand("2221000000000009"), CardBrand::Mastercard);
/// assert_eq!(detect_brand("378"), CardBrand::Invalid);
/// ```
#[inline]
pub fn detect_brand(digits: &str) -> CardBrand {
    match digits.get(..PREFIX_DIGITS) {
        Some(lead) => rules::match_prefix(lead),
        None => CardBrand::Invalid,
    }
}

/// Detects the card brand from a complete card number.
///
/// The whole string must match a brand's prefix followed by exactly the
/// number of digits that brand requires.
///
/// # Example
///
/// ```
/// use cardform::detect::detect_brand_full;
/// use cardform::CardBrand;
///
/// assert_eq!(detect_brand_full("378282246310005"), CardBrand::Amex);
/// // Amex prefix, one digit too many
/// assert_eq!(detect_brand_full("3782822463100055"), CardBrand::Invalid);
/// ```
#[inline]
pub fn detect_brand_full(digits: &str) -> CardBrand {
    rules::match_full(digits)
}

/// Returns true if the string is a complete number of any recognized brand.
#[inline]
pub fn matches_any_full_pattern(digits: &str) -> bool {
    detect_brand_full(digits).is_recognized()
}
