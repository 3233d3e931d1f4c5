//! Card number validation.
//!
//! Two flavours over the same rules:
//!
//! - [`validate`] never fails. It returns a [`ValidationVerdict`] with one
//!   flag per rule, which a form uses to decide what to highlight.
//! - [`check`] is strict. It returns the canonical [`CardNumber`] or the
//!   first [`ValidationError`] found, in the order a user should fix them.

use tracing::trace;
use zeroize::Zeroizing;

use crate::card::{CardBrand, CardNumber, MAX_CARD_DIGITS};
use crate::detect::{detect_brand, detect_brand_full, matches_any_full_pattern};
use crate::error::ValidationError;
use crate::luhn;
use crate::mask::mask_string;
use crate::rules;

/// Outcome of validating a card number.
///
/// `overall` is true iff the brand is recognized, the length matches the
/// brand, the number matches a full brand pattern, and the Luhn check passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationVerdict {
    /// Brand detected from the complete number (`Invalid` if none matched).
    pub brand: CardBrand,
    /// Number of characters left after stripping spaces.
    pub length: usize,
    /// The length equals the brand's required length.
    pub length_ok: bool,
    /// The number matches any full brand pattern.
    pub pattern_ok: bool,
    /// The Luhn checksum passes.
    pub luhn_ok: bool,
    /// Every check passed.
    pub overall: bool,
}

impl ValidationVerdict {
    /// Returns true if every check passed.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.overall
    }
}

/// Validates a card number as entered, spaces allowed.
///
/// # Example
///
/// ```
/// use cardform::{validate, CardBrand};
///
/// let verdict = validate("4012 8888 8888 1881");
/// assert!(verdict.overall);
/// assert_eq!(verdict.brand, CardBrand::Visa);
///
/// let verdict = validate("4012 8888 8888 2881");
/// assert!(!verdict.overall);
/// assert!(verdict.pattern_ok);
/// assert!(!verdict.luhn_ok);
/// ```
pub fn validate(input: &str) -> ValidationVerdict {
    let canonical: Zeroizing<String> = Zeroizing::new(input.chars().filter(|&c| c != ' ').collect());

    let brand = detect_brand_full(&canonical);
    let length = canonical.chars().count();
    let length_ok = brand.is_recognized() && length == required_length(brand);
    let pattern_ok = matches_any_full_pattern(&canonical);
    let luhn_ok = luhn::is_luhn_valid(&canonical);
    let overall = brand.is_recognized() && length_ok && pattern_ok && luhn_ok;

    trace!(
        number = %mask_string(&canonical),
        %brand,
        length,
        length_ok,
        pattern_ok,
        luhn_ok,
        overall,
        "card number validated"
    );

    ValidationVerdict {
        brand,
        length,
        length_ok,
        pattern_ok,
        luhn_ok,
        overall,
    }
}

/// Quick yes/no validation.
///
/// # Example
///
/// ```
/// use cardform::is_valid;
///
/// assert!(is_valid("378282246310005"));
/// assert!(!is_valid("378282246310015"));
/// ```
#[inline]
pub fn is_valid(input: &str) -> bool {
    validate(input).overall
}

/// Number of digits a card of this brand must have (0 for `Invalid`).
#[inline]
pub fn required_length(brand: CardBrand) -> usize {
    rules::rule(brand).number_length
}

/// Number of CVV digits a card of this brand must have (0 for `Invalid`).
#[inline]
pub fn required_cvv_length(brand: CardBrand) -> usize {
    rules::rule(brand).cvv_length
}

/// Explains why a card number as entered is not valid.
///
/// Returns `None` for a valid number. Any character other than a digit or
/// a space is reported first, before lengths are compared. "Too short" is
/// judged against the brand guessed from the first four digits, so a
/// partially typed Visa reports `TooShort` rather than `UnknownBrand`.
///
/// # Example
///
/// ```
/// use cardform::{diagnose, ValidationError};
///
/// assert_eq!(diagnose("4012 8888 8888 1881"), None);
/// assert!(diagnose("4012 8888").unwrap().is_too_short());
/// assert_eq!(diagnose("4012 8888 8888 2881"), Some(ValidationError::InvalidChecksum));
/// ```
pub fn diagnose(input: &str) -> Option<ValidationError> {
    if input.is_empty() {
        return Some(ValidationError::Empty);
    }

    if let Some((position, character)) = input
        .chars()
        .enumerate()
        .find(|&(_, c)| c != ' ' && !c.is_ascii_digit())
    {
        return Some(ValidationError::InvalidCharacter {
            position,
            character,
        });
    }

    // Only digits remain, so lengths below count digits.
    let canonical: Zeroizing<String> = Zeroizing::new(input.chars().filter(|&c| c != ' ').collect());
    if canonical.is_empty() {
        return Some(ValidationError::NoDigits);
    }

    let brand = detect_brand(&canonical);
    let length = canonical.chars().count();
    let required = required_length(brand);
    if length < required {
        return Some(ValidationError::TooShort {
            length,
            minimum: required,
        });
    }

    let verdict = validate(input);
    if verdict.overall {
        return None;
    }

    if !brand.is_recognized() {
        return Some(ValidationError::UnknownBrand);
    }
    if length != required {
        return Some(ValidationError::InvalidLengthForBrand {
            brand,
            length,
            required,
        });
    }
    if !verdict.luhn_ok {
        return Some(ValidationError::InvalidChecksum);
    }
    Some(ValidationError::UnknownBrand)
}

/// Checks a card number and returns its canonical form.
///
/// Errors are reported in this order: empty input, invalid characters,
/// more than 19 digits, unknown brand prefix, wrong length for the brand,
/// bad checksum.
///
/// # Example
///
/// ```
/// use cardform::{check, CardBrand, ValidationError};
///
/// let card = check("3782 822463 10005").unwrap();
/// assert_eq!(card.brand(), CardBrand::Amex);
/// assert_eq!(card.last_four(), "0005");
///
/// assert!(matches!(check("4012 8888"), Err(ValidationError::TooShort { .. })));
/// ```
pub fn check(input: &str) -> Result<CardNumber, ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::Empty);
    }

    let mut digits = Zeroizing::new([0u8; MAX_CARD_DIGITS]);
    let mut count = 0usize;

    for (pos, c) in input.chars().enumerate() {
        match c {
            '0'..='9' => {
                if count >= MAX_CARD_DIGITS {
                    return Err(ValidationError::TooLong {
                        length: count + 1,
                        maximum: MAX_CARD_DIGITS,
                    });
                }
                digits[count] = (c as u8) - b'0';
                count += 1;
            }
            ' ' => {}
            _ => {
                return Err(ValidationError::InvalidCharacter {
                    position: pos,
                    character: c,
                });
            }
        }
    }

    if count == 0 {
        return Err(ValidationError::NoDigits);
    }

    let canonical: Zeroizing<String> =
        Zeroizing::new(digits[..count].iter().map(|&d| (b'0' + d) as char).collect());

    let brand = detect_brand(&canonical);
    if !brand.is_recognized() {
        return Err(ValidationError::UnknownBrand);
    }

    let required = required_length(brand);
    if count < required {
        return Err(ValidationError::TooShort {
            length: count,
            minimum: required,
        });
    }
    if count > required {
        return Err(ValidationError::InvalidLengthForBrand {
            brand,
            length: count,
            required,
        });
    }

    if !luhn::validate(&digits[..count]) {
        return Err(ValidationError::InvalidChecksum);
    }

    // Prefix and full patterns come from the same table; a mismatch here
    // means the number is not a complete number of the typed brand.
    if detect_brand_full(&canonical) != brand {
        return Err(ValidationError::UnknownBrand);
    }

    Ok(CardNumber::new(brand, *digits, count as u8))
}
