//! CVV/CVC/CID checks for the security code field.
//!
//! - American Express: 4 digits
//! - All other cards, and numbers whose brand is not known yet: 3 digits
//!
//! # Example
//!
//! ```
//! use cardform::cvv::{accepts_cvv_edit, validate_cvv_for_brand};
//! use cardform::CardBrand;
//!
//! assert!(validate_cvv_for_brand("123", CardBrand::Visa).is_ok());
//! assert!(validate_cvv_for_brand("1234", CardBrand::Amex).is_ok());
//! assert!(validate_cvv_for_brand("1234", CardBrand::Visa).is_err());
//!
//! // Typing a fourth digit is refused unless the card is an Amex
//! assert!(!accepts_cvv_edit("123", 0, "4", CardBrand::Visa));
//! assert!(accepts_cvv_edit("123", 0, "4", CardBrand::Amex));
//! ```

use std::fmt;

use zeroize::Zeroize;

use crate::CardBrand;

const MAX_CVV_DIGITS: usize = 4;

/// A security code that passed [`validate_cvv_for_brand`].
///
/// Debug and Display output are masked and the digits are zeroed on drop.
#[derive(Clone)]
pub struct ValidatedCvv {
    digits: [u8; MAX_CVV_DIGITS],
    length: u8,
}

impl ValidatedCvv {
    /// Returns the CVV as a string.
    pub fn as_str(&self) -> String {
        self.digits()
            .iter()
            .map(|&d| (b'0' + d) as char)
            .collect()
    }

    /// Returns the number of digits.
    #[inline]
    pub const fn length(&self) -> usize {
        self.length as usize
    }

    /// Returns the CVV digits as a slice.
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.length as usize]
    }
}

impl fmt::Debug for ValidatedCvv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedCvv")
            .field("value", &"***")
            .field("length", &self.length)
            .finish()
    }
}

impl fmt::Display for ValidatedCvv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", "*".repeat(self.length()))
    }
}

impl Drop for ValidatedCvv {
    fn drop(&mut self) {
        self.digits.zeroize();
    }
}

/// Reasons a security code was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CvvError {
    /// The input is empty.
    Empty,
    /// The CVV contains a non-digit character.
    InvalidCharacter {
        /// The invalid character found.
        character: char,
        /// Position of the invalid character.
        position: usize,
    },
    /// The CVV length doesn't match the card brand.
    WrongLengthForBrand {
        /// The card brand.
        brand: CardBrand,
        /// Actual length provided.
        length: usize,
        /// Expected length for this brand.
        expected: usize,
    },
}

impl CvvError {
    /// Returns true if the code has fewer digits than the brand needs.
    #[inline]
    pub const fn is_too_short(&self) -> bool {
        matches!(self, Self::WrongLengthForBrand { length, expected, .. } if *length < *expected)
    }
}

impl fmt::Display for CvvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "CVV is empty"),
            Self::InvalidCharacter { character, position } => {
                write!(
                    f,
                    "invalid character '{}' at position {}",
                    character.escape_default(),
                    position
                )
            }
            Self::WrongLengthForBrand {
                brand,
                length,
                expected,
            } => {
                write!(
                    f,
                    "{} cards require a {} digit CVV, got {}",
                    brand.name(),
                    expected,
                    length
                )
            }
        }
    }
}

impl std::error::Error for CvvError {}

/// Number of CVV digits the field accepts for a brand.
///
/// Unlike [`crate::validate::required_cvv_length`], an unrecognized brand
/// falls back to 3 so the field stays usable while the number is typed.
#[inline]
pub const fn cvv_length_for_brand(brand: CardBrand) -> usize {
    match brand {
        CardBrand::Amex => 4,
        _ => 3,
    }
}

/// Validates a security code against the brand's exact length.
///
/// # Example
///
/// ```
/// use cardform::cvv::{validate_cvv_for_brand, CvvError};
/// use cardform::CardBrand;
///
/// let cvv = validate_cvv_for_brand("007", CardBrand::Visa).unwrap();
/// assert_eq!(cvv.as_str(), "007");
///
/// let err = validate_cvv_for_brand("123", CardBrand::Amex).unwrap_err();
/// assert!(err.is_too_short());
/// ```
pub fn validate_cvv_for_brand(input: &str, brand: CardBrand) -> Result<ValidatedCvv, CvvError> {
    if input.is_empty() {
        return Err(CvvError::Empty);
    }

    let expected = cvv_length_for_brand(brand);
    let mut digits = [0u8; MAX_CVV_DIGITS];
    let mut count = 0;

    for (pos, c) in input.chars().enumerate() {
        if !c.is_ascii_digit() {
            digits.zeroize();
            return Err(CvvError::InvalidCharacter {
                character: c,
                position: pos,
            });
        }
        if count < MAX_CVV_DIGITS {
            digits[count] = (c as u8) - b'0';
        }
        count += 1;
    }

    if count != expected {
        digits.zeroize();
        return Err(CvvError::WrongLengthForBrand {
            brand,
            length: count,
            expected,
        });
    }

    Ok(ValidatedCvv {
        digits,
        length: count as u8,
    })
}

/// Checks if a string is a valid CVV for a specific card brand.
#[inline]
pub fn is_valid_cvv_for_brand(input: &str, brand: CardBrand) -> bool {
    validate_cvv_for_brand(input, brand).is_ok()
}

/// Decides whether an edit of the CVV field should be allowed.
///
/// `current` is the field before the edit, `range_len` the number of
/// characters being replaced and `replacement` the text typed or pasted.
/// Non-digit insertions are refused, as is any edit leaving more digits
/// than the brand takes. Deletions are always allowed.
pub fn accepts_cvv_edit(current: &str, range_len: usize, replacement: &str, brand: CardBrand) -> bool {
    if !replacement.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let new_length = (current.chars().count() + replacement.chars().count()).saturating_sub(range_len);
    new_length <= cvv_length_for_brand(brand)
}

/// Help text shown under the CVV field.
pub fn cvv_hint(brand: CardBrand) -> &'static str {
    match cvv_length_for_brand(brand) {
        4 => "The last 4 digits on the back of your card.",
        _ => "The last 3 digits on the back of your card.",
    }
}
