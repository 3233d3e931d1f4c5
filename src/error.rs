//! Error types for card number checks.
//!
//! `validate::validate` never fails; it reports a `ValidationVerdict`.
//! These errors come from the strict `validate::check` path and say exactly
//! which rule a card number broke, so a form can pick the right message.

use crate::CardBrand;
use std::fmt;

/// Reasons a card number was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The input string was empty.
    Empty,

    /// The input contained only spaces.
    NoDigits,

    /// An invalid character was found in the input.
    ///
    /// Only digits (0-9) and spaces are allowed.
    InvalidCharacter {
        /// The position in the input string (0-indexed, in characters).
        position: usize,
        /// The invalid character that was found.
        character: char,
    },

    /// The card number has more than 19 digits.
    TooLong {
        /// The number of digits seen when the limit was exceeded.
        length: usize,
        /// The maximum allowed digits (19).
        maximum: usize,
    },

    /// The leading digits match no known card brand.
    UnknownBrand,

    /// The card number has fewer digits than its brand requires.
    TooShort {
        /// The actual number of digits provided.
        length: usize,
        /// The number of digits the brand requires.
        minimum: usize,
    },

    /// The card number has more digits than its brand requires.
    InvalidLengthForBrand {
        /// The detected card brand.
        brand: CardBrand,
        /// The actual number of digits.
        length: usize,
        /// The number of digits the brand requires.
        required: usize,
    },

    /// The Luhn checksum validation failed.
    ///
    /// This usually indicates a typo in the card number.
    InvalidChecksum,
}

impl ValidationError {
    /// Returns true for errors caused by the number being incomplete.
    #[inline]
    pub const fn is_too_short(&self) -> bool {
        matches!(self, Self::TooShort { .. })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "card number is empty"),

            Self::NoDigits => write!(f, "card number contains no digits"),

            Self::InvalidCharacter {
                position,
                character,
            } => {
                write!(
                    f,
                    "invalid character '{}' at position {} (only digits and spaces allowed)",
                    character.escape_default(),
                    position
                )
            }

            Self::TooLong { length, maximum } => {
                write!(
                    f,
                    "card number too long: got {} digits, maximum is {}",
                    length, maximum
                )
            }

            Self::UnknownBrand => {
                write!(f, "unknown card brand - check the card number prefix")
            }

            Self::TooShort { length, minimum } => {
                write!(
                    f,
                    "card number too short: got {} digits, need {}",
                    length, minimum
                )
            }

            Self::InvalidLengthForBrand {
                brand,
                length,
                required,
            } => {
                write!(
                    f,
                    "{} cards must have {} digits, got {}",
                    brand, required, length
                )
            }

            Self::InvalidChecksum => {
                write!(f, "invalid checksum (Luhn check failed) - please verify the card number")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
