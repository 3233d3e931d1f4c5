//! Core card types.
//!
//! This module provides the `CardBrand` enum for identifying card networks
//! and the `CardNumber` struct holding a checked, canonical card number.

use std::fmt;
use zeroize::Zeroize;

use crate::rules;

/// Card brands recognized by the payment form.
///
/// `Invalid` is the catch-all: every digit string maps to exactly one
/// variant, and a string that matches no brand rule is `Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardBrand {
    /// Visa - Prefix 4, length 16
    Visa,
    /// Mastercard - Prefix 51-55, 2221-2720, length 16
    Mastercard,
    /// American Express - Prefix 34, 37, length 15
    Amex,
    /// Discover - Prefix 6011, 65, length 16
    Discover,
    /// Diners Club - Prefix 300-305, 36, 38, length 14
    DinersClub,
    /// JCB - Prefix 2131, 1800, 35, length 16
    Jcb,
    /// No brand rule matched.
    Invalid,
}

impl CardBrand {
    /// Recognized brands, in detection priority order.
    pub const RECOGNIZED: [CardBrand; 6] = [
        Self::Visa,
        Self::Mastercard,
        Self::Amex,
        Self::Discover,
        Self::DinersClub,
        Self::Jcb,
    ];

    /// Returns true for every brand except `Invalid`.
    #[inline]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Returns a human-readable name for the card brand.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "MasterCard",
            Self::Amex => "American Express",
            Self::Discover => "Discover",
            Self::DinersClub => "Diners Club",
            Self::Jcb => "JCB",
            Self::Invalid => "Invalid",
        }
    }

    /// Returns the image name the form shows next to the card number field.
    #[inline]
    pub fn icon(&self) -> &'static str {
        rules::rule(*self).icon
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Maximum number of digits in a card number (ISO/IEC 7812-1).
pub const MAX_CARD_DIGITS: usize = 19;

/// A card number that passed `validate::check`.
///
/// Holds the canonical digits in a fixed-size array that is zeroed when
/// the struct is dropped.
///
/// # Security
///
/// - Full card number is private and only accessible via `number()`
/// - Memory is zeroed on drop using the `zeroize` crate
/// - Debug and Display output are masked
#[derive(Clone, PartialEq)]
pub struct CardNumber {
    brand: CardBrand,
    digits: [u8; MAX_CARD_DIGITS],
    digit_count: u8,
}

impl CardNumber {
    /// Creates a new CardNumber. Use `validate::check()` to create instances.
    #[inline]
    pub(crate) fn new(brand: CardBrand, digits: [u8; MAX_CARD_DIGITS], digit_count: u8) -> Self {
        Self {
            brand,
            digits,
            digit_count,
        }
    }

    /// Returns the detected card brand.
    #[inline]
    pub const fn brand(&self) -> CardBrand {
        self.brand
    }

    /// Returns the number of digits in the card number.
    #[inline]
    pub const fn length(&self) -> usize {
        self.digit_count as usize
    }

    /// Returns the last four digits as a string.
    #[inline]
    pub fn last_four(&self) -> String {
        let len = self.length();
        to_string(&self.digits[len.saturating_sub(4)..len])
    }

    /// Returns the canonical card number (digits only).
    ///
    /// # Security Warning
    ///
    /// This exposes the full card number. Never log the result; use
    /// `masked()` for display.
    #[inline]
    pub fn number(&self) -> String {
        to_string(self.digits())
    }

    /// Returns the card number with all but the last four digits masked.
    #[inline]
    pub fn masked(&self) -> String {
        crate::mask::mask_card(self)
    }

    #[inline]
    pub(crate) fn digits(&self) -> &[u8] {
        &self.digits[..self.length()]
    }
}

fn to_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| (b'0' + d) as char).collect()
}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardNumber")
            .field("brand", &self.brand)
            .field("number", &self.masked())
            .field("length", &self.digit_count)
            .finish()
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.brand, self.masked())
    }
}

impl Drop for CardNumber {
    fn drop(&mut self) {
        self.digits.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visa() -> CardNumber {
        let mut digits = [0u8; MAX_CARD_DIGITS];
        digits[..16].copy_from_slice(&[4, 0, 1, 2, 8, 8, 8, 8, 8, 8, 8, 8, 1, 8, 8, 1]);
        CardNumber::new(CardBrand::Visa, digits, 16)
    }

    #[test]
    fn test_card_brand_names() {
        assert_eq!(CardBrand::Visa.name(), "Visa");
        assert_eq!(CardBrand::Amex.name(), "American Express");
        assert_eq!(CardBrand::Mastercard.to_string(), "MasterCard");
        assert_eq!(CardBrand::Invalid.to_string(), "Invalid");
    }

    #[test]
    fn test_recognized() {
        assert!(CardBrand::RECOGNIZED.iter().all(|b| b.is_recognized()));
        assert!(!CardBrand::Invalid.is_recognized());
    }

    #[test]
    fn test_icons() {
        assert_eq!(CardBrand::Visa.icon(), "visa");
        assert_eq!(CardBrand::DinersClub.icon(), "dinersclub");
        assert_eq!(CardBrand::Invalid.icon(), "ic_credit_card_black_48dp");
    }

    #[test]
    fn test_card_number_accessors() {
        let card = visa();
        assert_eq!(card.length(), 16);
        assert_eq!(card.last_four(), "1881");
        assert_eq!(card.number(), "4012888888881881");
    }

    #[test]
    fn test_debug_is_masked() {
        let debug = format!("{:?}", visa());
        assert!(!debug.contains("4012888888881881"));
        assert!(debug.contains("****"));
    }

    #[test]
    fn test_card_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CardNumber>();
        assert_send_sync::<CardBrand>();
    }
}
