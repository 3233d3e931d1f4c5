//! Test card number generation.
//!
//! Generated numbers carry a brand prefix, the brand's exact length, and a
//! valid Luhn check digit. They are not connected to real accounts.
//!
//! # Example
//!
//! ```
//! use cardform::generate::generate_card_deterministic;
//! use cardform::CardBrand;
//!
//! let number = generate_card_deterministic(CardBrand::Visa).unwrap();
//! assert!(cardform::is_valid(&number));
//! assert!(generate_card_deterministic(CardBrand::Invalid).is_none());
//! ```

use crate::luhn;
use crate::validate::required_length;
use crate::CardBrand;

#[cfg(feature = "generate")]
use rand::Rng;

/// Prefix used when generating numbers for a brand.
pub const fn prefix_for_brand(brand: CardBrand) -> Option<&'static str> {
    match brand {
        CardBrand::Visa => Some("4"),
        CardBrand::Mastercard => Some("51"),
        CardBrand::Amex => Some("34"),
        CardBrand::Discover => Some("6011"),
        CardBrand::DinersClub => Some("36"),
        CardBrand::Jcb => Some("3528"),
        CardBrand::Invalid => None,
    }
}

/// Extends `prefix` to `length` digits with `fill`, then appends the check
/// digit. Returns `None` if the prefix has a non-digit or leaves no room.
fn complete_number(prefix: &str, length: usize, mut fill: impl FnMut() -> u8) -> Option<String> {
    if prefix.len() >= length || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut digits: Vec<u8> = prefix.bytes().map(|b| b - b'0').collect();
    while digits.len() < length - 1 {
        digits.push(fill());
    }
    digits.push(luhn::generate_check_digit(&digits));

    Some(digits.iter().map(|&d| (b'0' + d) as char).collect())
}

/// Generates a valid number for the brand, padding the prefix with zeros.
///
/// The same brand always yields the same number. Returns `None` for
/// `CardBrand::Invalid`.
pub fn generate_card_deterministic(brand: CardBrand) -> Option<String> {
    generate_card_deterministic_with_prefix(prefix_for_brand(brand)?, required_length(brand))
}

/// Generates a Luhn-valid number with a custom prefix, padded with zeros.
pub fn generate_card_deterministic_with_prefix(prefix: &str, length: usize) -> Option<String> {
    complete_number(prefix, length, || 0)
}

/// Generates a Luhn-valid number using a provided RNG.
///
/// Use a seeded RNG for reproducible fixtures.
#[cfg(feature = "generate")]
pub fn generate_card_with_rng<R: Rng>(prefix: &str, length: usize, rng: &mut R) -> Option<String> {
    complete_number(prefix, length, || rng.gen_range(0..10))
}

/// Generates a random valid number for the brand.
///
/// # Example
///
/// ```
/// use cardform::generate::generate_card;
/// use cardform::CardBrand;
///
/// let number = generate_card(CardBrand::Amex).unwrap();
/// assert_eq!(number.len(), 15);
/// assert!(cardform::is_valid(&number));
/// ```
#[cfg(feature = "generate")]
pub fn generate_card(brand: CardBrand) -> Option<String> {
    let prefix = prefix_for_brand(brand)?;
    generate_card_with_rng(prefix, required_length(brand), &mut rand::thread_rng())
}

/// Generates `count` random valid numbers for the brand.
///
/// Empty for `CardBrand::Invalid`.
#[cfg(feature = "generate")]
pub fn generate_cards(brand: CardBrand, count: usize) -> Vec<String> {
    (0..count).filter_map(|_| generate_card(brand)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{detect_brand, is_valid};

    #[test]
    fn test_deterministic_cards_for_every_brand() {
        for brand in CardBrand::RECOGNIZED {
            let number = generate_card_deterministic(brand).unwrap();
            assert_eq!(number.len(), required_length(brand), "{}", brand);
            assert_eq!(detect_brand(&number), brand);
            assert!(is_valid(&number), "{} should be valid", number);
        }
    }

    #[test]
    fn test_deterministic_is_reproducible() {
        assert_eq!(
            generate_card_deterministic(CardBrand::Jcb),
            generate_card_deterministic(CardBrand::Jcb)
        );
        assert_eq!(
            generate_card_deterministic(CardBrand::Visa).as_deref(),
            Some("4000000000000002")
        );
    }

    #[test]
    fn test_invalid_brand_has_no_number() {
        assert_eq!(prefix_for_brand(CardBrand::Invalid), None);
        assert_eq!(generate_card_deterministic(CardBrand::Invalid), None);
    }

    #[test]
    fn test_custom_prefix() {
        let number = generate_card_deterministic_with_prefix("401288", 16).unwrap();
        assert!(number.starts_with("401288"));
        assert!(is_valid(&number));
        assert_eq!(generate_card_deterministic_with_prefix("4012", 4), None);
        assert_eq!(generate_card_deterministic_with_prefix("4x", 16), None);
    }

    #[cfg(feature = "generate")]
    mod random_tests {
        use super::*;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        #[test]
        fn test_generate_card() {
            for brand in CardBrand::RECOGNIZED {
                let number = generate_card(brand).unwrap();
                assert!(is_valid(&number), "{}", number);
            }
            assert_eq!(generate_card(CardBrand::Invalid), None);
        }

        #[test]
        fn test_seeded_rng_is_reproducible() {
            let a = generate_card_with_rng("51", 16, &mut StdRng::seed_from_u64(7));
            let b = generate_card_with_rng("51", 16, &mut StdRng::seed_from_u64(7));
            assert_eq!(a, b);
        }

        #[test]
        fn test_generate_cards() {
            let cards = generate_cards(CardBrand::Discover, 20);
            assert_eq!(cards.len(), 20);
            assert!(cards.iter().all(|c| is_valid(c)));
            assert!(generate_cards(CardBrand::Invalid, 5).is_empty());
        }
    }
}
