//! Card number masking for logs and display.
//!
//! Only the last four digits are ever shown. Every log event in this crate
//! that mentions a card number goes through [`mask_string`].

use crate::CardNumber;

/// Masks a checked card number, showing only the last 4 digits.
///
/// Format: `****-****-****-1881`
///
/// # Example
///
/// ```
/// use cardform::check;
///
/// let card = check("4012 8888 8888 1881").unwrap();
/// assert_eq!(card.masked(), "****-****-****-1881");
/// ```
#[inline]
pub fn mask_card(card: &CardNumber) -> String {
    let digits: Vec<char> = card.digits().iter().map(|&d| (b'0' + d) as char).collect();
    mask_digits(&digits)
}

/// Masks a raw card number string.
///
/// Non-digits are dropped first. Four digits or fewer are masked entirely.
///
/// # Example
///
/// ```
/// use cardform::mask::mask_string;
///
/// assert_eq!(mask_string("4012 8888 8888 1881"), "****-****-****-1881");
/// assert_eq!(mask_string("378282246310005"), "****-****-***-0005");
/// assert_eq!(mask_string("401"), "***");
/// ```
#[inline]
pub fn mask_string(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    mask_digits(&digits)
}

fn mask_digits(digits: &[char]) -> String {
    let len = digits.len();
    if len <= 4 {
        return "*".repeat(len);
    }

    let masked_count = len - 4;
    let mut result = String::with_capacity(len + len / 4);

    for i in 0..masked_count {
        if i > 0 && i % 4 == 0 {
            result.push('-');
        }
        result.push('*');
    }
    result.push('-');
    result.extend(&digits[masked_count..]);

    result
}

/// Extracts the last 4 digits from a card number string.
///
/// Returns an empty string if there are fewer than 4 digits.
#[inline]
pub fn last_four_from_string(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 4 {
        digits[digits.len() - 4..].iter().collect()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::check;

    #[test]
    fn test_mask_card_16_digits() {
        let card = check("4012888888881881").unwrap();
        assert_eq!(mask_card(&card), "****-****-****-1881");
    }

    #[test]
    fn test_mask_card_15_digits() {
        let card = check("378282246310005").unwrap();
        assert_eq!(mask_card(&card), "****-****-***-0005");
    }

    #[test]
    fn test_mask_card_14_digits() {
        let card = check("38520000023237").unwrap();
        assert_eq!(mask_card(&card), "****-****-**-3237");
    }

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string("4012888888881881"), "****-****-****-1881");
        assert_eq!(mask_string("4012-8888-8888-1881"), "****-****-****-1881");
        assert_eq!(mask_string("40128"), "*-0128");
        assert_eq!(mask_string("4012"), "****");
        assert_eq!(mask_string(""), "");
    }

    #[test]
    fn test_mask_never_leaks_leading_digits() {
        let masked = mask_string("4012888888881881111");
        assert!(!masked.contains("4012"));
        assert!(masked.ends_with("1111"));
    }

    #[test]
    fn test_last_four_from_string() {
        assert_eq!(last_four_from_string("4012888888881881"), "1881");
        assert_eq!(last_four_from_string("4012 8888 8888 1234"), "1234");
        assert_eq!(last_four_from_string("123"), "");
    }
}
