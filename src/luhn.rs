//! Luhn algorithm implementation.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) is the
//! ISO/IEC 7812-1 checksum that catches single-digit transcription errors
//! in card numbers.
//!
//! A sum of zero is never valid: the empty string and all-zero strings fail.

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Checks a card number string with the Luhn algorithm.
///
/// Returns `false` for empty input and for input containing anything but
/// ASCII digits.
///
/// # Example
///
/// ```
/// use cardform::luhn::is_luhn_valid;
///
/// assert!(is_luhn_valid("4012888888881881"));
/// assert!(!is_luhn_valid("4012888888882881"));
/// assert!(!is_luhn_valid("0000000000000000"));
/// ```
pub fn is_luhn_valid(digits: &str) -> bool {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let values: Vec<u8> = digits.bytes().map(|b| b - b'0').collect();
    validate(&values)
}

/// Validates a slice of digit values (0-9) with the Luhn algorithm.
///
/// # Algorithm
///
/// 1. Starting from the rightmost digit (check digit), moving left
/// 2. Double every second digit
/// 3. If doubling results in a number > 9, subtract 9
/// 4. Sum all digits
/// 5. The number is valid if the sum is non-zero and divisible by 10
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    let sum = compute_checksum(digits);
    sum != 0 && sum % 10 == 0
}

/// Computes the Luhn sum (not reduced modulo 10) for a sequence of digits.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 1 {
                DOUBLE_TABLE[digit as usize % 10] as u32
            } else {
                digit as u32
            }
        })
        .sum()
}

/// Generates the check digit for a partial card number.
///
/// Given digits without the check digit, computes what the check digit
/// should be for the number to pass Luhn validation.
///
/// # Example
///
/// ```
/// use cardform::luhn::generate_check_digit;
///
/// let partial = [4, 0, 1, 2, 8, 8, 8, 8, 8, 8, 8, 8, 1, 8, 8];
/// assert_eq!(generate_check_digit(&partial), 1);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Every existing digit moves one position left once the check digit is
    // appended, so the doubling parity flips.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 0 {
                DOUBLE_TABLE[digit as usize % 10] as u32
            } else {
                digit as u32
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cards() {
        assert!(is_luhn_valid("4012888888881881"));
        assert!(is_luhn_valid("5555555555554444"));
        assert!(is_luhn_valid("378282246310005"));
        assert!(is_luhn_valid("6011000990139424"));
        assert!(is_luhn_valid("38520000023237"));
        assert!(is_luhn_valid("1234567890123452"));
        assert!(is_luhn_valid("2221000000000009"));
    }

    #[test]
    fn test_invalid_cards() {
        assert!(!is_luhn_valid("4012888888882881"));
        assert!(!is_luhn_valid("5555555555554443"));
        assert!(!is_luhn_valid("378282246310015"));
        assert!(!is_luhn_valid("6011000990139434"));
        assert!(!is_luhn_valid("38520000023247"));
    }

    #[test]
    fn test_zero_sum_is_invalid() {
        assert!(!is_luhn_valid(""));
        assert!(!is_luhn_valid("0"));
        assert!(!is_luhn_valid("0000000000000000"));
        assert!(!validate(&[]));
    }

    #[test]
    fn test_non_digits_are_invalid() {
        assert!(!is_luhn_valid("4012 8888 8888 1881"));
        assert!(!is_luhn_valid("4012-8888-8888-1881"));
    }

    #[test]
    fn test_single_digit() {
        assert!(!is_luhn_valid("1"));
        assert!(!is_luhn_valid("5"));
    }

    #[test]
    fn test_generate_check_digit() {
        let partial = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
        assert_eq!(generate_check_digit(&partial), 1);

        let partial = [5, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(generate_check_digit(&partial), 4);

        let partial = [3, 7, 8, 2, 8, 2, 2, 4, 6, 3, 1, 0, 0, 0];
        assert_eq!(generate_check_digit(&partial), 5);
    }

    #[test]
    fn test_double_table_values() {
        for i in 0..10 {
            let doubled = i * 2;
            let expected = if doubled > 9 { doubled - 9 } else { doubled };
            assert_eq!(DOUBLE_TABLE[i], expected as u8);
        }
    }
}
