//! Fuzz target for the Luhn algorithm.

#![no_main]

use cardform::luhn;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let digits: Vec<u8> = data.iter().map(|&b| b % 10).collect();
    let _ = luhn::validate(&digits);

    let text: String = digits.iter().map(|&d| (b'0' + d) as char).collect();
    assert_eq!(luhn::is_luhn_valid(&text), luhn::validate(&digits));

    // An all-zero number sums to zero and is never valid
    if (1..=18).contains(&digits.len()) && digits.iter().any(|&d| d != 0) {
        let check = luhn::generate_check_digit(&digits);
        assert!(check <= 9);

        let mut with_check = digits.clone();
        with_check.push(check);
        assert!(luhn::validate(&with_check), "check digit did not complete the number");
    }
});
