//! Fuzz target for CVV validation and the keystroke filter.

#![no_main]

use cardform::{cvv, CardBrand};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, &str, u8)| {
    let (current, replacement, range_len) = input;

    for brand in CardBrand::RECOGNIZED.into_iter().chain([CardBrand::Invalid]) {
        if let Ok(validated) = cvv::validate_cvv_for_brand(current, brand) {
            assert_eq!(validated.length(), cvv::cvv_length_for_brand(brand));
            assert!(!format!("{:?}", validated).contains(current));
        }
        let _ = cvv::accepts_cvv_edit(current, range_len as usize, replacement, brand);
    }
});
