//! Fuzz target for card validation.
//!
//! The verdict, the strict check and the diagnosis must agree on every input.

#![no_main]

use cardform::{check, detect_brand, diagnose, email, form::PaymentForm, is_valid, mask};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let valid = is_valid(data);
    assert_eq!(check(data).is_ok(), valid);
    assert_eq!(diagnose(data).is_none(), valid);

    let _ = detect_brand(data);
    let _ = mask::mask_string(data);
    let _ = email::validate(data);

    let form = PaymentForm {
        name: data.to_string(),
        email: data.to_string(),
        card_number: data.to_string(),
        expiry: data.to_string(),
        cvv: data.to_string(),
    };
    let _ = form.check();
});
