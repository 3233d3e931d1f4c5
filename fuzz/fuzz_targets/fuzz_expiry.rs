//! Fuzz target for expiry date parsing.

#![no_main]

use cardform::expiry;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = expiry::validate_expiry(data);
    let _ = expiry::validate_expiry_at(data, 2026, 10);

    if let Ok(exp) = expiry::parse_expiry(data) {
        assert!((1..=12).contains(&exp.month()));
        assert_eq!(exp.expiry_month().len(), 2);
        let _ = exp.expiry_year_short();
        let _ = exp.is_expired();
        assert_eq!(expiry::parse_expiry(&exp.to_string()).map(|e| e.month()), Ok(exp.month()));
    }
});
