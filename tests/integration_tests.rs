//! Integration tests for cardform.
//!
//! These tests drive the public API the way a checkout screen does: typing
//! into the card field, submitting the forms, and assembling payloads.

use cardform::{
    check, cvv, detect_brand, diagnose, email, expiry, format, is_valid, mask, reformat,
    required_cvv_length, required_length, validate, Address, AddressSlots, AddressType, CardBrand,
    CheckoutConfig, CheckoutStep, FormatOutcome, FormatState, ValidationError,
};

// =============================================================================
// TEST CARD NUMBERS
// =============================================================================
// Published processor test numbers. They pass Luhn but are not real cards.

mod test_cards {
    pub const VISA_1: &str = "4111111111111111";
    pub const VISA_2: &str = "4012888888881881";
    pub const VISA_3: &str = "4242424242424242";

    pub const MC_1: &str = "5555555555554444";
    pub const MC_2: &str = "5105105105105100";
    pub const MC_2SERIES: &str = "2221000000000009";

    pub const AMEX_1: &str = "378282246310005";
    pub const AMEX_2: &str = "371449635398431";

    pub const DISCOVER_1: &str = "6011111111111117";
    pub const DISCOVER_2: &str = "6011000990139424";

    pub const DINERS_1: &str = "30569309025904";
    pub const DINERS_2: &str = "38520000023237";

    pub const JCB_1: &str = "3530111333300000";
    pub const JCB_2: &str = "3566002020360505";
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn test_all_test_cards_validate() {
    use test_cards::*;

    for (number, brand) in [
        (VISA_1, CardBrand::Visa),
        (VISA_2, CardBrand::Visa),
        (VISA_3, CardBrand::Visa),
        (MC_1, CardBrand::Mastercard),
        (MC_2, CardBrand::Mastercard),
        (MC_2SERIES, CardBrand::Mastercard),
        (AMEX_1, CardBrand::Amex),
        (AMEX_2, CardBrand::Amex),
        (DISCOVER_1, CardBrand::Discover),
        (DISCOVER_2, CardBrand::Discover),
        (DINERS_1, CardBrand::DinersClub),
        (DINERS_2, CardBrand::DinersClub),
        (JCB_1, CardBrand::Jcb),
        (JCB_2, CardBrand::Jcb),
    ] {
        let verdict = validate(number);
        assert!(verdict.overall, "{} should be valid: {:?}", number, verdict);
        assert_eq!(verdict.brand, brand, "{}", number);
        assert_eq!(verdict.length, required_length(brand));
        assert!(diagnose(number).is_none(), "{}", number);

        let card = check(number).unwrap();
        assert_eq!(card.brand(), brand);
        assert_eq!(card.number(), number);
    }
}

#[test]
fn test_validate_accepts_displayed_text() {
    let formatted = reformat(test_cards::AMEX_1, 15, "", 0);
    assert_eq!(formatted.text(), "3782 822463 10005");
    assert!(is_valid(formatted.text()));
    assert_eq!(check(formatted.text()).unwrap().brand(), CardBrand::Amex);
}

#[test]
fn test_verdict_fields_are_independent() {
    // Luhn passes, length does not
    let verdict = validate("4222222222222");
    assert!(verdict.luhn_ok);
    assert!(!verdict.length_ok);
    assert!(!verdict.overall);

    // Length passes, Luhn does not
    let verdict = validate("4012888888881882");
    assert!(verdict.length_ok);
    assert!(verdict.pattern_ok);
    assert!(!verdict.luhn_ok);
    assert!(!verdict.overall);
}

#[test]
fn test_unknown_prefix_never_valid() {
    let verdict = validate("9999999999999995");
    assert_eq!(verdict.brand, CardBrand::Invalid);
    assert!(!verdict.pattern_ok);
    assert!(!verdict.overall);
    assert_eq!(check("9999999999999995"), Err(ValidationError::UnknownBrand));
}

#[test]
fn test_check_errors() {
    assert_eq!(check(""), Err(ValidationError::Empty));
    assert_eq!(check("   "), Err(ValidationError::NoDigits));
    assert_eq!(
        check("4012 8888"),
        Err(ValidationError::TooShort {
            length: 8,
            minimum: 16
        })
    );
    assert_eq!(check("4012888888881882"), Err(ValidationError::InvalidChecksum));
    assert!(check("4012 8888 8888 188a").is_err());
}

#[test]
fn test_too_short_uses_prefix_brand() {
    // A partial Amex number is too short for Amex, not "unknown"
    let issue = diagnose("3782 822463").unwrap();
    assert!(issue.is_too_short());

    // An unknown prefix is never "too short"
    let issue = diagnose("9999").unwrap();
    assert!(!issue.is_too_short());
}

// =============================================================================
// DETECTION
// =============================================================================

#[test]
fn test_detect_while_typing() {
    // Nothing is guessed before the fourth digit
    assert_eq!(detect_brand(""), CardBrand::Invalid);
    assert_eq!(detect_brand("401"), CardBrand::Invalid);
    assert_eq!(detect_brand("4000"), CardBrand::Visa);
    assert_eq!(detect_brand("3700"), CardBrand::Amex);
    assert_eq!(detect_brand("6011"), CardBrand::Discover);
    assert_eq!(detect_brand("6500"), CardBrand::Discover);
    assert_eq!(detect_brand("2720"), CardBrand::Mastercard);
    assert_eq!(detect_brand("2721"), CardBrand::Invalid);
    assert_eq!(detect_brand("2131"), CardBrand::Jcb);
    assert_eq!(detect_brand("1800"), CardBrand::Jcb);
    assert_eq!(detect_brand("3050"), CardBrand::DinersClub);
    assert_eq!(detect_brand("3060"), CardBrand::Invalid);
}

#[test]
fn test_detect_reads_first_four_only() {
    assert_eq!(detect_brand("40128888"), detect_brand("4012"));
    assert_eq!(detect_brand("9999 4012"), CardBrand::Invalid);
}

#[test]
fn test_brand_metadata() {
    for brand in CardBrand::RECOGNIZED {
        assert!(brand.is_recognized());
        assert!(!brand.icon().is_empty());
        assert!(required_length(brand) >= 14);
        assert!(matches!(required_cvv_length(brand), 3 | 4));
    }
    assert!(!CardBrand::Invalid.is_recognized());
    assert_eq!(required_length(CardBrand::Invalid), 0);
}

// =============================================================================
// LIVE FORMATTING
// =============================================================================

/// Types `input` one character at a time at the end of the field.
fn type_out(input: &str) -> FormatState {
    let mut state = FormatState::new("", 0);
    for c in input.chars() {
        let mut text = state.text.clone();
        text.push(c);
        let cursor = text.chars().count();
        let (text, cursor) = reformat(&text, cursor, &state.text, state.cursor).into_parts();
        state = FormatState::new(text, cursor);
    }
    state
}

#[test]
fn test_typing_a_visa_number() {
    let state = type_out(test_cards::VISA_2);
    assert_eq!(state.text, "4012 8888 8888 1881");
    assert_eq!(state.cursor, state.text.len());
}

#[test]
fn test_typing_an_amex_number() {
    let state = type_out(test_cards::AMEX_1);
    assert_eq!(state.text, "3782 822463 10005");
    assert_eq!(state.cursor, 17);
}

#[test]
fn test_typing_a_diners_number() {
    let state = type_out(test_cards::DINERS_2);
    assert_eq!(state.text, "3852 000002 3237");
}

#[test]
fn test_typing_stops_at_nineteen_digits() {
    let state = type_out("40128888888818811112222");
    assert_eq!(format::strip_formatting(&state.text).len(), 19);
    assert_eq!(state.text, "4012 8888 8888 1881 111");
}

#[test]
fn test_pasting_dashed_number() {
    let outcome = reformat("4012-8888-8888-1881", 19, "", 0);
    assert_eq!(outcome.text(), "4012 8888 8888 1881");
    assert_eq!(outcome.cursor(), 19);
    match outcome {
        FormatOutcome::Formatted(f) => {
            assert_eq!(f.brand, CardBrand::Visa);
            assert_eq!(f.cvv_length(), 3);
        }
        FormatOutcome::Reverted(_) => panic!("paste should be accepted"),
    }
}

#[test]
fn test_deleting_a_digit_mid_field() {
    // Backspace removed the '8' after the first space. The caret sat on a
    // group boundary, so it lands in front of the space.
    let outcome = reformat("4012 888 8888 1881", 5, "4012 8888 8888 1881", 6);
    assert_eq!(outcome.text(), "4012 8888 8888 881");
    assert_eq!(outcome.cursor(), 4);
}

#[test]
fn test_brand_change_regroups() {
    // "3782" is Amex, so the field switches to 4-6-5
    let outcome = reformat("3782 8224 6310", 14, "", 0);
    assert_eq!(outcome.text(), "3782 822463 10");
}

#[test]
fn test_overflow_restores_previous_state() {
    let previous = FormatState::new("4012 8888 8888 1881 111", 10);
    let outcome = reformat("4012 8888 88888 1881 111", 11, &previous.text, previous.cursor);
    assert!(outcome.is_reverted());
    assert_eq!(outcome, FormatOutcome::Reverted(previous));
}

#[test]
fn test_format_helpers() {
    assert_eq!(format::format_card_number("4012888888881881"), "4012 8888 8888 1881");
    assert_eq!(
        format::format_for_brand("30569309025904", CardBrand::DinersClub),
        "3056 930902 5904"
    );
    assert_eq!(
        format::split_into_groups("4012888888881881"),
        vec!["4012", "8888", "8888", "1881"]
    );
    assert_eq!(format::strip_non_digits("40 12", 5), ("4012".to_string(), 4));
}

// =============================================================================
// CVV, EXPIRY, EMAIL
// =============================================================================

#[test]
fn test_cvv_follows_brand() {
    assert!(cvv::is_valid_cvv_for_brand("1234", CardBrand::Amex));
    assert!(!cvv::is_valid_cvv_for_brand("123", CardBrand::Amex));
    assert!(cvv::is_valid_cvv_for_brand("123", CardBrand::Visa));
    assert!(!cvv::is_valid_cvv_for_brand("1234", CardBrand::Visa));

    let err = cvv::validate_cvv_for_brand("12", CardBrand::Visa).unwrap_err();
    assert!(err.is_too_short());
}

#[test]
fn test_cvv_keystroke_filter() {
    assert!(cvv::accepts_cvv_edit("12", 0, "3", CardBrand::Visa));
    assert!(!cvv::accepts_cvv_edit("123", 0, "4", CardBrand::Visa));
    assert!(cvv::accepts_cvv_edit("123", 0, "4", CardBrand::Amex));
    assert!(!cvv::accepts_cvv_edit("12", 0, "a", CardBrand::Visa));
    // Backspace is always allowed
    assert!(cvv::accepts_cvv_edit("123", 1, "", CardBrand::Visa));
}

#[test]
fn test_expiry_window() {
    let today = (2026, 10);
    assert!(expiry::validate_expiry_at("10/26", today.0, today.1).is_ok());
    assert!(matches!(
        expiry::validate_expiry_at("09/26", today.0, today.1),
        Err(expiry::ExpiryError::Expired { .. })
    ));
    assert!(expiry::validate_expiry_at("12/2045", today.0, today.1).is_ok());
    assert!(matches!(
        expiry::validate_expiry_at("01/2046", today.0, today.1),
        Err(expiry::ExpiryError::TooFarFuture { .. })
    ));
    assert_eq!(expiry::selectable_months(2026, 2026, 10), 10..=12);
    assert_eq!(expiry::selectable_months(2027, 2026, 10), 1..=12);
}

#[test]
fn test_expiry_payload_fields() {
    let date = expiry::parse_expiry("6/2030").unwrap();
    assert_eq!(date.expiry_month(), "06");
    assert_eq!(date.expiry_year_short(), "30");
    assert_eq!(date.to_string(), "06/30");
}

#[test]
fn test_email_checks() {
    assert!(email::validate("someone@testing.com"));
    assert!(email::validate("first.last+tag@mail.example.org"));
    assert!(!email::validate("someone@testing"));
    assert!(!email::validate("someone.testing.com"));
    assert!(!email::validate(""));
}

// =============================================================================
// CHECKOUT FLOW
// =============================================================================

fn victoria() -> Address {
    Address::new()
        .name("Jane Doe")
        .street("123 Main St")
        .postal_code("V8W 1A1")
        .city("Victoria")
        .province("BC")
        .country("Canada")
}

#[test]
fn test_full_checkout_flow() {
    let config = CheckoutConfig::new();
    let mut slots = AddressSlots::new();

    let mut step = config.first_step();
    assert_eq!(step, CheckoutStep::ShippingAddress);
    assert!(cardform::address::offers_billing_same_skip(
        AddressType::Shipping,
        &config
    ));

    // Shipping screen, with "billing same as shipping" ticked
    assert!(cardform::form::check_address(&victoria()).is_valid());
    slots.store(AddressType::Shipping, victoria(), true);
    step = config.next_step(step, true).unwrap();
    assert_eq!(step, CheckoutStep::Payment);
    assert_eq!(slots.billing(), Some(&victoria()));

    let form = cardform::form::PaymentForm {
        name: "Jane Doe".into(),
        email: "someone@testing.com".into(),
        card_number: "4012 8888 8888 1881".into(),
        expiry: "06/30".into(),
        cvv: "123".into(),
    };
    assert!(form.check().is_valid());
    assert_eq!(config.next_step(step, true), None);
}

#[test]
fn test_checkout_without_addresses() {
    let config = CheckoutConfig::new()
        .shipping_address_required(false)
        .billing_address_required(false);
    assert_eq!(config.first_step(), CheckoutStep::Payment);
    assert_eq!(config.steps(false), vec![CheckoutStep::Payment]);
}

#[cfg(feature = "json")]
#[test]
fn test_token_request_and_result() {
    use cardform::payload::{CheckoutResult, TokenRequest, TokenResponse};

    let request = TokenRequest::new_at("4012 8888 8888 1881", "06/30", "123", 2026, 10).unwrap();
    let body: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
    assert_eq!(body["number"], "4012888888881881");
    assert_eq!(body["expiry_month"], "06");
    assert_eq!(body["expiry_year"], "30");
    assert_eq!(body["cvd"], "123");

    let response = TokenResponse::from_json(r#"{"token":"abc123"}"#).unwrap();
    let mut slots = AddressSlots::new();
    slots.store(AddressType::Shipping, victoria(), true);

    let result = CheckoutResult::assemble(
        &response,
        "Jane Doe",
        "someone@testing.com",
        &slots,
        &CheckoutConfig::new(),
    )
    .unwrap();
    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(json["cardInfo"]["code"], "abc123");
    assert_eq!(json["shippingAddress"]["address_line1"], "123 Main St");
    assert_eq!(json["billingAddress"]["city"], "Victoria");
}

// =============================================================================
// SECURITY
// =============================================================================

#[test]
fn test_no_full_number_in_debug_or_display() {
    let card = check(test_cards::VISA_2).unwrap();
    let debug = format!("{:?}", card);
    let display = format!("{}", card);
    assert!(!debug.contains(test_cards::VISA_2));
    assert!(!display.contains(test_cards::VISA_2));
    assert!(display.contains("1881"));
}

#[test]
fn test_masking() {
    assert_eq!(mask::mask_string("4012 8888 8888 1881"), "****-****-****-1881");
    assert_eq!(mask::last_four_from_string("4012 8888 8888 1881"), "1881");
    let card = check(test_cards::AMEX_1).unwrap();
    assert_eq!(card.last_four(), "0005");
}

#[test]
fn test_malformed_input_does_not_panic() {
    for input in [
        "",
        " ",
        "\0",
        "🎉🎉🎉",
        "４０１２８８８８８８８８１８８１",
        "4012\u{200B}8888",
        &"9".repeat(10_000),
    ] {
        let _ = validate(input);
        let _ = check(input);
        let _ = diagnose(input);
        let _ = detect_brand(input);
        let _ = reformat(input, input.len(), "", 0);
        let _ = email::validate(input);
    }
}
