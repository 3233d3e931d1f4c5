//! Fuzz target for live card number formatting.
//!
//! Arbitrary field contents and caret positions must never panic, and an
//! accepted edit must keep its digits and a caret inside the text.

#![no_main]

use arbitrary::Arbitrary;
use cardform::{format, reformat, FormatOutcome, MAX_CARD_DIGITS};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Edit<'a> {
    current: &'a str,
    cursor: u8,
    previous: &'a str,
    previous_cursor: u8,
}

fuzz_target!(|edit: Edit<'_>| {
    let outcome = reformat(
        edit.current,
        edit.cursor as usize,
        edit.previous,
        edit.previous_cursor as usize,
    );

    let digits = format::strip_formatting(edit.current);
    match &outcome {
        FormatOutcome::Formatted(f) => {
            assert!(digits.len() <= MAX_CARD_DIGITS);
            assert_eq!(format::strip_formatting(&f.text), digits);
            assert!(f.cursor <= f.text.len());

            let again = reformat(&f.text, f.cursor, "", 0);
            assert_eq!(&again, &outcome, "regrouping formatted text changed it");
        }
        FormatOutcome::Reverted(previous) => {
            assert!(digits.len() > MAX_CARD_DIGITS);
            assert_eq!(previous.text, edit.previous);
        }
    }

    let _ = format::format_card_number(edit.current);
    let _ = format::split_into_groups(edit.current);
    let _ = format::strip_non_digits(edit.current, edit.cursor as usize);
});
