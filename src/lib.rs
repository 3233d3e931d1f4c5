//! # cardform
//!
//! Input engine for an embeddable checkout form: card brand detection,
//! Luhn and per-brand length checks, live card number formatting with caret
//! preservation, CVV and expiry rules, email and address checks, and the
//! JSON payloads exchanged around tokenization.
//!
//! Every function is pure and synchronous. The caller owns all state,
//! including the previous field contents needed to undo an over-long edit.
//!
//! ## Quick Start
//!
//! ```rust
//! use cardform::{detect_brand, validate, CardBrand};
//!
//! // Brand icon while typing
//! assert_eq!(detect_brand("4012"), CardBrand::Visa);
//!
//! // Full check on submit
//! let verdict = validate("4012 8888 8888 1881");
//! assert!(verdict.overall);
//! assert_eq!(verdict.brand, CardBrand::Visa);
//! ```
//!
//! ## Live Formatting
//!
//! ```rust
//! use cardform::{reformat, FormatOutcome};
//!
//! // The user typed an eighth digit at the end of "4012 888"
//! let outcome = reformat("4012 8888", 9, "4012 888", 8);
//! assert_eq!(outcome.text(), "4012 8888");
//! assert_eq!(outcome.cursor(), 9);
//!
//! // Amex uses 4-6-5 grouping
//! let outcome = reformat("378282246310005", 15, "", 0);
//! assert_eq!(outcome.text(), "3782 822463 10005");
//! assert!(matches!(outcome, FormatOutcome::Formatted(_)));
//! ```
//!
//! ## Form Checks
//!
//! ```rust
//! use cardform::form::{FormMessage, PaymentForm};
//!
//! let form = PaymentForm {
//!     name: "Jane Doe".into(),
//!     email: "someone@testing.com".into(),
//!     card_number: "3782 822463 10005".into(),
//!     expiry: "06/30".into(),
//!     cvv: "123".into(),
//! };
//! assert_eq!(form.check().messages, vec![FormMessage::CvvTooShort]);
//! ```
//!
//! ## Supported Card Brands
//!
//! | Brand | Prefix | Length | CVV | Grouping |
//! |-------|--------|--------|-----|----------|
//! | Visa | 4 | 16 | 3 | 4-4-4-4 |
//! | MasterCard | 51-55, 2221-2720 | 16 | 3 | 4-4-4-4 |
//! | American Express | 34, 37 | 15 | 4 | 4-6-5 |
//! | Discover | 6011, 65 | 16 | 3 | 4-4-4-4 |
//! | Diners Club | 300-305, 36, 38 | 14 | 3 | 4-6-4 |
//! | JCB | 2131, 1800, 35 | 16 | 3 | 4-4-4-4 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `json` (default) | Token request and checkout result payloads |
//! | `generate` | Random test card generation |
//! | `cli` | `cardform` command-line tool |
//!
//! ## Security
//!
//! - Checked card numbers live in fixed-size arrays zeroed on drop
//! - `Debug` and `Display` show masked numbers only
//! - Log events carry masked numbers, never full ones
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod address;
pub mod card;
pub mod config;
pub mod cvv;
pub mod detect;
pub mod email;
pub mod error;
pub mod expiry;
pub mod form;
pub mod format;
pub mod generate;
pub mod luhn;
pub mod mask;
#[cfg(feature = "json")]
pub mod payload;
pub mod rules;
pub mod validate;

// Re-export main types at crate root
pub use address::{Address, AddressSlots, AddressType};
pub use card::{CardBrand, CardNumber, MAX_CARD_DIGITS};
pub use config::{CheckoutConfig, CheckoutStep};
pub use detect::detect_brand;
pub use error::ValidationError;
pub use format::{reformat, FormatOutcome, FormatState, Formatted};
pub use mask::mask_string;
pub use validate::{
    check, diagnose, is_valid, required_cvv_length, required_length, validate, ValidationVerdict,
};
