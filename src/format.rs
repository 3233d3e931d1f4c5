//! Card number formatting.
//!
//! [`reformat`] is the live path: it runs after every edit of the card
//! number field, regroups the digits with spaces, and keeps the caret next
//! to the digit it was next to before the edit.
//!
//! The remaining functions format a complete number for display.
//!
//! # Grouping
//!
//! - **Visa/Mastercard/Discover/JCB** and unrecognized prefixes: `XXXX XXXX XXXX XXXX`
//! - **American Express**: `XXXX XXXXXX XXXXX`
//! - **Diners Club**: `XXXX XXXXXX XXXX`
//!
//! Digits past the end of the brand's grouping form one trailing group.
//!
//! # Example
//!
//! ```
//! use cardform::format::{format_card_number, reformat};
//!
//! assert_eq!(format_card_number("4012888888881881"), "4012 8888 8888 1881");
//! assert_eq!(format_card_number("378282246310005"), "3782 822463 10005");
//!
//! let outcome = reformat("40128", 5, "4012", 4);
//! assert_eq!(outcome.text(), "4012 8");
//! assert_eq!(outcome.cursor(), 6);
//! ```

use tracing::{debug, trace};

use crate::card::MAX_CARD_DIGITS;
use crate::cvv::cvv_length_for_brand;
use crate::detect::detect_brand;
use crate::rules;
use crate::CardBrand;

/// Text and caret of the card number field before an edit.
///
/// Cursor positions count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatState {
    /// Field contents.
    pub text: String,
    /// Caret offset into `text`.
    pub cursor: usize,
}

impl FormatState {
    /// Creates a snapshot of the field.
    pub fn new(text: impl Into<String>, cursor: usize) -> Self {
        Self {
            text: text.into(),
            cursor,
        }
    }
}

/// A regrouped card number field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    /// Digits with group spaces inserted.
    pub text: String,
    /// Caret offset into `text`.
    pub cursor: usize,
    /// Brand guessed from the leading digits.
    pub brand: CardBrand,
}

impl Formatted {
    /// Image to show next to the field.
    #[inline]
    pub fn icon(&self) -> &'static str {
        self.brand.icon()
    }

    /// Number of CVV digits the CVV field should accept.
    #[inline]
    pub fn cvv_length(&self) -> usize {
        cvv_length_for_brand(self.brand)
    }
}

/// Result of [`reformat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    /// The edit was accepted and regrouped.
    Formatted(Formatted),
    /// The edit would exceed 19 digits; the field goes back to this state.
    Reverted(FormatState),
}

impl FormatOutcome {
    /// Text the field should show.
    pub fn text(&self) -> &str {
        match self {
            Self::Formatted(f) => &f.text,
            Self::Reverted(s) => &s.text,
        }
    }

    /// Caret position the field should show.
    pub fn cursor(&self) -> usize {
        match self {
            Self::Formatted(f) => f.cursor,
            Self::Reverted(s) => s.cursor,
        }
    }

    /// Returns true if the edit was rejected.
    #[inline]
    pub fn is_reverted(&self) -> bool {
        matches!(self, Self::Reverted(_))
    }

    /// Splits the outcome into field text and caret.
    pub fn into_parts(self) -> (String, usize) {
        match self {
            Self::Formatted(f) => (f.text, f.cursor),
            Self::Reverted(s) => (s.text, s.cursor),
        }
    }
}

/// Regroups the card number field after an edit.
///
/// `current` and `cursor` describe the field after the edit, `previous` and
/// `previous_cursor` before it. Non-digits are dropped, the digits are
/// grouped by the brand guessed from the first four, and the caret keeps its
/// place relative to the digits. An edit that leaves more than 19 digits is
/// rejected and the previous state is returned unchanged.
///
/// # Example
///
/// ```
/// use cardform::format::{reformat, FormatOutcome};
///
/// // Typing a digit in the middle of a group
/// let outcome = reformat("4012 88838 8888 1881", 9, "4012 8888 8888 1881", 8);
/// assert_eq!(outcome.text(), "4012 8883 8888 8188 1");
/// assert_eq!(outcome.cursor(), 9);
///
/// // A twentieth digit is refused
/// let outcome = reformat("4012 8888 8888 1881 1112", 24, "4012 8888 8888 1881 111", 23);
/// assert!(matches!(outcome, FormatOutcome::Reverted(_)));
/// assert_eq!(outcome.text(), "4012 8888 8888 1881 111");
/// ```
pub fn reformat(current: &str, cursor: usize, previous: &str, previous_cursor: usize) -> FormatOutcome {
    let (digits, digit_cursor) = strip_non_digits(current, cursor);

    if digits.len() > MAX_CARD_DIGITS {
        debug!(
            digits = digits.len(),
            maximum = MAX_CARD_DIGITS,
            "card number edit reverted"
        );
        return FormatOutcome::Reverted(FormatState::new(previous, previous_cursor));
    }

    let brand = detect_brand(&digits);
    let (text, cursor) = group_digits(&digits, rules::rule(brand).grouping, digit_cursor);

    trace!(%brand, digits = digits.len(), cursor, "card number regrouped");

    FormatOutcome::Formatted(Formatted {
        text,
        cursor,
        brand,
    })
}

/// Removes every non-digit from `text`, moving `cursor` left once for each
/// character removed in front of it.
///
/// # Example
///
/// ```
/// use cardform::format::strip_non_digits;
///
/// assert_eq!(strip_non_digits("1111 1123 1111", 8), ("111111231111".to_string(), 7));
/// ```
pub fn strip_non_digits(text: &str, cursor: usize) -> (String, usize) {
    let mut digits = String::with_capacity(text.len());
    let mut target = cursor;

    for (i, c) in text.chars().enumerate() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if i < cursor {
            target = target.saturating_sub(1);
        }
    }

    let target = target.min(digits.len());
    (digits, target)
}

/// Sizes of the groups `len` digits fall into under `grouping`.
fn group_sizes(grouping: &[usize], len: usize) -> Vec<usize> {
    let mut sizes = Vec::with_capacity(grouping.len() + 1);
    let mut remaining = len;

    for &size in grouping {
        if remaining == 0 {
            break;
        }
        let take = size.min(remaining);
        sizes.push(take);
        remaining -= take;
    }
    if remaining > 0 {
        sizes.push(remaining);
    }

    sizes
}

/// Joins ASCII `digits` into space-separated groups. A space inserted in
/// front of a digit left of `cursor` moves the cursor right by one.
fn group_digits(digits: &str, grouping: &[usize], cursor: usize) -> (String, usize) {
    let mut text = String::with_capacity(digits.len() + grouping.len());
    let mut target = cursor;
    let mut pos = 0;

    for (index, size) in group_sizes(grouping, digits.len()).into_iter().enumerate() {
        if index > 0 {
            text.push(' ');
            if pos < cursor {
                target += 1;
            }
        }
        text.push_str(&digits[pos..pos + size]);
        pos += size;
    }

    (text, target)
}

/// Formats a card number for display, grouped by its detected brand.
///
/// Everything but ASCII digits is discarded first.
///
/// # Example
///
/// ```
/// use cardform::format::format_card_number;
///
/// assert_eq!(format_card_number("4012-8888-8888-1881"), "4012 8888 8888 1881");
/// assert_eq!(format_card_number("38520000023237"), "3852 000002 3237");
/// ```
pub fn format_card_number(input: &str) -> String {
    let digits = strip_formatting(input);
    let brand = detect_brand(&digits);
    group_digits(&digits, rules::rule(brand).grouping, 0).0
}

/// Formats a card number using a known brand's grouping.
///
/// # Example
///
/// ```
/// use cardform::format::format_for_brand;
/// use cardform::CardBrand;
///
/// assert_eq!(
///     format_for_brand("378282246310005", CardBrand::Amex),
///     "3782 822463 10005"
/// );
/// ```
pub fn format_for_brand(input: &str, brand: CardBrand) -> String {
    let digits = strip_formatting(input);
    group_digits(&digits, rules::rule(brand).grouping, 0).0
}

/// Strips all formatting from a card number, leaving only digits.
///
/// # Example
///
/// ```
/// use cardform::format::strip_formatting;
///
/// assert_eq!(strip_formatting("4012 8888 8888 1881"), "4012888888881881");
/// assert_eq!(strip_formatting("4012-8888-8888-1881"), "4012888888881881");
/// ```
pub fn strip_formatting(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Splits a card number into its display groups.
///
/// # Example
///
/// ```
/// use cardform::format::split_into_groups;
///
/// assert_eq!(split_into_groups("378282246310005"), vec!["3782", "822463", "10005"]);
/// ```
pub fn split_into_groups(input: &str) -> Vec<String> {
    let digits = strip_formatting(input);
    let brand = detect_brand(&digits);

    let mut groups = Vec::new();
    let mut pos = 0;
    for size in group_sizes(rules::rule(brand).grouping, digits.len()) {
        groups.push(digits[pos..pos + size].to_string());
        pos += size;
    }
    groups
}
