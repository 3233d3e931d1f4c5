//! The brand rule table.
//!
//! Every per-brand fact the engine needs lives in [`RULES`]: the leading
//! digit patterns, the required number length, the CVV length, the digit
//! grouping used for display, and the icon shown next to the field.
//!
//! Both detection modes are generated from the same prefixes:
//!
//! - **prefix patterns** match the first four digits while the user types
//!   (`^(?:4|5[1-5]|...)`)
//! - **full patterns** match a complete number, each prefix followed by
//!   exactly as many digits as the brand's length requires
//!   (`^(?:4[0-9]{15})$`)

use std::sync::LazyLock;

use regex::Regex;

use crate::CardBrand;

/// Number of leading digits examined by prefix detection.
pub const PREFIX_DIGITS: usize = 4;

/// A leading-digit pattern and the number of digits it consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefix {
    /// Regular expression fragment, unanchored.
    pub pattern: &'static str,
    /// Digits matched by `pattern`.
    pub width: usize,
}

const fn prefix(pattern: &'static str, width: usize) -> Prefix {
    Prefix { pattern, width }
}

/// Static rules for one brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandRule {
    /// The brand this rule describes.
    pub brand: CardBrand,
    /// Leading digit patterns, any of which identifies the brand.
    pub prefixes: &'static [Prefix],
    /// Required number of digits.
    pub number_length: usize,
    /// Required number of CVV digits.
    pub cvv_length: usize,
    /// Group sizes used when inserting spaces.
    pub grouping: &'static [usize],
    /// Image name for the brand.
    pub icon: &'static str,
}

const STANDARD_GROUPING: &[usize] = &[4, 4, 4, 4];

/// Rules for the recognized brands, in detection priority order.
pub static RULES: [BrandRule; 6] = [
    BrandRule {
        brand: CardBrand::Visa,
        prefixes: &[prefix("4", 1)],
        number_length: 16,
        cvv_length: 3,
        grouping: STANDARD_GROUPING,
        icon: "visa",
    },
    BrandRule {
        brand: CardBrand::Mastercard,
        prefixes: &[
            prefix("5[1-5]", 2),
            // 2221-2720
            prefix("222[1-9]", 4),
            prefix("22[3-9][0-9]", 4),
            prefix("2[3-6][0-9]{2}", 4),
            prefix("27[01][0-9]", 4),
            prefix("2720", 4),
        ],
        number_length: 16,
        cvv_length: 3,
        grouping: STANDARD_GROUPING,
        icon: "mastercard",
    },
    BrandRule {
        brand: CardBrand::Amex,
        prefixes: &[prefix("3[47]", 2)],
        number_length: 15,
        cvv_length: 4,
        grouping: &[4, 6, 5],
        icon: "amex",
    },
    BrandRule {
        brand: CardBrand::Discover,
        prefixes: &[prefix("6011", 4), prefix("65", 2)],
        number_length: 16,
        cvv_length: 3,
        grouping: STANDARD_GROUPING,
        icon: "discover",
    },
    BrandRule {
        brand: CardBrand::DinersClub,
        prefixes: &[prefix("30[0-5]", 3), prefix("3[68]", 2)],
        number_length: 14,
        cvv_length: 3,
        grouping: &[4, 6, 4],
        icon: "dinersclub",
    },
    BrandRule {
        brand: CardBrand::Jcb,
        prefixes: &[prefix("2131", 4), prefix("1800", 4), prefix("35", 2)],
        number_length: 16,
        cvv_length: 3,
        grouping: STANDARD_GROUPING,
        icon: "jcb",
    },
];

/// Rule for `CardBrand::Invalid`: no length, no CVV, widest grouping.
pub static INVALID_RULE: BrandRule = BrandRule {
    brand: CardBrand::Invalid,
    prefixes: &[],
    number_length: 0,
    cvv_length: 0,
    grouping: STANDARD_GROUPING,
    icon: "ic_credit_card_black_48dp",
};

/// Returns the rule for a brand.
#[inline]
pub fn rule(brand: CardBrand) -> &'static BrandRule {
    RULES
        .iter()
        .find(|r| r.brand == brand)
        .unwrap_or(&INVALID_RULE)
}

impl BrandRule {
    /// Anchored pattern matching the brand's leading digits.
    pub fn prefix_pattern(&self) -> String {
        let alternatives: Vec<&str> = self.prefixes.iter().map(|p| p.pattern).collect();
        format!("^(?:{})", alternatives.join("|"))
    }

    /// Anchored pattern matching a complete number of the required length.
    pub fn full_pattern(&self) -> String {
        let alternatives: Vec<String> = self
            .prefixes
            .iter()
            .map(|p| {
                format!(
                    "{}[0-9]{{{}}}",
                    p.pattern,
                    self.number_length.saturating_sub(p.width)
                )
            })
            .collect();
        format!("^(?:{})$", alternatives.join("|"))
    }
}

struct CompiledRule {
    brand: CardBrand,
    prefix: Regex,
    full: Regex,
}

static COMPILED: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|rule| CompiledRule {
            brand: rule.brand,
            prefix: Regex::new(&rule.prefix_pattern()).expect("brand prefix pattern is valid"),
            full: Regex::new(&rule.full_pattern()).expect("brand full pattern is valid"),
        })
        .collect()
});

/// First brand whose prefix pattern matches `lead`, else `Invalid`.
pub(crate) fn match_prefix(lead: &str) -> CardBrand {
    COMPILED
        .iter()
        .find(|c| c.prefix.is_match(lead))
        .map_or(CardBrand::Invalid, |c| c.brand)
}

/// First brand whose full pattern matches `digits`, else `Invalid`.
pub(crate) fn match_full(digits: &str) -> CardBrand {
    COMPILED
        .iter()
        .find(|c| c.full.is_match(digits))
        .map_or(CardBrand::Invalid, |c| c.brand)
}
