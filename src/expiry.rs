//! Card expiry dates.
//!
//! The payment form picks the expiry from a month/year picker offering the
//! current month through 19 years ahead. Typed dates are accepted as
//! `MM/YY` or `MM/YYYY` and held to the same window.
//!
//! # Example
//!
//! ```
//! use cardform::expiry::{parse_expiry, validate_expiry_at};
//!
//! let expiry = parse_expiry("06/16").unwrap();
//! assert_eq!(expiry.expiry_month(), "06");
//! assert_eq!(expiry.expiry_year_short(), "16");
//!
//! // Checked against June 2016
//! assert!(validate_expiry_at("06/16", 2016, 6).is_ok());
//! assert!(validate_expiry_at("05/16", 2016, 6).is_err());
//! ```

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Number of years the expiry picker offers, starting with the current one.
pub const PICKER_YEARS: u16 = 20;

/// A month and four-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpiryDate {
    year: u16,
    month: u8,
}

impl ExpiryDate {
    /// Creates an expiry date, rejecting months outside 1-12.
    pub fn new(month: u8, year: u16) -> Result<Self, ExpiryError> {
        if !(1..=12).contains(&month) {
            return Err(ExpiryError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the four-digit year.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Two-digit month as sent in a token request (`"06"` for June).
    pub fn expiry_month(&self) -> String {
        format!("{:02}", self.month)
    }

    /// Two-digit year as sent in a token request (`"16"` for 2016).
    pub fn expiry_year_short(&self) -> String {
        format!("{:02}", self.year % 100)
    }

    /// Returns true if the card expired before the given month.
    ///
    /// A card stays valid through the end of its expiry month.
    #[inline]
    pub fn is_expired_at(&self, year: u16, month: u8) -> bool {
        (self.year, self.month) < (year, month)
    }

    /// Returns true if the card has expired as of today (UTC).
    pub fn is_expired(&self) -> bool {
        let (year, month) = current_year_month();
        self.is_expired_at(year, month)
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year % 100)
    }
}

/// Reasons an expiry date was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryError {
    /// The input string is empty.
    Empty,
    /// Not `MM/YY` or `MM/YYYY`.
    InvalidFormat,
    /// Month is out of range (must be 1-12).
    InvalidMonth(u8),
    /// The card expired before the current month.
    Expired {
        /// The expiry month.
        month: u8,
        /// The expiry year.
        year: u16,
    },
    /// Later than the picker allows.
    TooFarFuture {
        /// The expiry year.
        year: u16,
        /// Last year the picker offers.
        max_year: u16,
    },
}

impl fmt::Display for ExpiryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "expiry date is empty"),
            Self::InvalidFormat => {
                write!(f, "invalid expiry format (expected MM/YY or MM/YYYY)")
            }
            Self::InvalidMonth(m) => write!(f, "invalid month {}: must be 1-12", m),
            Self::Expired { month, year } => write!(f, "card expired ({:02}/{})", month, year),
            Self::TooFarFuture { year, max_year } => {
                write!(
                    f,
                    "expiry year {} is too far in the future (max: {})",
                    year, max_year
                )
            }
        }
    }
}

impl std::error::Error for ExpiryError {}

/// Parses `MM/YY` or `MM/YYYY`. Two-digit years are taken as 20YY.
///
/// # Example
///
/// ```
/// use cardform::expiry::parse_expiry;
///
/// let expiry = parse_expiry("01/2030").unwrap();
/// assert_eq!((expiry.month(), expiry.year()), (1, 2030));
/// ```
pub fn parse_expiry(input: &str) -> Result<ExpiryDate, ExpiryError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ExpiryError::Empty);
    }

    let (month_str, year_str) = input.split_once('/').ok_or(ExpiryError::InvalidFormat)?;
    let (month_str, year_str) = (month_str.trim(), year_str.trim());

    if !matches!(month_str.len(), 1 | 2) || !month_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExpiryError::InvalidFormat);
    }
    if !year_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExpiryError::InvalidFormat);
    }

    let month: u8 = month_str.parse().map_err(|_| ExpiryError::InvalidFormat)?;
    let year: u16 = match year_str.len() {
        2 => 2000 + year_str.parse::<u16>().map_err(|_| ExpiryError::InvalidFormat)?,
        4 => year_str.parse().map_err(|_| ExpiryError::InvalidFormat)?,
        _ => return Err(ExpiryError::InvalidFormat),
    };

    ExpiryDate::new(month, year)
}

/// Parses an expiry date and checks it against the picker window as of
/// `year`/`month`.
pub fn validate_expiry_at(input: &str, year: u16, month: u8) -> Result<ExpiryDate, ExpiryError> {
    let expiry = parse_expiry(input)?;

    if expiry.is_expired_at(year, month) {
        return Err(ExpiryError::Expired {
            month: expiry.month,
            year: expiry.year,
        });
    }

    let max_year = year + PICKER_YEARS - 1;
    if expiry.year > max_year {
        return Err(ExpiryError::TooFarFuture {
            year: expiry.year,
            max_year,
        });
    }

    Ok(expiry)
}

/// Parses an expiry date and checks it against the picker window as of
/// today (UTC).
///
/// # Example
///
/// ```
/// use cardform::expiry::validate_expiry;
///
/// assert!(validate_expiry("01/20").is_err());
/// ```
pub fn validate_expiry(input: &str) -> Result<ExpiryDate, ExpiryError> {
    let (year, month) = current_year_month();
    validate_expiry_at(input, year, month)
}

/// Months the picker offers for `picker_year` when today is
/// `year`/`month`: the rest of this year, or all twelve later on.
pub fn selectable_months(picker_year: u16, year: u16, month: u8) -> std::ops::RangeInclusive<u8> {
    if picker_year == year {
        month..=12
    } else {
        1..=12
    }
}

/// Current UTC year and month.
pub fn current_year_month() -> (u16, u8) {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let (year, month) = civil_from_days((secs / 86_400) as i64);
    (year as u16, month)
}

/// Converts days since 1970-01-01 to a proleptic Gregorian year and month.
fn civil_from_days(days: i64) -> (i64, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month as u8)
}
