//! JSON payloads exchanged around tokenization.
//!
//! The form never hands card details to the merchant. It posts a
//! [`TokenRequest`] to the tokenization endpoint, reads back a
//! [`TokenResponse`], and reports a [`CheckoutResult`] carrying the token
//! instead of the card.
//!
//! ```json
//! {"number":"4012888888881881","expiry_month":"06","expiry_year":"30","cvd":"123"}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::address::{Address, AddressSlots};
use crate::card::CardNumber;
use crate::config::CheckoutConfig;
use crate::cvv::{validate_cvv_for_brand, CvvError, ValidatedCvv};
use crate::error::ValidationError;
use crate::expiry::{current_year_month, validate_expiry_at, ExpiryDate, ExpiryError};
use crate::mask::mask_string;
use crate::validate::check;

/// Reasons a payload could not be built or read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// The card number was rejected.
    Card(ValidationError),
    /// The security code was rejected.
    Cvv(CvvError),
    /// The expiry date was rejected.
    Expiry(ExpiryError),
    /// A value the checkout requires was never collected.
    MissingField(&'static str),
    /// The JSON could not be produced or parsed.
    Json(String),
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card(e) => write!(f, "card number rejected: {}", e),
            Self::Cvv(e) => write!(f, "CVV rejected: {}", e),
            Self::Expiry(e) => write!(f, "expiry date rejected: {}", e),
            Self::MissingField(name) => write!(f, "missing required field: {}", name),
            Self::Json(msg) => write!(f, "JSON error: {}", msg),
        }
    }
}

impl std::error::Error for PayloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Card(e) => Some(e),
            Self::Cvv(e) => Some(e),
            Self::Expiry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for PayloadError {
    fn from(e: ValidationError) -> Self {
        Self::Card(e)
    }
}

impl From<CvvError> for PayloadError {
    fn from(e: CvvError) -> Self {
        Self::Cvv(e)
    }
}

impl From<ExpiryError> for PayloadError {
    fn from(e: ExpiryError) -> Self {
        Self::Expiry(e)
    }
}

impl From<serde_json::Error> for PayloadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

/// Body of the tokenization request.
///
/// All fields are zeroed when the request is dropped.
#[derive(Clone, PartialEq, Eq, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct TokenRequest {
    number: String,
    expiry_month: String,
    expiry_year: String,
    cvd: String,
}

impl TokenRequest {
    /// Builds a request from parts that were already checked.
    pub fn from_parts(card: &CardNumber, expiry: ExpiryDate, cvv: &ValidatedCvv) -> Self {
        let request = Self {
            number: card.number(),
            expiry_month: expiry.expiry_month(),
            expiry_year: expiry.expiry_year_short(),
            cvd: cvv.as_str(),
        };
        debug!(
            number = %card.masked(),
            brand = %card.brand(),
            expiry = %expiry,
            "token request assembled"
        );
        request
    }

    /// Checks the raw field values as of `year`/`month` and builds a request.
    ///
    /// # Example
    ///
    /// ```
    /// use cardform::payload::TokenRequest;
    ///
    /// let request = TokenRequest::new_at("4012 8888 8888 1881", "06/16", "123", 2016, 6).unwrap();
    /// assert_eq!(
    ///     request.to_json().unwrap(),
    ///     r#"{"number":"4012888888881881","expiry_month":"06","expiry_year":"16","cvd":"123"}"#
    /// );
    /// ```
    pub fn new_at(
        card_number: &str,
        expiry: &str,
        cvv: &str,
        year: u16,
        month: u8,
    ) -> Result<Self, PayloadError> {
        let card = check(card_number)?;
        let expiry = validate_expiry_at(expiry, year, month)?;
        let cvv = validate_cvv_for_brand(cvv, card.brand())?;
        Ok(Self::from_parts(&card, expiry, &cvv))
    }

    /// Checks the raw field values as of today and builds a request.
    pub fn new(card_number: &str, expiry: &str, cvv: &str) -> Result<Self, PayloadError> {
        let (year, month) = current_year_month();
        Self::new_at(card_number, expiry, cvv, year, month)
    }

    /// Two-digit expiry month.
    pub fn expiry_month(&self) -> &str {
        &self.expiry_month
    }

    /// Two-digit expiry year.
    pub fn expiry_year(&self) -> &str {
        &self.expiry_year
    }

    /// Serializes the request body.
    pub fn to_json(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRequest")
            .field("number", &mask_string(&self.number))
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvd", &"***")
            .finish()
    }
}

/// Body of a successful tokenization response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// One-time token standing in for the card.
    pub token: String,
}

impl TokenResponse {
    /// Parses a response body. Fields other than `token` are ignored.
    pub fn from_json(body: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Token plus the cardholder details the form collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInfo {
    /// Token from the tokenization response.
    pub code: String,
    /// Cardholder name, empty if not collected.
    pub name: String,
    /// Email address, empty if not collected.
    pub email: String,
}

/// What the checkout reports to the embedding app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResult {
    /// Token and cardholder details.
    pub card_info: CardInfo,
    /// Shipping address, if collected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
    /// Billing address, if collected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
}

impl CheckoutResult {
    /// Assembles the result, failing if the configuration requires an
    /// address the slots do not hold.
    ///
    /// # Example
    ///
    /// ```
    /// use cardform::address::AddressSlots;
    /// use cardform::config::CheckoutConfig;
    /// use cardform::payload::{CheckoutResult, TokenResponse};
    ///
    /// let config = CheckoutConfig::new()
    ///     .shipping_address_required(false)
    ///     .billing_address_required(false);
    /// let token = TokenResponse { token: "tok_123".into() };
    /// let result = CheckoutResult::assemble(&token, "Jane", "jane@example.com", &AddressSlots::new(), &config).unwrap();
    /// assert_eq!(
    ///     result.to_json().unwrap(),
    ///     r#"{"cardInfo":{"code":"tok_123","name":"Jane","email":"jane@example.com"}}"#
    /// );
    /// ```
    pub fn assemble(
        token: &TokenResponse,
        name: &str,
        email: &str,
        slots: &AddressSlots,
        config: &CheckoutConfig,
    ) -> Result<Self, PayloadError> {
        if config.shipping_address_required && slots.shipping().is_none() {
            return Err(PayloadError::MissingField("shippingAddress"));
        }
        if config.billing_address_required && slots.billing().is_none() {
            return Err(PayloadError::MissingField("billingAddress"));
        }

        Ok(Self {
            card_info: CardInfo {
                code: token.token.clone(),
                name: name.to_string(),
                email: email.to_string(),
            },
            shipping_address: slots.shipping().cloned(),
            billing_address: slots.billing().cloned(),
        })
    }

    /// Serializes the result.
    pub fn to_json(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string(self)?)
    }
}
