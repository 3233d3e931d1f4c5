//! Form-level checks for the payment and address screens.
//!
//! A check returns every message the form should show, in display order,
//! and the fields whose borders should turn red.

use std::fmt;

use tracing::debug;
use zeroize::Zeroizing;

use crate::address::{Address, AddressField};
use crate::cvv::cvv_length_for_brand;
use crate::detect::detect_brand;
use crate::email;
use crate::validate::diagnose;

/// A message shown under a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormMessage {
    /// The email field holds something that is not an address.
    InvalidEmail,
    /// At least one field is blank.
    FillAllFields,
    /// The card number has fewer digits than its brand needs.
    CardTooShort,
    /// The card number is complete but not valid.
    CardInvalid,
    /// The CVV has fewer digits than the card's brand needs.
    CvvTooShort,
}

impl FormMessage {
    /// Text shown to the user.
    pub const fn text(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "Please enter a valid email address.",
            Self::FillAllFields => "Please fill all fields.",
            Self::CardTooShort => "Please enter a valid credit card number. The number entered is too short.",
            Self::CardInvalid => "Please enter a valid credit card number.",
            Self::CvvTooShort => "Please enter a valid CVV number. The number entered is too short.",
        }
    }
}

impl fmt::Display for FormMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Outcome of checking a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormReport<F> {
    /// Messages in display order.
    pub messages: Vec<FormMessage>,
    /// Fields to highlight, each listed once.
    pub highlighted: Vec<F>,
}

impl<F: PartialEq> FormReport<F> {
    fn new() -> Self {
        Self {
            messages: Vec::new(),
            highlighted: Vec::new(),
        }
    }

    fn highlight(&mut self, field: F) {
        if !self.highlighted.contains(&field) {
            self.highlighted.push(field);
        }
    }

    /// Returns true if the form may be submitted.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns true if `field` should be highlighted.
    pub fn is_highlighted(&self, field: F) -> bool {
        self.highlighted.contains(&field)
    }
}

/// Inputs of the payment screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentField {
    /// Cardholder name.
    Name,
    /// Email address.
    Email,
    /// Card number.
    CardNumber,
    /// Expiry date.
    Expiry,
    /// Security code.
    Cvv,
}

impl PaymentField {
    /// Every field, in form order.
    pub const ALL: [PaymentField; 5] = [
        Self::Name,
        Self::Email,
        Self::CardNumber,
        Self::Expiry,
        Self::Cvv,
    ];
}

/// Raw contents of the payment screen.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PaymentForm {
    /// Cardholder name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Card number as displayed, spaces included.
    pub card_number: String,
    /// Expiry date as displayed.
    pub expiry: String,
    /// Security code.
    pub cvv: String,
}

impl fmt::Debug for PaymentForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("card_number", &crate::mask::mask_string(&self.card_number))
            .field("expiry", &self.expiry)
            .field("cvv", &"***")
            .finish()
    }
}

impl PaymentForm {
    /// Value of one field.
    pub fn get(&self, field: PaymentField) -> &str {
        match field {
            PaymentField::Name => &self.name,
            PaymentField::Email => &self.email,
            PaymentField::CardNumber => &self.card_number,
            PaymentField::Expiry => &self.expiry,
            PaymentField::Cvv => &self.cvv,
        }
    }

    /// Checks the form before the token request is made.
    ///
    /// Message order: an invalid email always comes first, then "fill all
    /// fields" (once, whatever the number of blank fields), then the card
    /// number message, then the CVV message. The CVV length follows the
    /// brand guessed from the card number's first four digits, spaces
    /// ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use cardform::form::{FormMessage, PaymentField, PaymentForm};
    ///
    /// let form = PaymentForm {
    ///     name: "Jane Doe".into(),
    ///     email: "jane".into(),
    ///     card_number: "4012 8888".into(),
    ///     expiry: String::new(),
    ///     cvv: "12".into(),
    /// };
    /// let report = form.check();
    /// assert_eq!(
    ///     report.messages,
    ///     vec![
    ///         FormMessage::InvalidEmail,
    ///         FormMessage::FillAllFields,
    ///         FormMessage::CardTooShort,
    ///         FormMessage::CvvTooShort,
    ///     ]
    /// );
    /// assert!(report.is_highlighted(PaymentField::Expiry));
    /// ```
    pub fn check(&self) -> FormReport<PaymentField> {
        let mut report = FormReport::new();

        for field in PaymentField::ALL {
            if self.get(field).trim().is_empty() {
                if report.messages.is_empty() {
                    report.messages.push(FormMessage::FillAllFields);
                }
                report.highlight(field);
            }
        }

        if !self.email.is_empty() && !email::validate(&self.email) {
            report.messages.insert(0, FormMessage::InvalidEmail);
            report.highlight(PaymentField::Email);
        }

        let digits: Zeroizing<String> =
            Zeroizing::new(self.card_number.chars().filter(|&c| c != ' ').collect());
        let brand = detect_brand(&digits);

        if !self.card_number.is_empty() {
            if let Some(issue) = diagnose(&self.card_number) {
                report.messages.push(if issue.is_too_short() {
                    FormMessage::CardTooShort
                } else {
                    FormMessage::CardInvalid
                });
                report.highlight(PaymentField::CardNumber);
            }
        }

        if !self.cvv.is_empty() && self.cvv.chars().count() < cvv_length_for_brand(brand) {
            report.messages.push(FormMessage::CvvTooShort);
            report.highlight(PaymentField::Cvv);
        }

        debug!(
            messages = report.messages.len(),
            highlighted = report.highlighted.len(),
            %brand,
            "payment form checked"
        );

        report
    }
}

/// Checks an address screen: every field must be filled in.
///
/// # Example
///
/// ```
/// use cardform::address::{Address, AddressField};
/// use cardform::form::{check_address, FormMessage};
///
/// let report = check_address(&Address::new().name("Jane Doe"));
/// assert_eq!(report.messages, vec![FormMessage::FillAllFields]);
/// assert!(!report.is_highlighted(AddressField::Name));
/// assert!(report.is_highlighted(AddressField::Country));
/// ```
pub fn check_address(address: &Address) -> FormReport<AddressField> {
    let mut report = FormReport::new();
    for field in address.missing_fields() {
        report.highlight(field);
    }
    if !report.highlighted.is_empty() {
        report.messages.push(FormMessage::FillAllFields);
    }
    report
}
