//! Checkout configuration.
//!
//! The embedding app builds one [`CheckoutConfig`] per checkout and passes
//! it to whatever needs it. There is no process-wide session state.

use std::time::Duration;

/// Hosted endpoint that exchanges card details for a one-time token.
pub const DEFAULT_TOKENIZATION_URL: &str = "https://www.beanstream.com/scripts/tokenization/tokens";

/// How long the token request may take before the checkout gives up.
pub const DEFAULT_TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(6);

/// A screen of the checkout flow, ordered as the flow visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckoutStep {
    /// Shipping address form.
    ShippingAddress,
    /// Billing address form.
    BillingAddress,
    /// Card details form.
    Payment,
}

/// Settings for one checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Collect a shipping address before payment.
    pub shipping_address_required: bool,
    /// Collect a billing address before payment.
    pub billing_address_required: bool,
    /// Timeout for the token request.
    pub token_request_timeout: Duration,
    /// Token endpoint.
    pub tokenization_url: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            shipping_address_required: true,
            billing_address_required: true,
            token_request_timeout: DEFAULT_TOKEN_REQUEST_TIMEOUT,
            tokenization_url: DEFAULT_TOKENIZATION_URL.to_string(),
        }
    }
}

impl CheckoutConfig {
    /// Creates the default configuration: both addresses required.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set whether a shipping address is collected.
    pub fn shipping_address_required(mut self, required: bool) -> Self {
        self.shipping_address_required = required;
        self
    }

    /// Builder method to set whether a billing address is collected.
    pub fn billing_address_required(mut self, required: bool) -> Self {
        self.billing_address_required = required;
        self
    }

    /// Builder method to set the token request timeout.
    pub fn token_request_timeout(mut self, timeout: Duration) -> Self {
        self.token_request_timeout = timeout;
        self
    }

    /// Builder method to set the token endpoint.
    pub fn tokenization_url(mut self, url: impl Into<String>) -> Self {
        self.tokenization_url = url.into();
        self
    }

    /// Screens the user walks through, in order.
    ///
    /// The billing form is skipped when the shipping form collected the
    /// billing address too (`billing_same_as_shipping`). With no shipping
    /// form there is nothing to copy from, so billing gets its own screen.
    pub fn steps(&self, billing_same_as_shipping: bool) -> Vec<CheckoutStep> {
        let mut steps = Vec::with_capacity(3);
        if self.shipping_address_required {
            steps.push(CheckoutStep::ShippingAddress);
        }
        if self.billing_address_required && (!self.shipping_address_required || !billing_same_as_shipping) {
            steps.push(CheckoutStep::BillingAddress);
        }
        steps.push(CheckoutStep::Payment);
        steps
    }

    /// First screen of the flow.
    pub fn first_step(&self) -> CheckoutStep {
        if self.shipping_address_required {
            CheckoutStep::ShippingAddress
        } else if self.billing_address_required {
            CheckoutStep::BillingAddress
        } else {
            CheckoutStep::Payment
        }
    }

    /// Screen after `step`, or `None` after payment.
    ///
    /// `step` need not be one of `steps(billing_same_as_shipping)`: a
    /// billing screen reached before the switch was turned on still leads
    /// to payment.
    pub fn next_step(&self, step: CheckoutStep, billing_same_as_shipping: bool) -> Option<CheckoutStep> {
        self.steps(billing_same_as_shipping)
            .into_iter()
            .find(|&s| s > step)
    }
}
