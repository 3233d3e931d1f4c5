//! Shipping and billing addresses.
//!
//! Every field is required. When the user keeps "billing same as shipping"
//! switched on, storing the shipping address fills the billing slot too.

use std::fmt;

use crate::config::CheckoutConfig;

/// Which address a form is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum AddressType {
    /// Where the goods go.
    Shipping,
    /// Where the card statement goes.
    Billing,
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shipping => write!(f, "Shipping"),
            Self::Billing => write!(f, "Billing"),
        }
    }
}

/// A postal address.
///
/// Serialized with the field names the checkout result uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    /// Recipient name.
    pub name: String,
    /// Street line.
    #[cfg_attr(feature = "json", serde(rename = "address_line1"))]
    pub street: String,
    /// Postal or ZIP code.
    pub postal_code: String,
    /// City.
    pub city: String,
    /// Province or state.
    pub province: String,
    /// Country.
    pub country: String,
}

/// One input of the address form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    /// Recipient name.
    Name,
    /// Street line.
    Street,
    /// Postal or ZIP code.
    PostalCode,
    /// City.
    City,
    /// Province or state.
    Province,
    /// Country.
    Country,
}

impl AddressField {
    /// Every field, in form order.
    pub const ALL: [AddressField; 6] = [
        Self::Name,
        Self::Street,
        Self::PostalCode,
        Self::City,
        Self::Province,
        Self::Country,
    ];

    /// Field label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Street => "Street",
            Self::PostalCode => "Postal Code",
            Self::City => "City",
            Self::Province => "Province",
            Self::Country => "Country",
        }
    }
}

impl Address {
    /// Creates an empty address.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder method to set the street line.
    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.street = street.into();
        self
    }

    /// Builder method to set the postal code.
    pub fn postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = postal_code.into();
        self
    }

    /// Builder method to set the city.
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    /// Builder method to set the province.
    pub fn province(mut self, province: impl Into<String>) -> Self {
        self.province = province.into();
        self
    }

    /// Builder method to set the country.
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Value of one field.
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::Name => &self.name,
            AddressField::Street => &self.street,
            AddressField::PostalCode => &self.postal_code,
            AddressField::City => &self.city,
            AddressField::Province => &self.province,
            AddressField::Country => &self.country,
        }
    }

    /// Fields that are empty or whitespace only, in form order.
    pub fn missing_fields(&self) -> Vec<AddressField> {
        AddressField::ALL
            .into_iter()
            .filter(|&field| self.get(field).trim().is_empty())
            .collect()
    }

    /// Returns true if every field has a value.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// The addresses collected during one checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSlots {
    shipping: Option<Address>,
    billing: Option<Address>,
}

impl AddressSlots {
    /// Creates empty slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the address a form collected.
    ///
    /// A shipping address also becomes the billing address when
    /// `billing_same_as_shipping` is set. A billing address only fills its
    /// own slot.
    pub fn store(&mut self, kind: AddressType, address: Address, billing_same_as_shipping: bool) {
        match kind {
            AddressType::Shipping => {
                if billing_same_as_shipping {
                    self.billing = Some(address.clone());
                }
                self.shipping = Some(address);
            }
            AddressType::Billing => self.billing = Some(address),
        }
    }

    /// The shipping address, if collected.
    pub fn shipping(&self) -> Option<&Address> {
        self.shipping.as_ref()
    }

    /// The billing address, if collected.
    pub fn billing(&self) -> Option<&Address> {
        self.billing.as_ref()
    }

    /// Address previously stored for a slot, used to prefill its form.
    pub fn get(&self, kind: AddressType) -> Option<&Address> {
        match kind {
            AddressType::Shipping => self.shipping(),
            AddressType::Billing => self.billing(),
        }
    }

    /// Forgets both addresses.
    pub fn clear(&mut self) {
        self.shipping = None;
        self.billing = None;
    }
}

/// Returns true if the form should show the "billing same as shipping"
/// switch: only on the shipping form, and only when a billing address is
/// required at all.
pub fn offers_billing_same_skip(kind: AddressType, config: &CheckoutConfig) -> bool {
    kind == AddressType::Shipping && config.billing_address_required
}
