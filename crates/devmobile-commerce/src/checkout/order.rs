//! Checkout details and the simulated order receipt.

use crate::cart::{CartPricing, LineItem, ShippingMethod};
use crate::checkout::Address;
use crate::ids::{OrderId, ProductId};
use crate::money::Money;
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// How the shopper says they will pay. Nothing is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    Paypal,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Paypal => "paypal",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit card",
            PaymentMethod::Paypal => "PayPal",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "paypal" => Ok(PaymentMethod::Paypal),
            _ => Err(CommerceError::CheckoutIncomplete(format!(
                "payment method (unknown: {s})"
            ))),
        }
    }
}

/// Contact and delivery information collected by the checkout form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDetails {
    pub email: String,
    pub shipping_address: Address,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl CheckoutDetails {
    /// Check required fields.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(CommerceError::CheckoutIncomplete("email".to_string()));
        }
        if !email.contains('@') {
            return Err(CommerceError::CheckoutIncomplete(format!(
                "valid email (got {email})"
            )));
        }
        if let Some(field) = self.shipping_address.missing_field() {
            return Err(CommerceError::CheckoutIncomplete(field.to_string()));
        }
        Ok(())
    }
}

/// Status of a simulated order. Orders are never processed further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Placed,
}

/// A line as it was when the order was placed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLineItem {
    pub product_id: ProductId,
    pub title: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub total_price: Money,
    pub image_url: String,
}

impl From<&LineItem> for OrderLineItem {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            title: item.title.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price: item.line_total(),
            image_url: item.image_url.clone(),
        }
    }
}

/// Confirmation of a simulated order: the cart contents and totals at the
/// moment of submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderReceipt {
    pub id: OrderId,
    pub status: OrderStatus,
    pub email: String,
    pub shipping_address: Address,
    pub payment_method: PaymentMethod,
    pub shipping_method: ShippingMethod,
    pub promo_code: Option<String>,
    pub line_items: Vec<OrderLineItem>,
    pub subtotal: Money,
    pub discount_total: Money,
    pub shipping_total: Money,
    pub tax_total: Money,
    pub grand_total: Money,
    /// Unix timestamp of submission.
    pub placed_at: i64,
}

impl OrderReceipt {
    pub(crate) fn new(details: CheckoutDetails, items: &[LineItem], pricing: CartPricing) -> Self {
        Self {
            id: OrderId::generate(),
            status: OrderStatus::Placed,
            email: details.email.trim().to_string(),
            shipping_address: details.shipping_address,
            payment_method: details.payment_method,
            shipping_method: pricing.shipping_method,
            promo_code: pricing.promo_code,
            line_items: items.iter().map(OrderLineItem::from).collect(),
            subtotal: pricing.subtotal,
            discount_total: pricing.discount_total,
            shipping_total: pricing.shipping_total,
            tax_total: pricing.tax_total,
            grand_total: pricing.grand_total,
            placed_at: current_timestamp(),
        }
    }

    /// Get total item count.
    pub fn item_count(&self) -> i64 {
        self.line_items.iter().map(|i| i.quantity).sum()
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            email: "ada@example.com".to_string(),
            shipping_address: Address::new(
                "Ada", "Lovelace", "Torstr. 1", "Berlin", "10119", "Germany",
            ),
            payment_method: PaymentMethod::Paypal,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(details().validate().is_ok());
    }

    #[test]
    fn test_validate_email() {
        let mut d = details();
        d.email = "  ".to_string();
        assert!(matches!(
            d.validate(),
            Err(CommerceError::CheckoutIncomplete(field)) if field == "email"
        ));

        d.email = "not-an-email".to_string();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_validate_address() {
        let mut d = details();
        d.shipping_address.postal_code.clear();
        assert!(matches!(
            d.validate(),
            Err(CommerceError::CheckoutIncomplete(field)) if field == "postal code"
        ));
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!("PayPal".parse::<PaymentMethod>().unwrap(), PaymentMethod::Paypal);
        assert!("cash".parse::<PaymentMethod>().is_err());
    }
}
