//! Cart pricing calculations.
//!
//! Order of operations is fixed: the promo discount comes off the
//! merchandise subtotal, tax is charged on what remains, and shipping is
//! added last without tax.

use crate::cart::{CartState, LineItem, PromoTable, ShippingMethod};
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Tax rate applied to the discounted merchandise subtotal.
pub const TAX_RATE: f64 = 0.19;

/// Flat shipping rates and the tax rate, in the store's base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    pub currency: Currency,
    pub standard_shipping: Money,
    pub express_shipping: Money,
    pub tax_rate: f64,
}

impl PricingPolicy {
    /// The store's rate table, displayed in `currency`.
    pub fn for_currency(currency: Currency) -> Self {
        Self {
            currency,
            standard_shipping: Money::new(650, currency),
            express_shipping: Money::new(1800, currency),
            tax_rate: TAX_RATE,
        }
    }

    /// Flat rate for a shipping method.
    pub fn shipping_rate(&self, method: ShippingMethod) -> Money {
        match method {
            ShippingMethod::Standard => self.standard_shipping,
            ShippingMethod::Express => self.express_shipping,
        }
    }

    pub fn zero(&self) -> Money {
        Money::zero(self.currency)
    }

    /// Sum of `unit_price * quantity` over all lines.
    pub fn subtotal(&self, cart: &CartState) -> Money {
        cart.items
            .iter()
            .map(LineItem::line_total)
            .fold(self.zero(), |acc, m| acc + m)
    }

    /// Active promo rate, or 0 without a recognized promo.
    pub fn promo_rate(&self, cart: &CartState, promotions: &PromoTable) -> f64 {
        cart.promo_code
            .as_deref()
            .and_then(|code| promotions.rate(code))
            .unwrap_or(0.0)
    }

    /// Proportional discount: `subtotal * rate`.
    pub fn discount(&self, cart: &CartState, promotions: &PromoTable) -> Money {
        self.totals(cart, promotions).discount
    }

    /// Flat rate for the chosen method; nothing to ship means no charge.
    pub fn shipping_total(&self, cart: &CartState) -> Money {
        if cart.is_empty() {
            return self.zero();
        }
        self.shipping_rate(cart.shipping_method)
    }

    /// `max(subtotal - discount, 0) * tax_rate`. Shipping is not taxed.
    pub fn tax(&self, cart: &CartState, promotions: &PromoTable) -> Money {
        self.totals(cart, promotions).tax
    }

    /// `subtotal - discount + shipping + tax`.
    pub fn total(&self, cart: &CartState, promotions: &PromoTable) -> Money {
        self.totals(cart, promotions).grand
    }

    /// Compute the full breakdown in one pass.
    pub fn price(&self, cart: &CartState, promotions: &PromoTable) -> CartPricing {
        let line_items: Vec<LineItemPricing> = cart
            .items
            .iter()
            .map(|item| LineItemPricing {
                product_id: item.product_id.clone(),
                unit_price: item.unit_price,
                quantity: item.quantity,
                line_total: item.line_total(),
            })
            .collect();

        let totals = self.totals(cart, promotions);

        CartPricing {
            subtotal: totals.subtotal,
            discount_total: totals.discount,
            shipping_total: totals.shipping,
            tax_total: totals.tax,
            grand_total: totals.grand,
            promo_code: cart.promo_code.clone().filter(|c| promotions.contains(c)),
            promo_rate: totals.promo_rate,
            shipping_method: cart.shipping_method,
            item_count: cart.item_count(),
            line_items,
        }
    }

    /// The single place the pricing order is applied.
    fn totals(&self, cart: &CartState, promotions: &PromoTable) -> Totals {
        let subtotal = self.subtotal(cart);
        let promo_rate = self.promo_rate(cart, promotions);
        let discount = if promo_rate == 0.0 {
            self.zero()
        } else {
            subtotal.multiply_rate(promo_rate)
        };
        let shipping = self.shipping_total(cart);
        let tax = (subtotal - discount).max_zero().multiply_rate(self.tax_rate);

        Totals {
            subtotal,
            promo_rate,
            discount,
            shipping,
            tax,
            grand: subtotal - discount + shipping + tax,
        }
    }
}

struct Totals {
    subtotal: Money,
    promo_rate: f64,
    discount: Money,
    shipping: Money,
    tax: Money,
    grand: Money,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::for_currency(Currency::default())
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Subtotal before discounts.
    pub subtotal: Money,
    /// Promo discount.
    pub discount_total: Money,
    /// Shipping cost.
    pub shipping_total: Money,
    /// Tax amount.
    pub tax_total: Money,
    /// Final total (subtotal - discount + shipping + tax).
    pub grand_total: Money,
    /// Promo code that produced the discount.
    pub promo_code: Option<String>,
    pub promo_rate: f64,
    pub shipping_method: ShippingMethod,
    /// Total units in the cart.
    pub item_count: i64,
    /// Per-line breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Check if a discount is applied.
    pub fn has_discount(&self) -> bool {
        self.discount_total.amount_cents > 0
    }

    /// Merchandise after discount; the tax base.
    pub fn taxable_amount(&self) -> Money {
        (self.subtotal - self.discount_total).max_zero()
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    pub product_id: ProductId,
    pub unit_price: Money,
    pub quantity: i64,
    /// `unit_price * quantity`.
    pub line_total: Money,
}
