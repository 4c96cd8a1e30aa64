//! Shopping cart module.
//!
//! Contains the cart state and line items, the pricing rules, promotion
//! codes, shipping methods and the persisted snapshot format.

mod cart;
mod pricing;
mod promo;
mod shipping;
mod snapshot;

pub use cart::{CartState, LineItem, NewLineItem};
pub use pricing::{CartPricing, LineItemPricing, PricingPolicy, TAX_RATE};
pub use promo::{
    normalize_code, PromoOutcome, PromoTable, DEFAULT_PROMO_CODE, DEFAULT_PROMO_RATE,
};
pub use shipping::ShippingMethod;
pub use snapshot::{CartSnapshot, LineItemSnapshot, PersistedCart, SNAPSHOT_VERSION, STORAGE_KEY};
