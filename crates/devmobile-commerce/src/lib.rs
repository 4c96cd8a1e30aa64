//! Cart pricing engine and storefront domain types for Dev Mobile.
//!
//! - **Cart**: line items, promo codes, shipping methods and pricing
//! - **Engine**: [`CartEngine`], the persisted cart a storefront renders from
//! - **Catalog**: the read-only product list used to build cart lines
//! - **Checkout**: simulated order submission
//!
//! Amounts are integer cents. Pricing works in a fixed order: promo
//! discount off the subtotal, 19% tax on the discounted subtotal, flat-rate
//! shipping added untaxed.
//!
//! # Example
//!
//! ```rust
//! use devmobile_commerce::prelude::*;
//!
//! let mut cart = CartEngine::load(MemoryCartRepository::new());
//! cart.add(
//!     NewLineItem::new("pixel-8", "Pixel 8", Money::new(100000, Currency::EUR), ""),
//!     1,
//! );
//! cart.apply_promo_code("promo10");
//!
//! let pricing = cart.pricing();
//! assert_eq!(pricing.discount_total.amount_cents, 10000);
//! assert_eq!(pricing.tax_total.amount_cents, 17100);
//! assert_eq!(pricing.grand_total.amount_cents, 107750);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod engine;
pub mod repository;

pub use engine::{CartEngine, DisplayLine};
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::engine::{CartEngine, DisplayLine};
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{format_percent, Currency, Money};

    // Cart
    pub use crate::cart::{
        CartPricing, CartState, LineItem, LineItemPricing, NewLineItem, PricingPolicy,
        PromoOutcome, PromoTable, ShippingMethod,
    };

    // Catalog
    pub use crate::catalog::{Catalog, Product, ProductCategory, ProductLookup};

    // Checkout
    pub use crate::checkout::{Address, CheckoutDetails, OrderReceipt, PaymentMethod};

    // Persistence
    #[cfg(feature = "storage")]
    pub use crate::repository::CacheCartRepository;
    pub use crate::repository::{CartRepository, MemoryCartRepository};
}
