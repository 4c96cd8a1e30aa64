//! The cart engine.
//!
//! [`CartEngine`] owns the cart state for one shopper, writes it through a
//! [`CartRepository`] after every mutation and answers the pricing queries
//! the cart page, the drawer and checkout render from.

use tracing::{debug, warn};

use crate::cart::{
    normalize_code, CartPricing, CartSnapshot, CartState, LineItem, NewLineItem, PricingPolicy,
    PromoOutcome, PromoTable, ShippingMethod,
};
use crate::catalog::ProductLookup;
use crate::checkout::{CheckoutDetails, OrderReceipt};
use crate::ids::ProductId;
use crate::money::Money;
use crate::repository::CartRepository;
use crate::CommerceError;

/// A cart line paired with what the catalog currently knows about it.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayLine<'a> {
    pub item: &'a LineItem,
    /// Current product slug, for linking. `None` once the product left the
    /// catalog.
    pub slug: Option<&'a str>,
    /// Captured unit price times quantity.
    pub line_total: Money,
}

/// Cart state plus its persistence and pricing configuration.
#[derive(Debug)]
pub struct CartEngine<R: CartRepository> {
    state: CartState,
    repository: R,
    promotions: PromoTable,
    policy: PricingPolicy,
    last_persist_error: Option<String>,
}

impl<R: CartRepository> CartEngine<R> {
    /// Load the cart with the default promotions and EUR pricing.
    pub fn load(repository: R) -> Self {
        Self::with_config(repository, PromoTable::default(), PricingPolicy::default())
    }

    /// Load the cart with explicit promotions and pricing.
    ///
    /// Missing or unreadable stored state yields an empty cart.
    pub fn with_config(repository: R, promotions: PromoTable, policy: PricingPolicy) -> Self {
        let state = read_state(&repository, &promotions, &policy);
        Self {
            state,
            repository,
            promotions,
            policy,
            last_persist_error: None,
        }
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn items(&self) -> &[LineItem] {
        &self.state.items
    }

    pub fn promo_code(&self) -> Option<&str> {
        self.state.promo_code.as_deref()
    }

    pub fn shipping_method(&self) -> ShippingMethod {
        self.state.shipping_method
    }

    pub fn promotions(&self) -> &PromoTable {
        &self.promotions
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Error message of the most recent failed save, cleared by the next
    /// successful one.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    // Mutations

    /// Add `quantity` units of `item`. Non-positive quantities are ignored.
    pub fn add(&mut self, item: NewLineItem, quantity: i64) {
        let product_id = item.product_id.clone();
        let changed = self.state.add_item(item, quantity);
        debug!(product_id = %product_id, quantity, changed, "add to cart");
        self.persist();
    }

    /// Remove a line. Unknown IDs are ignored.
    pub fn remove(&mut self, product_id: &ProductId) {
        let changed = self.state.remove_item(product_id);
        debug!(product_id = %product_id, changed, "remove from cart");
        self.persist();
    }

    /// Set a line's quantity; `quantity <= 0` removes the line.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        let changed = self.state.set_quantity(product_id, quantity);
        debug!(product_id = %product_id, quantity, changed, "set quantity");
        self.persist();
    }

    /// Empty the cart, drop the promo and go back to standard shipping.
    pub fn clear(&mut self) {
        self.state.clear();
        debug!("cart cleared");
        self.persist();
    }

    pub fn set_shipping_method(&mut self, method: ShippingMethod) {
        self.state.shipping_method = method;
        debug!(method = method.as_str(), "shipping method set");
        self.persist();
    }

    /// Apply, replace or clear the promo code.
    ///
    /// The code is trimmed and upper-cased. A blank code clears the promo.
    /// An unrecognized code fails and leaves the cart untouched.
    pub fn apply_promo_code(&mut self, code: &str) -> PromoOutcome {
        let normalized = normalize_code(code);

        if normalized.is_empty() {
            self.state.promo_code = None;
            debug!("promo cleared");
            self.persist();
            return PromoOutcome::cleared();
        }

        match self.promotions.rate(&normalized) {
            Some(rate) => {
                debug!(code = %normalized, rate, "promo applied");
                self.state.promo_code = Some(normalized);
                self.persist();
                PromoOutcome::applied(rate)
            }
            None => {
                debug!(code = %normalized, "promo rejected");
                PromoOutcome::not_recognized()
            }
        }
    }

    // Derived queries

    pub fn subtotal(&self) -> Money {
        self.policy.subtotal(&self.state)
    }

    pub fn discount(&self) -> Money {
        self.policy.discount(&self.state, &self.promotions)
    }

    pub fn shipping_total(&self) -> Money {
        self.policy.shipping_total(&self.state)
    }

    pub fn tax(&self) -> Money {
        self.policy.tax(&self.state, &self.promotions)
    }

    pub fn total(&self) -> Money {
        self.policy.total(&self.state, &self.promotions)
    }

    /// Full pricing breakdown.
    pub fn pricing(&self) -> CartPricing {
        self.policy.price(&self.state, &self.promotions)
    }

    /// Total units in the cart, as shown on the cart badge.
    pub fn item_count(&self) -> i64 {
        self.state.item_count()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    // Cross-tab sync

    /// Replace the in-memory cart with whatever is stored now.
    ///
    /// The stored cart wins outright; nothing is merged.
    pub fn reload(&mut self) {
        self.state = read_state(&self.repository, &self.promotions, &self.policy);
        debug!(items = self.state.unique_item_count(), "cart reloaded");
    }

    /// React to a storage change notification. Reloads and returns `true`
    /// when `key` is the key this cart is stored under.
    pub fn handle_storage_change(&mut self, key: &str) -> bool {
        if key != self.repository.storage_key() {
            return false;
        }
        self.reload();
        true
    }

    /// Pair each line with the product's current catalog entry.
    ///
    /// Prices and titles always come from the cart line.
    pub fn display_lines<'a, L: ProductLookup>(&'a self, lookup: &'a L) -> Vec<DisplayLine<'a>> {
        self.state
            .items
            .iter()
            .map(|item| DisplayLine {
                item,
                slug: lookup.find(&item.product_id).map(|p| p.slug.as_str()),
                line_total: item.line_total(),
            })
            .collect()
    }

    // Checkout

    /// Place a simulated order.
    ///
    /// Validates `details`, snapshots the lines and totals into a receipt
    /// and clears the cart. No payment is taken.
    pub fn submit_order(&mut self, details: CheckoutDetails) -> Result<OrderReceipt, CommerceError> {
        if self.state.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        details.validate()?;

        let receipt = OrderReceipt::new(details, &self.state.items, self.pricing());
        debug!(
            order_id = %receipt.id,
            total_cents = receipt.grand_total.amount_cents,
            "order placed"
        );
        self.clear();
        Ok(receipt)
    }

    fn persist(&mut self) {
        let snapshot = CartSnapshot::from_state(&self.state);
        match self.repository.save(&snapshot) {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                warn!(error = %e, key = self.repository.storage_key(), "failed to persist cart");
                self.last_persist_error = Some(e.to_string());
            }
        }
    }
}

/// Read and sanitize stored state, falling back to the empty cart.
fn read_state<R: CartRepository>(
    repository: &R,
    promotions: &PromoTable,
    policy: &PricingPolicy,
) -> CartState {
    let snapshot = match repository.load() {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => return CartState::default(),
        Err(e) => {
            warn!(
                error = %e,
                key = repository.storage_key(),
                "stored cart is unreadable, starting empty"
            );
            return CartState::default();
        }
    };

    let mut state = snapshot.into_state(policy.currency);
    let corrections = state.sanitize(promotions);
    if corrections > 0 {
        warn!(corrections, "stored cart had invalid entries, corrected");
    }
    state
}
