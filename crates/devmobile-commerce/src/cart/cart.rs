//! Cart state and line item types.

use crate::cart::{PromoTable, ShippingMethod};
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// The payload of an add-to-cart action.
///
/// Title, price and image are captured here, at add time; the cart never
/// goes back to the catalog for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLineItem {
    pub product_id: ProductId,
    /// Display name, may include the selected options (e.g., "Pixel 8 (Hazel · 256 GB)").
    pub title: String,
    pub unit_price: Money,
    pub image_url: String,
}

impl NewLineItem {
    pub fn new(
        product_id: impl Into<ProductId>,
        title: impl Into<String>,
        unit_price: Money,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            title: title.into(),
            unit_price,
            image_url: image_url.into(),
        }
    }
}

/// A product line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product ID, unique within the cart.
    pub product_id: ProductId,
    /// Title captured at add time.
    pub title: String,
    /// Unit price captured at add time.
    pub unit_price: Money,
    /// Quantity, always at least 1.
    pub quantity: i64,
    /// Thumbnail reference.
    pub image_url: String,
}

impl LineItem {
    fn from_new(item: NewLineItem, quantity: i64) -> Self {
        Self {
            product_id: item.product_id,
            title: item.title,
            unit_price: item.unit_price,
            quantity,
            image_url: item.image_url,
        }
    }

    /// Extended price (`unit_price * quantity`).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// The cart aggregate: line items, the active promo and the shipping method.
///
/// Item operations here are pure state transitions; persistence and promo
/// validation live in [`crate::engine::CartEngine`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartState {
    /// Items in insertion order.
    pub items: Vec<LineItem>,
    /// Active promo code, upper-cased.
    pub promo_code: Option<String>,
    pub shipping_method: ShippingMethod,
}

impl CartState {
    /// An empty cart with no promo and standard shipping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of an item.
    ///
    /// An existing line keeps its captured title, price and image and only
    /// grows in quantity. Non-positive quantities are ignored so that no line
    /// ever holds less than one unit. Returns whether the cart changed.
    pub fn add_item(&mut self, item: NewLineItem, quantity: i64) -> bool {
        if quantity <= 0 {
            return false;
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == item.product_id)
        {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return true;
        }

        self.items.push(LineItem::from_new(item, quantity));
        true
    }

    /// Remove an item. Returns whether anything was removed.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        self.items.len() < len_before
    }

    /// Set an item's quantity; `quantity <= 0` removes the item.
    ///
    /// Unknown products are left alone. Returns whether the cart changed.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        match self.items.iter_mut().find(|i| &i.product_id == product_id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Reset to the empty cart: no items, no promo, standard shipping.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Total number of units (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_item(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Restore the cart invariants on state that came from outside
    /// (storage written by another version or another tab).
    ///
    /// Drops lines with a quantity below 1 or a negative price, folds
    /// duplicate product IDs into the first occurrence, normalizes the promo
    /// code and drops it if `promotions` does not recognize it. Returns the
    /// number of corrections made.
    pub fn sanitize(&mut self, promotions: &PromoTable) -> usize {
        let mut corrections = 0;
        let mut kept: Vec<LineItem> = Vec::with_capacity(self.items.len());

        for item in self.items.drain(..) {
            if item.quantity < 1 || item.unit_price.is_negative() {
                corrections += 1;
                continue;
            }
            match kept.iter_mut().find(|k| k.product_id == item.product_id) {
                Some(first) => {
                    first.quantity = first.quantity.saturating_add(item.quantity);
                    corrections += 1;
                }
                None => kept.push(item),
            }
        }
        self.items = kept;

        if let Some(code) = self.promo_code.take() {
            let normalized = crate::cart::normalize_code(&code);
            if promotions.contains(&normalized) {
                if normalized != code {
                    corrections += 1;
                }
                self.promo_code = Some(normalized);
            } else {
                corrections += 1;
            }
        }

        corrections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn phone() -> NewLineItem {
        NewLineItem::new(
            "p1",
            "Phone",
            Money::new(100000, Currency::EUR),
            "/img/p1.jpg",
        )
    }

    #[test]
    fn test_add_item() {
        let mut cart = CartState::new();
        assert!(cart.add_item(phone(), 2));
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.unique_item_count(), 1);
    }

    #[test]
    fn test_add_same_item_keeps_first_capture() {
        let mut cart = CartState::new();
        cart.add_item(phone(), 1);

        let mut repriced = phone();
        repriced.title = "Phone (renamed)".to_string();
        repriced.unit_price = Money::new(1, Currency::EUR);
        repriced.image_url = "/img/other.jpg".to_string();
        cart.add_item(repriced, 2);

        let item = cart.get_item(&ProductId::new("p1")).unwrap();
        assert_eq!(item.quantity, 3);
        assert_eq!(item.title, "Phone");
        assert_eq!(item.unit_price.amount_cents, 100000);
        assert_eq!(item.image_url, "/img/p1.jpg");
    }

    #[test]
    fn test_add_non_positive_is_ignored() {
        let mut cart = CartState::new();
        assert!(!cart.add_item(phone(), 0));
        assert!(!cart.add_item(phone(), -3));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = CartState::new();
        let id = ProductId::new("p1");
        cart.add_item(phone(), 1);

        assert!(cart.set_quantity(&id, 7));
        assert_eq!(cart.get_item(&id).unwrap().quantity, 7);

        assert!(cart.set_quantity(&id, 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_negative_removes() {
        let mut cart = CartState::new();
        cart.add_item(phone(), 4);
        cart.set_quantity(&ProductId::new("p1"), -1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unknown_product_is_noop() {
        let mut cart = CartState::new();
        cart.add_item(phone(), 1);
        let before = cart.clone();

        assert!(!cart.remove_item(&ProductId::new("nope")));
        assert!(!cart.set_quantity(&ProductId::new("nope"), 5));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cart = CartState::new();
        cart.add_item(phone(), 1);
        cart.promo_code = Some("PROMO10".to_string());
        cart.shipping_method = ShippingMethod::Express;

        cart.clear();
        assert_eq!(cart, CartState::default());
    }

    #[test]
    fn test_sanitize() {
        let mut cart = CartState::new();
        let line = |id: &str, qty: i64, cents: i64| LineItem {
            product_id: ProductId::new(id),
            title: id.to_string(),
            unit_price: Money::new(cents, Currency::EUR),
            quantity: qty,
            image_url: String::new(),
        };
        cart.items = vec![
            line("a", 1, 100),
            line("b", 0, 100),
            line("a", 2, 999),
            line("c", 1, -5),
        ];
        cart.promo_code = Some("promo10".to_string());

        let corrections = cart.sanitize(&PromoTable::default());
        assert_eq!(corrections, 4);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.items[0].unit_price.amount_cents, 100);
        assert_eq!(cart.promo_code.as_deref(), Some("PROMO10"));

        cart.promo_code = Some("EXPIRED".to_string());
        assert_eq!(cart.sanitize(&PromoTable::default()), 1);
        assert_eq!(cart.promo_code, None);
    }
}
