//! Persisted cart format.
//!
//! The cart lives under a single storage key as
//! `{"state": {...}, "version": N}`. Prices are stored as decimal numbers in
//! the base currency. Older snapshots used `price`, `qty`, `image` and
//! `shipping` as field names; they are still accepted on read. Missing
//! fields fall back to the empty cart defaults.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::cart::{CartState, LineItem, ShippingMethod};
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use crate::CommerceError;

/// Storage key the cart is persisted under.
pub const STORAGE_KEY: &str = "dev-mobile-cart";

/// Version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The storage envelope.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersistedCart {
    #[serde(default)]
    pub state: CartSnapshot,
    #[serde(default)]
    pub version: u32,
}

impl PersistedCart {
    /// Wrap a snapshot with the current version.
    pub fn new(state: CartSnapshot) -> Self {
        Self {
            state,
            version: SNAPSHOT_VERSION,
        }
    }

    /// Parse a stored document.
    pub fn decode(bytes: &[u8]) -> Result<Self, CommerceError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Serialize for storage.
    pub fn encode(&self) -> Result<Vec<u8>, CommerceError> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Serialized form of [`CartState`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    #[serde(default)]
    pub items: Vec<LineItemSnapshot>,
    #[serde(default)]
    pub promo_code: Option<String>,
    #[serde(default, alias = "shipping", deserialize_with = "lenient_shipping_method")]
    pub shipping_method: ShippingMethod,
}

/// Unknown or malformed shipping methods fall back to the default instead
/// of failing the whole document.
fn lenient_shipping_method<'de, D>(deserializer: D) -> Result<ShippingMethod, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value.as_str().map(str::parse::<ShippingMethod>) {
        Some(Ok(method)) => Ok(method),
        _ if value.is_null() => Ok(ShippingMethod::default()),
        _ => {
            warn!(stored = %value, "unknown shipping method in stored cart, using default");
            Ok(ShippingMethod::default())
        }
    }
}

/// Serialized form of [`LineItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemSnapshot {
    pub product_id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(alias = "price")]
    pub unit_price: f64,
    #[serde(alias = "qty")]
    pub quantity: i64,
    #[serde(default, alias = "image")]
    pub image_url: String,
}

impl CartSnapshot {
    /// Capture the full state.
    pub fn from_state(state: &CartState) -> Self {
        Self {
            items: state
                .items
                .iter()
                .map(|item| LineItemSnapshot {
                    product_id: item.product_id.clone(),
                    title: item.title.clone(),
                    unit_price: item.unit_price.to_decimal(),
                    quantity: item.quantity,
                    image_url: item.image_url.clone(),
                })
                .collect(),
            promo_code: state.promo_code.clone(),
            shipping_method: state.shipping_method,
        }
    }

    /// Rebuild state with prices in `currency`.
    ///
    /// No invariant checks happen here; see [`CartState::sanitize`].
    pub fn into_state(self, currency: Currency) -> CartState {
        CartState {
            items: self
                .items
                .into_iter()
                .map(|item| LineItem {
                    product_id: item.product_id,
                    title: item.title,
                    unit_price: Money::from_decimal(item.unit_price, currency),
                    quantity: item.quantity,
                    image_url: item.image_url,
                })
                .collect(),
            promo_code: self.promo_code.filter(|code| !code.trim().is_empty()),
            shipping_method: self.shipping_method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::NewLineItem;

    #[test]
    fn test_encoded_field_names() {
        let mut state = CartState::new();
        state.add_item(
            NewLineItem::new("p1", "Phone", Money::new(100050, Currency::EUR), "/p1.jpg"),
            2,
        );
        state.shipping_method = ShippingMethod::Express;

        let bytes = PersistedCart::new(CartSnapshot::from_state(&state))
            .encode()
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["version"], 1);
        assert_eq!(json["state"]["shippingMethod"], "express");
        assert_eq!(json["state"]["promoCode"], serde_json::Value::Null);
        let item = &json["state"]["items"][0];
        assert_eq!(item["productId"], "p1");
        assert_eq!(item["unitPrice"], 1000.5);
        assert_eq!(item["quantity"], 2);
        assert_eq!(item["imageUrl"], "/p1.jpg");
    }

    #[test]
    fn test_decodes_legacy_field_names() {
        let legacy = br#"{
            "state": {
                "items": [
                    {"productId": "p1", "title": "Phone", "price": 6.5, "qty": 3, "image": "/a.jpg"}
                ],
                "promoCode": "PROMO10",
                "shipping": "express"
            },
            "version": 0
        }"#;

        let persisted = PersistedCart::decode(legacy).unwrap();
        assert_eq!(persisted.version, 0);

        let state = persisted.state.into_state(Currency::EUR);
        assert_eq!(state.items[0].unit_price.amount_cents, 650);
        assert_eq!(state.items[0].quantity, 3);
        assert_eq!(state.items[0].image_url, "/a.jpg");
        assert_eq!(state.promo_code.as_deref(), Some("PROMO10"));
        assert_eq!(state.shipping_method, ShippingMethod::Express);
    }

    #[test]
    fn test_missing_fields_default() {
        let state = PersistedCart::decode(b"{}")
            .unwrap()
            .state
            .into_state(Currency::EUR);
        assert_eq!(state, CartState::default());
    }

    #[test]
    fn test_malformed_is_error() {
        assert!(PersistedCart::decode(b"not json").is_err());
        assert!(PersistedCart::decode(br#"{"state": {"items": "many"}}"#).is_err());
    }

    #[test]
    fn test_unknown_shipping_method_keeps_items() {
        let newer = br#"{
            "state": {
                "items": [
                    {"productId": "p1", "title": "Phone", "unitPrice": 1000.0, "quantity": 2, "imageUrl": ""}
                ],
                "shippingMethod": "overnight"
            },
            "version": 2
        }"#;

        let state = PersistedCart::decode(newer)
            .unwrap()
            .state
            .into_state(Currency::EUR);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.item_count(), 2);
        assert_eq!(state.shipping_method, ShippingMethod::Standard);

        let odd: [&[u8]; 2] = [
            br#"{"state": {"shipping": 42}}"#,
            br#"{"state": {"shippingMethod": null}}"#,
        ];
        for raw in odd {
            let persisted = PersistedCart::decode(raw).unwrap();
            assert_eq!(persisted.state.shipping_method, ShippingMethod::Standard);
        }
    }
}
