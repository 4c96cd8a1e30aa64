//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Cart mutations themselves never fail; these surface from configuration,
/// persistence and checkout.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product cannot be added because it is out of stock.
    #[error("Product out of stock: {0}")]
    OutOfStock(String),

    /// Checkout submitted with nothing in the cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Checkout incomplete.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Promotion rate outside `[0, 1)`.
    #[error("Invalid rate {rate} for promo code {code}: must be in [0, 1)")]
    InvalidPromoRate { code: String, rate: f64 },

    /// Unknown shipping method name.
    #[error("Unknown shipping method: {0}")]
    UnknownShippingMethod(String),

    /// Unknown currency code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Storage error.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[cfg(feature = "storage")]
impl From<devmobile_cache::CacheError> for CommerceError {
    fn from(e: devmobile_cache::CacheError) -> Self {
        match e {
            devmobile_cache::CacheError::SerializeError(e) => {
                CommerceError::SerializationError(e.to_string())
            }
            other => CommerceError::StorageError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
