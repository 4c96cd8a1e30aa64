//! Promotion codes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::money::format_percent;
use crate::CommerceError;

/// Code shipped in the default promotion table.
pub const DEFAULT_PROMO_CODE: &str = "PROMO10";

/// Rate of [`DEFAULT_PROMO_CODE`].
pub const DEFAULT_PROMO_RATE: f64 = 0.10;

/// Normalize a user-entered code: trimmed and upper-cased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Recognized promotion codes and their proportional discount rates.
///
/// Every rate is in `[0, 1)`, so a discount can never reach the subtotal.
#[derive(Debug, Clone, PartialEq)]
pub struct PromoTable {
    rates: BTreeMap<String, f64>,
}

impl PromoTable {
    /// A table with no codes at all.
    pub fn empty() -> Self {
        Self {
            rates: BTreeMap::new(),
        }
    }

    /// Register a code. The code is normalized before insertion.
    pub fn insert(&mut self, code: &str, rate: f64) -> Result<(), CommerceError> {
        let code = normalize_code(code);
        if code.is_empty() || !rate.is_finite() || !(0.0..1.0).contains(&rate) {
            return Err(CommerceError::InvalidPromoRate { code, rate });
        }
        self.rates.insert(code, rate);
        Ok(())
    }

    /// Builder form of [`PromoTable::insert`].
    pub fn with_code(mut self, code: &str, rate: f64) -> Result<Self, CommerceError> {
        self.insert(code, rate)?;
        Ok(self)
    }

    /// Rate for a code, if recognized. The lookup normalizes `code`.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(&normalize_code(code)).copied()
    }

    /// Check whether a code is recognized.
    pub fn contains(&self, code: &str) -> bool {
        self.rate(code).is_some()
    }

    /// Iterate over `(code, rate)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for PromoTable {
    fn default() -> Self {
        let mut rates = BTreeMap::new();
        rates.insert(DEFAULT_PROMO_CODE.to_string(), DEFAULT_PROMO_RATE);
        Self { rates }
    }
}

/// Result of applying a promo code, shown to the shopper as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoOutcome {
    pub success: bool,
    pub message: String,
}

impl PromoOutcome {
    pub(crate) fn cleared() -> Self {
        Self {
            success: true,
            message: "Promo code cleared.".to_string(),
        }
    }

    pub(crate) fn not_recognized() -> Self {
        Self {
            success: false,
            message: "Promo code not recognized.".to_string(),
        }
    }

    pub(crate) fn applied(rate: f64) -> Self {
        Self {
            success: true,
            message: format!("Promo applied! {} off your subtotal.", format_percent(rate)),
        }
    }
}
