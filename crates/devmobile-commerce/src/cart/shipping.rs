//! Shipping method selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CommerceError;

/// Delivery speed chosen for the cart.
///
/// Each method maps to a flat rate in [`crate::cart::PricingPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
}

impl ShippingMethod {
    /// All methods, in display order.
    pub const ALL: [ShippingMethod; 2] = [ShippingMethod::Standard, ShippingMethod::Express];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "standard",
            ShippingMethod::Express => "express",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "Standard shipping",
            ShippingMethod::Express => "Express shipping",
        }
    }

    /// Delivery estimate shown next to the method.
    pub fn delivery_estimate(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "3-5 business days",
            ShippingMethod::Express => "1-2 business days",
        }
    }
}

impl FromStr for ShippingMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(ShippingMethod::Standard),
            "express" => Ok(ShippingMethod::Express),
            _ => Err(CommerceError::UnknownShippingMethod(s.to_string())),
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_standard() {
        assert_eq!(ShippingMethod::default(), ShippingMethod::Standard);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "Express".parse::<ShippingMethod>().unwrap(),
            ShippingMethod::Express
        );
        assert!("overnight".parse::<ShippingMethod>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&ShippingMethod::Express).unwrap(),
            "\"express\""
        );
        let m: ShippingMethod = serde_json::from_str("\"standard\"").unwrap();
        assert_eq!(m, ShippingMethod::Standard);
    }
}
