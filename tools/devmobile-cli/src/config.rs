//! CLI configuration.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use devmobile_commerce::cart::{PricingPolicy, PromoTable};
use devmobile_commerce::Currency;
use serde::{Deserialize, Serialize};

/// Config file names looked up from the working directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["devmobile.toml", ".devmobile.toml", "devmobile.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Where the cart is stored.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Simulated checkout settings.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Product catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Extra promo codes (`CODE = rate`), on top of the built-in ones.
    #[serde(default)]
    pub promotions: BTreeMap<String, f64>,

    /// Display settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// The built-in promo table extended with the configured codes.
    pub fn promo_table(&self) -> Result<PromoTable> {
        let mut table = PromoTable::default();
        for (code, rate) in &self.promotions {
            table
                .insert(code, *rate)
                .with_context(|| format!("Invalid [promotions] entry: {}", code))?;
        }
        Ok(table)
    }

    /// Display currency.
    pub fn currency(&self) -> Result<Currency> {
        self.display
            .currency
            .parse()
            .with_context(|| "Invalid [display] currency")
    }

    /// Pricing policy for the configured currency.
    pub fn pricing_policy(&self) -> Result<PricingPolicy> {
        Ok(PricingPolicy::for_currency(self.currency()?))
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding the cart file. Relative paths resolve against the
    /// working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

/// Checkout configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutConfig {
    /// How long "processing" the order takes.
    #[serde(default = "default_processing_delay_ms")]
    pub processing_delay_ms: u64,
}

fn default_processing_delay_ms() -> u64 {
    2000
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: default_processing_delay_ms(),
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// JSON product list. The bundled catalog is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Currency code (EUR, USD or GBP).
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "EUR".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

/// Generate a default devmobile.toml config file.
pub fn generate_default_config() -> String {
    r#"# Dev Mobile CLI configuration

[storage]
# Directory for the persisted cart (default: ~/.local/share/devmobile)
# dir = ".devmobile"

[checkout]
# Simulated payment processing time
processing_delay_ms = 2000

[catalog]
# JSON product list (default: bundled catalog)
# path = "data/catalog.json"

[promotions]
# Extra promo codes on top of PROMO10, as CODE = rate in [0, 1)
# WELCOME5 = 0.05

[display]
currency = "EUR"
"#
    .to_string()
}
