//! Product types and the static catalog.

use crate::cart::NewLineItem;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Image used when a product has none.
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x600/0f172a/94a3b8?text=Dev+Mobile";

/// Top-level product grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Phones,
    Accessories,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Phones => "phones",
            ProductCategory::Accessories => "accessories",
        }
    }
}

/// A catalog product.
///
/// Prices are decimal amounts in the store's base currency, as in the
/// catalog source data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    /// URL slug.
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub brand: String,
    pub category: ProductCategory,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    /// Strike-through price, when on sale.
    #[serde(default)]
    pub compare_at_price: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub badges: Vec<String>,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    pub fn price_money(&self, currency: Currency) -> Money {
        Money::from_decimal(self.price, currency)
    }

    /// First image, or the placeholder.
    pub fn primary_image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Check if the product is discounted against its compare-at price.
    pub fn is_on_sale(&self) -> bool {
        self.compare_at_price.is_some_and(|was| was > self.price)
    }

    /// Build the add-to-cart payload, capturing the current price.
    ///
    /// Selected options (color, storage) are summarized into the title as
    /// `"Title (Black · 256 GB)"`.
    pub fn to_line_item(
        &self,
        currency: Currency,
        options: &[&str],
    ) -> Result<NewLineItem, CommerceError> {
        if !self.in_stock {
            return Err(CommerceError::OutOfStock(self.id.to_string()));
        }

        let summary: Vec<&str> = options
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .collect();
        let title = if summary.is_empty() {
            self.title.clone()
        } else {
            format!("{} ({})", self.title, summary.join(" \u{b7} "))
        };

        Ok(NewLineItem::new(
            self.id.clone(),
            title,
            self.price_money(currency),
            self.primary_image(),
        ))
    }
}

/// Read-only product lookup used for display.
pub trait ProductLookup {
    fn find(&self, id: &ProductId) -> Option<&Product>;
}

/// The static product catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look a product up by slug.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    /// Look a product up by ID or slug.
    pub fn resolve(&self, id_or_slug: &str) -> Result<&Product, CommerceError> {
        self.find(&ProductId::new(id_or_slug))
            .or_else(|| self.find_by_slug(id_or_slug))
            .ok_or_else(|| CommerceError::ProductNotFound(id_or_slug.to_string()))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductLookup for Catalog {
    fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {
            "id": "p1",
            "slug": "pixel-8",
            "title": "Pixel 8",
            "brand": "Google",
            "category": "phones",
            "price": 699.0,
            "compareAtPrice": 799.0,
            "images": ["/img/pixel-8.jpg"]
        },
        {
            "id": "a1",
            "slug": "usb-c-cable",
            "title": "USB-C Cable",
            "category": "accessories",
            "price": 12.5,
            "inStock": false
        }
    ]"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);

        let pixel = catalog.resolve("pixel-8").unwrap();
        assert_eq!(pixel.id.as_str(), "p1");
        assert!(pixel.in_stock);
        assert!(pixel.is_on_sale());
        assert_eq!(pixel.price_money(Currency::EUR).amount_cents, 69900);
    }

    #[test]
    fn test_resolve_unknown() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        assert!(matches!(
            catalog.resolve("iphone"),
            Err(CommerceError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_to_line_item_with_options() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let item = catalog
            .resolve("p1")
            .unwrap()
            .to_line_item(Currency::EUR, &["Obsidian", "256 GB"])
            .unwrap();

        assert_eq!(item.title, "Pixel 8 (Obsidian \u{b7} 256 GB)");
        assert_eq!(item.unit_price.amount_cents, 69900);
        assert_eq!(item.image_url, "/img/pixel-8.jpg");
    }

    #[test]
    fn test_to_line_item_out_of_stock() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let cable = catalog.resolve("a1").unwrap();
        assert_eq!(cable.primary_image(), PLACEHOLDER_IMAGE);
        assert!(matches!(
            cable.to_line_item(Currency::EUR, &[]),
            Err(CommerceError::OutOfStock(_))
        ));
    }
}
