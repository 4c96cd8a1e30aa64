//! Product catalog module.
//!
//! Static, read-only product data. The cart consults it for display only;
//! prices in the cart are the ones captured at add time.

mod product;

pub use product::{Catalog, Product, ProductCategory, ProductLookup, PLACEHOLDER_IMAGE};
