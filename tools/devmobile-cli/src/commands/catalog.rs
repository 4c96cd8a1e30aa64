//! Browse the product catalog.

use anyhow::{bail, Result};
use devmobile_commerce::catalog::{Product, ProductCategory};
use devmobile_commerce::Currency;

use super::CatalogArgs;
use crate::context::Context;
use crate::output::{stock_badge, truncate};

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let currency = ctx.config.currency()?;

    if let Some(id) = args.product {
        let product = catalog.resolve(&id)?;
        show_product(product, currency, ctx);
        return Ok(());
    }

    let category = match args.category.as_deref() {
        None => None,
        Some(name) => Some(parse_category(name)?),
    };
    let products: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| category.map_or(true, |c| p.category == c))
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("Catalog ({} products)", products.len()));
    let widths = [14, 32, 14, 12];
    ctx.output
        .table_row(&["ID", "PRODUCT", "PRICE", "STOCK"], &widths);
    for product in products {
        let title = truncate(&product.title, 32);
        let price = product.price_money(currency).display();
        let stock = stock_badge(product.in_stock);
        ctx.output.table_row(
            &[product.id.as_str(), &title, &price, &stock],
            &widths,
        );
    }

    Ok(())
}

fn parse_category(name: &str) -> Result<ProductCategory> {
    match name.trim().to_lowercase().as_str() {
        "phones" | "phone" => Ok(ProductCategory::Phones),
        "accessories" | "accessory" => Ok(ProductCategory::Accessories),
        other => bail!("Unknown category: {} (expected phones or accessories)", other),
    }
}

fn show_product(product: &Product, currency: Currency, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(product);
        return;
    }

    ctx.output.header(&product.title);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Slug", &product.slug);
    if !product.brand.is_empty() {
        ctx.output.kv("Brand", &product.brand);
    }
    ctx.output.kv("Category", product.category.as_str());
    ctx.output.kv("Price", &product.price_money(currency).display());
    if product.is_on_sale() {
        if let Some(was) = product.compare_at_price {
            ctx.output
                .kv("Was", &devmobile_commerce::Money::from_decimal(was, currency).display());
        }
    }
    ctx.output.kv("Stock", &stock_badge(product.in_stock));
    for badge in &product.badges {
        ctx.output.list_item(badge);
    }
    if !product.description.is_empty() {
        ctx.output.info(&product.description);
    }
}
