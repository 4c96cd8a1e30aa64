//! Cart contents: show, add, remove, change quantities.

use anyhow::Result;
use devmobile_commerce::cart::CartPricing;
use devmobile_commerce::ProductId;
use dialoguer::Confirm;
use serde::Serialize;

use super::{CartArgs, CartCommand};
use crate::context::{Cart, Context};
use crate::output::truncate;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add {
            product,
            qty,
            options,
        } => add(&mut cart, &product, qty, &options, ctx)?,
        CartCommand::Remove { product } => {
            let id = ProductId::new(product);
            match cart.state().get_item(&id) {
                Some(item) => ctx.output.success(&format!("Removed {}", item.title)),
                None => ctx.output.warn(&format!("{} is not in the cart", id)),
            }
            cart.remove(&id);
        }
        CartCommand::SetQty { product, qty } => {
            let id = ProductId::new(product);
            if cart.state().get_item(&id).is_none() {
                ctx.output.warn(&format!("{} is not in the cart", id));
            }
            cart.set_quantity(&id, qty);
        }
        CartCommand::Clear { yes } => {
            if !yes && !ctx.output.is_json() && !cart.is_empty() {
                let confirmed = Confirm::new()
                    .with_prompt("Remove everything from the cart?")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Cart left unchanged");
                    return Ok(());
                }
            }
            cart.clear();
            ctx.output.success("Cart cleared");
        }
    }

    report_persist_error(&cart, ctx);
    show(&cart, ctx)
}

fn add(cart: &mut Cart, product: &str, qty: i64, options: &[String], ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let product = catalog.resolve(product)?;
    let options: Vec<&str> = options.iter().map(String::as_str).collect();
    let item = product.to_line_item(cart.policy().currency, &options)?;

    if qty <= 0 {
        ctx.output.warn("Quantity must be at least 1; nothing added");
    } else {
        ctx.output.success(&format!("Added {} × {}", qty, item.title));
    }
    cart.add(item, qty);
    Ok(())
}

/// Warn when the last write did not reach storage.
pub fn report_persist_error(cart: &Cart, ctx: &Context) {
    if let Some(err) = cart.last_persist_error() {
        ctx.output
            .warn(&format!("Cart could not be saved and will not survive this run: {}", err));
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartView<'a> {
    items: &'a [devmobile_commerce::cart::LineItem],
    promo_code: Option<&'a str>,
    pricing: CartPricing,
}

/// Print the cart lines and the order summary.
pub fn show(cart: &Cart, ctx: &Context) -> Result<()> {
    show_priced(cart, cart.pricing(), ctx)
}

/// Print the cart lines with an already computed breakdown.
pub fn show_priced(cart: &Cart, pricing: CartPricing, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            items: cart.items(),
            promo_code: cart.promo_code(),
            pricing,
        });
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({} items)", cart.item_count()));
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    let catalog = ctx.load_catalog()?;
    let widths = [14, 36, 5, 14];
    ctx.output.table_row(&["ID", "ITEM", "QTY", "TOTAL"], &widths);
    for line in cart.display_lines(&catalog) {
        let total = line.line_total.display();
        let title = truncate(&line.item.title, 36);
        let qty = line.item.quantity.to_string();
        ctx.output.table_row(
            &[line.item.product_id.as_str(), &title, &qty, &total],
            &widths,
        );
        if line.slug.is_none() {
            ctx.output.debug(&format!(
                "{} is no longer in the catalog",
                line.item.product_id
            ));
        }
    }

    println!();
    ctx.output.totals(&pricing);
    Ok(())
}
