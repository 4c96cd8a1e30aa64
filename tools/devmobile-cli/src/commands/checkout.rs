//! Simulated checkout.

use std::time::Duration;

use anyhow::{bail, Result};
use chrono::{Local, TimeZone};
use devmobile_commerce::cart::{CartPricing, ShippingMethod};
use devmobile_commerce::checkout::{Address, CheckoutDetails, OrderReceipt};
use dialoguer::{Confirm, Input};

use super::CheckoutArgs;
use crate::context::{Cart, Context};

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    if cart.is_empty() {
        bail!("Your cart is empty. Add something with `devmobile cart add <product>`.");
    }

    // The cart is only touched once the order is confirmed.
    let shipping = args.shipping.map(ShippingMethod::from);
    let pricing = preview(&cart, shipping);

    let interactive = !args.yes && !ctx.output.is_json();
    let details = collect_details(&args, interactive)?;
    details.validate()?;

    if !ctx.output.is_json() {
        ctx.output.header("Order summary");
        super::cart::show_priced(&cart, pricing.clone(), ctx)?;
    }

    ctx.output.header("Delivery");
    ctx.output.kv("Name", &details.shipping_address.full_name());
    ctx.output.kv("Address", &details.shipping_address.one_line());
    ctx.output.kv("Email", &details.email);
    ctx.output.kv(
        "Shipping",
        &format!(
            "{} ({})",
            pricing.shipping_method.display_name(),
            pricing.shipping_method.delivery_estimate()
        ),
    );
    ctx.output.kv("Payment", details.payment_method.display_name());

    if interactive {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", pricing.grand_total.display()))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    if let Some(method) = shipping {
        cart.set_shipping_method(method);
    }

    let spinner = ctx.output.spinner("Processing payment...");
    tokio::time::sleep(Duration::from_millis(ctx.config.checkout.processing_delay_ms)).await;
    let receipt = cart.submit_order(details);
    spinner.finish_and_clear();
    let receipt = receipt?;

    tracing::info!(order_id = %receipt.id, "order placed");
    super::cart::report_persist_error(&cart, ctx);
    print_receipt(&receipt, ctx);
    Ok(())
}

/// Price the cart as it would be ordered, without saving a shipping change.
fn preview(cart: &Cart, shipping: Option<ShippingMethod>) -> CartPricing {
    let mut state = cart.state().clone();
    if let Some(method) = shipping {
        state.shipping_method = method;
    }
    cart.policy().price(&state, cart.promotions())
}

/// Build checkout details from flags, prompting for what is missing.
fn collect_details(args: &CheckoutArgs, interactive: bool) -> Result<CheckoutDetails> {
    let field = |value: &Option<String>, prompt: &str| -> Result<String> {
        match value {
            Some(v) => Ok(v.clone()),
            None if interactive => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
            None => Ok(String::new()),
        }
    };

    let mut address = Address::new(
        field(&args.first_name, "First name")?,
        field(&args.last_name, "Last name")?,
        field(&args.address, "Address")?,
        field(&args.city, "City")?,
        field(&args.postal_code, "Postal code")?,
        field(&args.country, "Country")?,
    );
    address.phone = args.phone.clone().filter(|p| !p.trim().is_empty());

    Ok(CheckoutDetails {
        email: field(&args.email, "Email")?,
        shipping_address: address,
        payment_method: args.payment.into(),
    })
}

fn print_receipt(receipt: &OrderReceipt, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(receipt);
        return;
    }

    let placed_at = Local
        .timestamp_opt(receipt.placed_at, 0)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| receipt.placed_at.to_string());

    ctx.output.success("Order placed. Thank you for shopping with Dev Mobile!");
    ctx.output.header(&format!("Order {}", receipt.id));
    ctx.output.kv("Placed", &placed_at);
    ctx.output.kv("Items", &receipt.item_count().to_string());
    for line in &receipt.line_items {
        ctx.output.list_item(&format!(
            "{} × {}  {}",
            line.quantity,
            line.title,
            line.total_price.display()
        ));
    }
    if let Some(code) = &receipt.promo_code {
        ctx.output.kv("Promo", code);
        ctx.output.kv("Discount", &receipt.discount_total.display());
    }
    ctx.output.kv("Shipping", &receipt.shipping_total.display());
    ctx.output.kv("Tax", &receipt.tax_total.display());
    ctx.output.kv("Total", &receipt.grand_total.display());
    ctx.output.kv("Confirmation sent to", &receipt.email);
}
