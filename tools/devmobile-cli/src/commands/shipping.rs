//! Choose the shipping method.

use anyhow::Result;
use devmobile_commerce::cart::ShippingMethod;
use serde_json::json;

use super::ShippingArgs;
use crate::context::Context;

/// Run the shipping command.
pub async fn run(args: ShippingArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    if let Some(choice) = args.method {
        let method = ShippingMethod::from(choice);
        cart.set_shipping_method(method);
        ctx.output
            .success(&format!("Shipping set to {}", method.display_name()));
        super::cart::report_persist_error(&cart, ctx);
    }

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "shippingMethod": cart.shipping_method(),
            "shippingTotal": cart.shipping_total(),
            "total": cart.total(),
        }));
        return Ok(());
    }

    ctx.output.header("Shipping");
    for method in ShippingMethod::ALL {
        let marker = if method == cart.shipping_method() { "●" } else { "○" };
        ctx.output.list_item(&format!(
            "{} {:<10} {:>10}  {}",
            marker,
            method.display_name(),
            cart.policy().shipping_rate(method).display(),
            method.delivery_estimate()
        ));
    }
    if cart.is_empty() {
        ctx.output.info("Shipping is free while the cart is empty.");
    }

    Ok(())
}
