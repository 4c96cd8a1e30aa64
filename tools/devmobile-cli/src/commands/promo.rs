//! Apply or clear a promo code.

use anyhow::Result;

use super::PromoArgs;
use crate::context::Context;

/// Run the promo command.
pub async fn run(args: PromoArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let outcome = cart.apply_promo_code(&args.code);

    if ctx.output.is_json() {
        ctx.output.json(&outcome);
    } else if outcome.success {
        ctx.output.success(&outcome.message);
        if cart.promo_code().is_some() {
            ctx.output.kv("Discount", &cart.discount().display());
            ctx.output.kv("Total", &cart.total().display());
        }
    } else {
        ctx.output.warn(&outcome.message);
    }

    super::cart::report_persist_error(&cart, ctx);
    Ok(())
}
