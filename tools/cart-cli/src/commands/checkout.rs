//! Checkout hand-off command.

use anyhow::{Context as _, Result};
use storefront_cart::checkout::CheckoutChannel;
use storefront_cart::wholesale::{WholesaleAccess, WholesaleGate};

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;

    let access = wholesale_access(&args, ctx)?;
    let channel = CheckoutChannel::for_access(access.as_ref());
    let handoff = store.checkout(channel)?;

    if ctx.output.is_json() {
        ctx.output.json(&handoff);
    } else {
        ctx.output.header("Checkout");
        ctx.output.kv("channel", handoff.channel.as_str());
        ctx.output.kv("route", &handoff.route);
        ctx.output.kv("lines", &handoff.items.len().to_string());
        ctx.output.kv("items", &handoff.total_items.to_string());
        ctx.output.kv("total", &handoff.total.display());
    }

    if args.clear {
        store.clear();
        ctx.save_store(&store)?;
        ctx.output.success("Cart cleared");
    }
    Ok(())
}

fn wholesale_access(args: &CheckoutArgs, ctx: &Context) -> Result<Option<WholesaleAccess>> {
    let (Some(code), Some(coupons)) = (&args.wholesale_code, &args.coupons) else {
        return Ok(None);
    };

    let path = ctx.resolve_path(coupons);
    let body = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read coupon file: {}", path.display()))?;
    let gate = WholesaleGate::from_json(&body)
        .with_context(|| format!("Failed to parse coupon file: {}", path.display()))?;

    let access = gate.validate(code)?;
    ctx.output.debug(&format!("Wholesale code {} accepted", access.code()));
    Ok(Some(access))
}
