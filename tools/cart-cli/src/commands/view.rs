//! Read-only commands: list, total.

use anyhow::Result;
use serde::Serialize;
use storefront_cart::cart::{CartItem, CartSummary};

use crate::context::Context;

const WIDTHS: [usize; 5] = [6, 32, 5, 12, 12];

#[derive(Serialize)]
struct Listing<'a> {
    items: &'a [CartItem],
    summary: CartSummary,
}

/// Run the list command.
pub fn list(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let summary = store.summary();

    if ctx.output.is_json() {
        ctx.output.json(&Listing {
            items: store.items(),
            summary,
        });
        return Ok(());
    }

    if store.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    ctx.output.header("Cart");
    ctx.output
        .table_row(&["ID", "NAME", "QTY", "PRICE", "LINE TOTAL"], &WIDTHS);
    for line in store.items() {
        ctx.output.table_row(
            &[
                &line.id.to_string(),
                &line.name,
                &line.quantity.to_string(),
                &line.price.display(),
                &line.line_total().display(),
            ],
            &WIDTHS,
        );
    }

    println!();
    print_summary(&summary, ctx);
    Ok(())
}

/// Run the total command.
pub fn total(ctx: &Context) -> Result<()> {
    let summary = ctx.open_store()?.summary();

    if ctx.output.is_json() {
        ctx.output.json(&summary);
    } else {
        print_summary(&summary, ctx);
    }
    Ok(())
}

fn print_summary(summary: &CartSummary, ctx: &Context) {
    ctx.output.kv("items", &summary.total_items.to_string());
    ctx.output.kv("lines", &summary.unique_items.to_string());
    ctx.output.kv("total", &summary.total.display());
    if let Some(badge) = summary.badge_label() {
        ctx.output.kv("badge", &badge);
    }
}
