//! Promotion bundle commands.

use anyhow::{Context as _, Result};
use storefront_cart::cart::{AddOutcome, ToggleOutcome};
use storefront_cart::promotion::{PromotionBundle, PromotionRecord};

use super::{PromoArgs, PromoCommand};
use crate::context::Context;

/// Run the promo command.
pub fn run(args: PromoArgs, ctx: &Context) -> Result<()> {
    match args.command {
        PromoCommand::Add { file } => add(&file, ctx),
        PromoCommand::Toggle { file } => toggle(&file, ctx),
        PromoCommand::Status { file } => status(&file, ctx),
    }
}

fn add(file: &str, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let bundle = load_bundle(file, ctx, store.currency())?;

    let outcomes = store.add_bundle(&bundle, &ctx.images())?;
    let inserted = outcomes
        .iter()
        .filter(|o| matches!(o, AddOutcome::Inserted))
        .count();

    ctx.save_store(&store)?;
    if ctx.output.is_json() {
        ctx.output.json(&store.summary());
    } else {
        ctx.output.success(&format!(
            "Added {} ({} new lines, {} bumped)",
            bundle.name,
            inserted,
            outcomes.len() - inserted
        ));
        ctx.output.kv("total", &store.total().display());
    }
    Ok(())
}

fn toggle(file: &str, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let bundle = load_bundle(file, ctx, store.currency())?;

    let outcomes = store.toggle_bundle(&bundle, &ctx.images())?;
    let removed = outcomes
        .iter()
        .filter(|o| matches!(o, ToggleOutcome::Removed))
        .count();

    ctx.save_store(&store)?;
    if ctx.output.is_json() {
        ctx.output.json(&store.summary());
    } else {
        ctx.output.success(&format!(
            "{}: {} added, {} removed",
            bundle.name,
            outcomes.len() - removed,
            removed
        ));
        ctx.output.kv("total", &store.total().display());
    }
    Ok(())
}

fn status(file: &str, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let bundle = load_bundle(file, ctx, store.currency())?;
    let in_cart = store.bundle_in_cart(&bundle);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "promotion": bundle.id,
            "in_cart": in_cart,
        }));
    } else if in_cart {
        ctx.output.info(&format!("{} is in the cart", bundle.name));
    } else {
        ctx.output.info(&format!("{} is not in the cart", bundle.name));
    }
    Ok(())
}

fn load_bundle(
    file: &str,
    ctx: &Context,
    currency: storefront_cart::Currency,
) -> Result<PromotionBundle> {
    let path = ctx.resolve_path(file);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read promotion file: {}", path.display()))?;
    let record: PromotionRecord = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse promotion file: {}", path.display()))?;

    ctx.output.debug(&format!(
        "Promotion {} with {} products",
        record.id,
        record.products.len()
    ));
    Ok(record.into_bundle(currency)?)
}
