//! Line commands: add, remove, inc, dec, toggle.

use anyhow::{bail, Context as _, Result};
use serde::Deserialize;
use storefront_cart::cart::{AddOutcome, NewCartItem, ToggleOutcome};
use storefront_cart::catalog::{Photo, ProductRecord};
use storefront_cart::{CartStore, Money, ProductId};

use super::{AddArgs, IdArgs};
use crate::context::Context;

/// Run the add command.
pub fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let item = build_item(args, ctx, &store)?;
    let name = item.name.clone();

    match store.add_to_cart(item)? {
        AddOutcome::Inserted => ctx.output.success(&format!("Added {}", name)),
        AddOutcome::Incremented(quantity) => {
            ctx.output.success(&format!("{} x{}", name, quantity))
        }
    }

    finish(&store, ctx)
}

/// Run the toggle command.
pub fn toggle(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let item = build_item(args, ctx, &store)?;
    let name = item.name.clone();

    match store.toggle_item(item)? {
        ToggleOutcome::Added => ctx.output.success(&format!("Added {}", name)),
        ToggleOutcome::Removed => ctx.output.success(&format!("Removed {}", name)),
    }

    finish(&store, ctx)
}

/// Run the remove command.
pub fn remove(args: IdArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;

    if store.remove_from_cart(args.id) {
        ctx.output.success(&format!("Removed product {}", args.id));
    } else {
        ctx.output.warn(&format!("Product {} is not in the cart", args.id));
    }

    finish(&store, ctx)
}

/// Run the inc command.
pub fn increment(args: IdArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;

    if store.increment_quantity(args.id)? {
        report_quantity(&store, args.id, ctx);
    } else {
        ctx.output.warn(&format!("Product {} is not in the cart", args.id));
    }

    finish(&store, ctx)
}

/// Run the dec command.
pub fn decrement(args: IdArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;

    if !store.decrement_quantity(args.id) {
        ctx.output.warn(&format!("Product {} is not in the cart", args.id));
    } else if store.contains(args.id) {
        report_quantity(&store, args.id, ctx);
    } else {
        ctx.output.success(&format!("Removed product {}", args.id));
    }

    finish(&store, ctx)
}

fn report_quantity(store: &CartStore, id: ProductId, ctx: &Context) {
    if let Some(line) = store.get(id) {
        ctx.output.success(&format!("{} x{}", line.name, line.quantity));
    }
}

/// Save the session and print the new summary.
fn finish(store: &CartStore, ctx: &Context) -> Result<()> {
    ctx.save_store(store)?;
    ctx.output
        .debug(&format!("Saved session to {}", ctx.session_path.display()));

    let summary = store.summary();
    if ctx.output.is_json() {
        ctx.output.json(&summary);
    } else {
        ctx.output.kv("items", &summary.total_items.to_string());
        ctx.output.kv("total", &summary.total.display());
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Records {
    Many(Vec<ProductRecord>),
    One(Box<ProductRecord>),
}

/// Work out the record to add from the arguments.
///
/// Precedence: a catalog file, then the line already in the cart, then the
/// explicit name/price/image flags.
fn build_item(args: AddArgs, ctx: &Context, store: &CartStore) -> Result<NewCartItem> {
    let images = ctx.images();

    if let Some(path) = args.record {
        let path = ctx.resolve_path(&path);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        let records: Records = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;

        let record = match records {
            Records::Many(list) => list.into_iter().find(|r| r.id == args.id),
            Records::One(record) => Some(*record).filter(|r| r.id == args.id),
        };
        let Some(record) = record else {
            bail!("Product {} not found in {}", args.id, path.display());
        };
        if !record.is_available() {
            ctx.output.warn(&format!("{} is out of stock", record.name));
        }
        return Ok(record.to_cart_item(&images)?);
    }

    if let Some(line) = store.get(args.id) {
        return Ok(NewCartItem::new(
            line.id,
            line.name.clone(),
            line.price,
            line.image.clone(),
        ));
    }

    let name = args
        .name
        .with_context(|| format!("--name is required: product {} is not in the cart", args.id))?;
    let price = args
        .price
        .with_context(|| format!("--price is required: product {} is not in the cart", args.id))?;
    let price = Money::parse_decimal(&price, store.currency())?;
    let image = images.resolve(args.image.map(Photo::Path).as_ref());

    Ok(NewCartItem::new(args.id, name, price, image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::output::Output;
    use std::path::Path;
    use storefront_cart::Currency;

    const CATALOG: &str = r#"[
        {"id": 1, "nombre": "Olla", "precio": "80.00", "fotos": ["productos/olla.jpg"], "stock": 3},
        {"id": 2, "nombre": "Sarten", "precio": "45.50", "stock": 0}
    ]"#;

    fn context_in(dir: &Path) -> Context {
        Context {
            config: CliConfig::default(),
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
            session_path: dir.join(".cart").join("session.json"),
        }
    }

    fn args(id: i64) -> AddArgs {
        AddArgs {
            id: ProductId::new(id),
            name: None,
            price: None,
            image: None,
            record: None,
        }
    }

    #[test]
    fn test_record_from_list() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("catalog.json"), CATALOG).unwrap();
        let ctx = context_in(dir.path());

        let item = build_item(
            AddArgs {
                record: Some("catalog.json".to_string()),
                ..args(2)
            },
            &ctx,
            &CartStore::default(),
        )
        .unwrap();
        assert_eq!(item.name, "Sarten");
        assert_eq!(item.price, Money::new(4550, Currency::BOB));
        assert_eq!(item.image, "/placeholder.jpg");
    }

    #[test]
    fn test_record_from_single_object() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("olla.json"),
            r#"{"id": 1, "nombre": "Olla", "precio": "80.00", "fotos": ["productos/olla.jpg"]}"#,
        )
        .unwrap();
        let ctx = context_in(dir.path());
        let store = CartStore::default();

        let item = build_item(
            AddArgs {
                record: Some("olla.json".to_string()),
                ..args(1)
            },
            &ctx,
            &store,
        )
        .unwrap();
        assert_eq!(item.name, "Olla");
        assert!(item.image.ends_with("/productos/olla.jpg"));

        let missing = build_item(
            AddArgs {
                record: Some("olla.json".to_string()),
                ..args(7)
            },
            &ctx,
            &store,
        );
        assert!(missing.is_err());
    }

    #[test]
    fn test_record_wins_over_cart_line() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("catalog.json"), CATALOG).unwrap();
        let ctx = context_in(dir.path());

        let mut store = CartStore::default();
        store
            .add_to_cart(NewCartItem::new(1, "Old name", Money::new(100, Currency::BOB), ""))
            .unwrap();

        let item = build_item(
            AddArgs {
                record: Some("catalog.json".to_string()),
                ..args(1)
            },
            &ctx,
            &store,
        )
        .unwrap();
        assert_eq!(item.name, "Olla");
        assert_eq!(item.price.amount_cents, 8000);
    }

    #[test]
    fn test_cart_line_reused_without_flags() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());

        let mut store = CartStore::default();
        store
            .add_to_cart(NewCartItem::new(5, "Jarra", Money::new(1500, Currency::BOB), "/j.jpg"))
            .unwrap();

        let item = build_item(args(5), &ctx, &store).unwrap();
        assert_eq!(item.name, "Jarra");
        assert_eq!(item.price.amount_cents, 1500);
        assert_eq!(item.image, "/j.jpg");
    }

    #[test]
    fn test_flags_for_new_product() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());
        let store = CartStore::default();

        assert!(build_item(args(9), &ctx, &store).is_err());

        let item = build_item(
            AddArgs {
                name: Some("Vaso".to_string()),
                price: Some("12.50".to_string()),
                image: Some("productos/vaso.jpg".to_string()),
                ..args(9)
            },
            &ctx,
            &store,
        )
        .unwrap();
        assert_eq!(item.name, "Vaso");
        assert_eq!(item.price.amount_cents, 1250);
        assert_eq!(
            item.image,
            "https://importadoramiranda.com/storage/productos/vaso.jpg"
        );
    }
}
