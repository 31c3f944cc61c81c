//! Clear command.

use anyhow::Result;
use dialoguer::Confirm;

use super::ClearArgs;
use crate::context::Context;

/// Run the clear command.
pub fn run(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;

    if store.is_empty() {
        ctx.output.info("Cart is already empty");
        return Ok(());
    }

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} items from the cart?", store.total_items()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    store.clear();
    ctx.save_store(&store)?;
    ctx.output.success("Cart cleared");
    Ok(())
}
