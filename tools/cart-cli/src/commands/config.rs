//! Config command.

use anyhow::Result;

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Init { force } => init(force, ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    let store = &ctx.config.store;
    ctx.output.header("Store");
    ctx.output.kv("currency", store.currency.code());
    ctx.output.kv("image_base_url", &store.image_base_url);
    ctx.output.kv("placeholder_image", &store.placeholder_image);

    ctx.output.header("Session");
    ctx.output.kv("path", &ctx.session_path.display().to_string());
    Ok(())
}

fn init(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("cart.toml");

    if config_path.exists() && !force {
        ctx.output.warn("Config file already exists. Use --force to overwrite.");
        return Ok(());
    }

    std::fs::write(&config_path, generate_default_config())?;
    ctx.output
        .success(&format!("Created {}", config_path.display()));
    Ok(())
}
