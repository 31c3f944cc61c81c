//! Cart CLI - drive a storefront cart session from the terminal.
//!
//! Commands:
//! - `cart add` / `remove` / `inc` / `dec` / `toggle` - Change lines
//! - `cart list` / `total` - Show the cart
//! - `cart promo` - Add or toggle a promotion bundle
//! - `cart checkout` - Hand the cart to an order form
//! - `cart clear` - Empty the cart
//! - `cart config` - Manage configuration
//!
//! Each invocation restores the session file, applies one command and saves
//! it back.

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    AddArgs, CheckoutArgs, ClearArgs, ConfigArgs, IdArgs, PromoArgs,
};

/// Cart CLI - Manage a storefront cart session
#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Session file path (overrides config)
    #[arg(short, long, global = true)]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product, or bump its quantity if already in the cart
    Add(AddArgs),

    /// Remove a product line entirely
    Remove(IdArgs),

    /// Increase a line's quantity by one
    Inc(IdArgs),

    /// Decrease a line's quantity by one (removes it at zero)
    Dec(IdArgs),

    /// Remove a product if present, add it otherwise
    Toggle(AddArgs),

    /// List cart lines
    List,

    /// Show item count and total
    Total,

    /// Add or toggle a promotion bundle
    Promo(PromoArgs),

    /// Hand the cart over to the order form
    Checkout(CheckoutArgs),

    /// Empty the cart
    Clear(ClearArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = context::Context::load(cli.config.as_deref(), cli.session.as_deref(), output)?;

    let result = match cli.command {
        Commands::Add(args) => commands::items::add(args, &ctx),
        Commands::Remove(args) => commands::items::remove(args, &ctx),
        Commands::Inc(args) => commands::items::increment(args, &ctx),
        Commands::Dec(args) => commands::items::decrement(args, &ctx),
        Commands::Toggle(args) => commands::items::toggle(args, &ctx),
        Commands::List => commands::view::list(&ctx),
        Commands::Total => commands::view::total(&ctx),
        Commands::Promo(args) => commands::promo::run(args, &ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Clear(args) => commands::clear::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
