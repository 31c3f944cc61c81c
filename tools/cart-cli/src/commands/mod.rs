//! CLI command implementations.

pub mod checkout;
pub mod clear;
pub mod config;
pub mod items;
pub mod promo;
pub mod view;

use clap::{Args, Subcommand};
use storefront_cart::ProductId;

/// Arguments for the add and toggle commands.
#[derive(Args)]
pub struct AddArgs {
    /// Product ID.
    pub id: ProductId,

    /// Display name (required unless the product is already in the cart or --record is used).
    #[arg(short, long)]
    pub name: Option<String>,

    /// Unit price as a decimal, e.g. 25.50.
    #[arg(short, long)]
    pub price: Option<String>,

    /// Image URL or storage path.
    #[arg(short, long)]
    pub image: Option<String>,

    /// Catalog JSON file (one product record or a list) to take the product from.
    #[arg(short, long, conflicts_with_all = ["name", "price", "image"])]
    pub record: Option<String>,
}

/// Arguments for commands that target one line.
#[derive(Args)]
pub struct IdArgs {
    /// Product ID.
    pub id: ProductId,
}

/// Arguments for the promo command.
#[derive(Args)]
pub struct PromoArgs {
    #[command(subcommand)]
    pub command: PromoCommand,
}

#[derive(Subcommand)]
pub enum PromoCommand {
    /// Add every product of a promotion.
    Add {
        /// Promotion JSON file.
        file: String,
    },
    /// Remove products already in the cart, add the others.
    Toggle {
        /// Promotion JSON file.
        file: String,
    },
    /// Check whether the whole promotion is in the cart.
    Status {
        /// Promotion JSON file.
        file: String,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Wholesale code; routes checkout to the wholesale order form.
    #[arg(short, long, requires = "coupons")]
    pub wholesale_code: Option<String>,

    /// Coupon list JSON file used to validate the wholesale code.
    #[arg(long)]
    pub coupons: Option<String>,

    /// Empty the cart after the hand-off.
    #[arg(long)]
    pub clear: bool,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
