//! Client-side shopping cart for the storefront.
//!
//! This crate owns the cart every storefront surface shares:
//!
//! - **Cart**: id-keyed lines with quantity aggregation and derived totals
//! - **Store**: the mutating operations plus change notification
//! - **Handle**: explicit, cloneable access for every UI collaborator
//! - **Promotions**: bundles expanded into per-product lines
//! - **Checkout**: hand-off of lines and total to the order form
//! - **Snapshot**: opt-in serialize/restore of a session's cart
//!
//! # Example
//!
//! ```rust
//! use storefront_cart::prelude::*;
//!
//! let cart = CartHandle::from_config(&StoreConfig::default());
//! let badge = cart.clone();
//!
//! let mug = NewCartItem::new(1, "Mug", Money::new(1000, Currency::BOB), "/mug.jpg");
//! cart.add_to_cart(mug.clone()).unwrap();
//! cart.add_to_cart(mug).unwrap();
//!
//! assert_eq!(badge.total_items(), 2);
//! assert_eq!(cart.total().display(), "Bs.20.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod handle;
pub mod promotion;
pub mod snapshot;
pub mod store;
pub mod wholesale;

pub use error::CartError;
pub use handle::CartHandle;
pub use ids::{ProductId, PromotionId, SubscriptionId};
pub use money::{Currency, Money};
pub use store::{CartEvent, CartStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CartError;
    pub use crate::ids::{ProductId, PromotionId, SubscriptionId};
    pub use crate::money::{Currency, Money};

    pub use crate::cart::{
        AddOutcome, Cart, CartItem, CartSummary, NewCartItem, ToggleOutcome,
        MAX_QUANTITY_PER_ITEM,
    };
    pub use crate::catalog::{ImageResolver, ProductRecord};
    pub use crate::checkout::{CheckoutChannel, CheckoutHandoff};
    pub use crate::config::StoreConfig;
    pub use crate::handle::CartHandle;
    pub use crate::promotion::{PromotionBundle, PromotionRecord};
    pub use crate::snapshot::CartSnapshot;
    pub use crate::store::{CartEvent, CartStore};
    pub use crate::wholesale::{WholesaleAccess, WholesaleGate};
}
