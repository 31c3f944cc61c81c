//! Shopping cart module.
//!
//! Contains the cart collection, its line items and the derived summary.

mod cart;
mod item;
mod summary;

pub use cart::{AddOutcome, Cart, DecrementOutcome, ToggleOutcome, MAX_QUANTITY_PER_ITEM};
pub use item::{CartItem, NewCartItem};
pub use summary::CartSummary;
