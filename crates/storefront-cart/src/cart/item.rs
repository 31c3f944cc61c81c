//! Cart line items.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A purchasable record handed to the cart by a collaborator.
///
/// Product cards, carousels, detail pages and promotion bundles all build one
/// of these and funnel it through the same add path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCartItem {
    /// Product (or promoted product) identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price at the time of adding.
    pub price: Money,
    /// Image URL.
    pub image: String,
}

impl NewCartItem {
    /// Create a new item record.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Unique key within the cart.
    pub id: ProductId,
    /// Display name (denormalized).
    pub name: String,
    /// Unit price snapshotted when the line was created.
    pub price: Money,
    /// Image URL.
    pub image: String,
    /// Quantity, always at least 1.
    pub quantity: u32,
}

impl CartItem {
    pub(crate) fn from_new(item: NewCartItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
            image: item.image,
            quantity: 1,
        }
    }

    /// Line total (price * quantity).
    pub fn line_total(&self) -> Money {
        self.price.saturating_multiply(self.quantity)
    }
}
