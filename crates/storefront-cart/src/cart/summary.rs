//! Derived cart aggregates.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Aggregate view of the cart, recomputed on every read.
///
/// This is what the cart-icon badge and the floating cart footer render.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    /// Sum of quantities over all lines.
    pub total_items: u64,
    /// Number of distinct lines.
    pub unique_items: usize,
    /// Sum of price * quantity over all lines.
    pub total: Money,
}

impl CartSummary {
    /// Check if the summarized cart is empty.
    pub fn is_empty(&self) -> bool {
        self.unique_items == 0
    }

    /// Badge text for the cart icon; hidden when there is nothing in the cart.
    pub fn badge_label(&self) -> Option<String> {
        (self.total_items > 0).then(|| self.total_items.to_string())
    }
}
