//! Checkout hand-off.
//!
//! The cart's job ends when the shopper presses "go to pay": it hands the
//! current lines and total to the external multi-step order form for the
//! active channel. What the form does next is not the cart's concern.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cart::CartItem;
use crate::error::CartError;
use crate::money::Money;
use crate::store::CartStore;
use crate::wholesale::WholesaleAccess;

/// Which order form receives the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutChannel {
    /// Regular shoppers.
    #[default]
    Retail,
    /// Shoppers who passed the wholesale-code gate.
    Wholesale,
}

impl CheckoutChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutChannel::Retail => "retail",
            CheckoutChannel::Wholesale => "wholesale",
        }
    }

    /// Route of the order form for this channel.
    pub fn route(&self) -> &'static str {
        match self {
            CheckoutChannel::Retail => "/pago",
            CheckoutChannel::Wholesale => "/pago1",
        }
    }

    /// Channel for a session, depending on wholesale access.
    pub fn for_access(access: Option<&WholesaleAccess>) -> Self {
        match access {
            Some(_) => CheckoutChannel::Wholesale,
            None => CheckoutChannel::Retail,
        }
    }
}

/// Everything the order form receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutHandoff {
    pub channel: CheckoutChannel,
    /// Route to navigate to.
    pub route: String,
    pub items: Vec<CartItem>,
    pub total_items: u64,
    pub total: Money,
}

impl CartStore {
    /// Hand the cart over to the order form.
    ///
    /// The cart is left as is; collaborators clear it once the order is
    /// placed.
    pub fn checkout(&self, channel: CheckoutChannel) -> Result<CheckoutHandoff, CartError> {
        if self.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let summary = self.summary();
        info!(
            channel = channel.as_str(),
            total_items = summary.total_items,
            total = %summary.total,
            "checkout hand-off"
        );

        Ok(CheckoutHandoff {
            channel,
            route: channel.route().to_string(),
            items: self.items().to_vec(),
            total_items: summary.total_items,
            total: summary.total,
        })
    }
}
