//! Opt-in durability for a cart session.
//!
//! A cart lives in memory and is gone when the session ends. Collaborators
//! that want it to survive (a reload, a CLI invocation) take a
//! [`CartSnapshot`] at session end and restore it at session start. Restore
//! re-checks every cart invariant; a snapshot that breaks one is rejected
//! whole.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cart::{Cart, CartItem};
use crate::error::CartError;
use crate::money::Currency;
use crate::store::CartStore;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized cart contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Format version.
    pub version: u32,
    /// Cart currency.
    pub currency: Currency,
    /// Lines in insertion order.
    pub items: Vec<CartItem>,
    /// When the snapshot was taken.
    pub saved_at: DateTime<Utc>,
}

impl CartSnapshot {
    pub fn to_json(&self) -> Result<String, CartError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CartError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the snapshot against the cart invariants and build a cart.
    fn into_cart(self, expected: Currency) -> Result<Cart, CartError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CartError::InvalidSnapshot(format!(
                "unsupported version {}",
                self.version
            )));
        }
        if self.currency != expected {
            return Err(CartError::InvalidSnapshot(format!(
                "currency {} does not match cart currency {}",
                self.currency, expected
            )));
        }

        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(item.id) {
                return Err(CartError::InvalidSnapshot(format!(
                    "duplicate product {}",
                    item.id
                )));
            }
            if item.quantity == 0 {
                return Err(CartError::InvalidSnapshot(format!(
                    "product {} has quantity {}",
                    item.id, item.quantity
                )));
            }
            if item.price.currency != expected || item.price.is_negative() {
                return Err(CartError::InvalidSnapshot(format!(
                    "product {} has invalid price {}",
                    item.id, item.price
                )));
            }
        }

        Ok(Cart::from_validated(expected, self.items))
    }
}

impl CartStore {
    /// Capture the current contents.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            version: SNAPSHOT_VERSION,
            currency: self.currency(),
            items: self.items().to_vec(),
            saved_at: Utc::now(),
        }
    }

    /// Replace the contents with a snapshot.
    ///
    /// On error the current cart is left untouched.
    pub fn restore(&mut self, snapshot: CartSnapshot) -> Result<(), CartError> {
        let saved_at = snapshot.saved_at;
        match snapshot.into_cart(self.currency()) {
            Ok(cart) => {
                info!(lines = cart.len(), %saved_at, "cart restored");
                self.replace_cart(cart);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "rejected cart snapshot");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::NewCartItem;
    use crate::ids::ProductId;
    use crate::money::Money;
    use crate::store::CartEvent;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn filled() -> CartStore {
        let mut store = CartStore::default();
        for id in [3, 1, 3] {
            store
                .add_to_cart(NewCartItem::new(
                    id,
                    format!("Product {id}"),
                    Money::new(1250, Currency::BOB),
                    "/placeholder.jpg",
                ))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_restore_through_json() {
        let original = filled();
        let json = original.snapshot().to_json().unwrap();

        let mut restored = CartStore::default();
        restored
            .restore(CartSnapshot::from_json(&json).unwrap())
            .unwrap();

        assert_eq!(restored.cart(), original.cart());
        let ids: Vec<i64> = restored.items().iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_restore_notifies() {
        let mut store = CartStore::default();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        store.subscribe(move |e, s| sink.borrow_mut().push((e.clone(), s.total_items)));

        store.restore(filled().snapshot()).unwrap();
        assert_eq!(*events.borrow(), vec![(CartEvent::Restored, 3)]);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut snapshot = filled().snapshot();
        let duplicate = snapshot.items[0].clone();
        snapshot.items.push(duplicate);

        let mut store = filled();
        let before = store.cart().clone();
        assert!(matches!(
            store.restore(snapshot),
            Err(CartError::InvalidSnapshot(_))
        ));
        assert_eq!(store.cart(), &before);
    }

    #[test]
    fn test_rejects_zero_quantity() {
        let mut snapshot = filled().snapshot();
        snapshot.items[0].quantity = 0;
        assert!(CartStore::default().restore(snapshot).is_err());
    }

    #[test]
    fn test_restores_large_quantity() {
        let mut snapshot = filled().snapshot();
        snapshot.items[0].quantity = 25_000;

        let mut store = CartStore::default();
        store.restore(snapshot).unwrap();
        assert_eq!(store.get(ProductId::new(3)).unwrap().quantity, 25_000);
        assert_eq!(store.total_items(), 25_001);
    }

    #[test]
    fn test_rejects_currency_and_version() {
        let mut snapshot = filled().snapshot();
        snapshot.version = 2;
        assert!(CartStore::default().restore(snapshot).is_err());

        let snapshot = filled().snapshot();
        assert!(CartStore::new(Currency::USD).restore(snapshot).is_err());
    }

    #[test]
    fn test_rejects_negative_price() {
        let mut snapshot = filled().snapshot();
        snapshot.items[1].price = Money::new(-1, Currency::BOB);
        let mut store = CartStore::default();
        assert!(store.restore(snapshot).is_err());
        assert!(!store.contains(ProductId::new(1)));
    }
}
