//! Shared access to one cart store.
//!
//! The storefront has several surfaces reading the same cart: the floating
//! panel, the badge, and every "add to cart" button. Instead of a global, the
//! application creates one [`CartHandle`] at session start and passes clones
//! of it down explicitly.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::cart::{AddOutcome, CartSummary, NewCartItem, ToggleOutcome};
use crate::config::StoreConfig;
use crate::error::CartError;
use crate::ids::{ProductId, SubscriptionId};
use crate::money::Money;
use crate::store::{self, CartEvent, CartStore};

/// Cloneable, single-threaded handle to a [`CartStore`].
///
/// Clones share one store. Listeners registered through the handle run after
/// the store is released, so a panel can re-render from `read()` inside its
/// callback.
#[derive(Debug, Clone, Default)]
pub struct CartHandle {
    inner: Rc<RefCell<CartStore>>,
}

impl CartHandle {
    /// Wrap a store for sharing.
    pub fn new(store: CartStore) -> Self {
        Self {
            inner: Rc::new(RefCell::new(store)),
        }
    }

    /// Start a session with an empty cart.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(CartStore::from_config(config))
    }

    /// Borrow the store for reading.
    pub fn read(&self) -> Ref<'_, CartStore> {
        self.inner.borrow()
    }

    /// Run a closure with mutable access to the store, then notify
    /// listeners of what changed.
    pub fn update<R>(&self, f: impl FnOnce(&mut CartStore) -> R) -> R {
        let (result, pending, listeners) = {
            let mut store = self.inner.borrow_mut();
            store.defer_notifications();
            let result = f(&mut *store);
            let (pending, listeners) = store.take_deferred();
            (result, pending, listeners)
        };
        store::dispatch(&pending, &listeners);
        result
    }

    pub fn add_to_cart(&self, item: NewCartItem) -> Result<AddOutcome, CartError> {
        self.update(|store| store.add_to_cart(item))
    }

    pub fn remove_from_cart(&self, id: ProductId) -> bool {
        self.update(|store| store.remove_from_cart(id))
    }

    pub fn increment_quantity(&self, id: ProductId) -> Result<bool, CartError> {
        self.update(|store| store.increment_quantity(id))
    }

    pub fn decrement_quantity(&self, id: ProductId) -> bool {
        self.update(|store| store.decrement_quantity(id))
    }

    pub fn toggle_item(&self, item: NewCartItem) -> Result<ToggleOutcome, CartError> {
        self.update(|store| store.toggle_item(item))
    }

    pub fn total_items(&self) -> u64 {
        self.read().total_items()
    }

    pub fn total(&self) -> Money {
        self.read().total()
    }

    pub fn summary(&self) -> CartSummary {
        self.read().summary()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.read().contains(id)
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CartEvent, &CartSummary) + 'static,
    {
        self.update(|store| store.subscribe(listener))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.update(|store| store.unsubscribe(id))
    }

    /// Check whether two handles share the same store.
    pub fn ptr_eq(&self, other: &CartHandle) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
