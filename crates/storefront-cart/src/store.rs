//! The cart store: single source of truth for cart contents.
//!
//! UI surfaces mutate the cart only through the operations here and learn
//! about changes by subscribing. A listener is called after every operation
//! that changed the cart, with the event and a freshly computed summary.
//! Operations that turn out to be no-ops (unknown id) notify nobody.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::cart::{
    AddOutcome, Cart, CartItem, CartSummary, DecrementOutcome, NewCartItem, ToggleOutcome,
};
use crate::config::StoreConfig;
use crate::error::CartError;
use crate::ids::{ProductId, SubscriptionId};
use crate::money::{Currency, Money};

/// A change that was applied to the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    /// A new line was inserted.
    Added { id: ProductId },
    /// A line's quantity changed and the line is still present.
    QuantityChanged { id: ProductId, quantity: u32 },
    /// A line was removed.
    Removed { id: ProductId },
    /// Every line was removed.
    Cleared,
    /// The cart was replaced from a snapshot.
    Restored,
}

pub(crate) type Listener = Rc<RefCell<dyn FnMut(&CartEvent, &CartSummary)>>;

/// Notifications held back until the store is no longer borrowed.
pub(crate) type Pending = Vec<(CartEvent, CartSummary)>;

/// Cart state plus its subscribers.
pub struct CartStore {
    cart: Cart,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    deferred: Option<Pending>,
}

impl CartStore {
    /// Create an empty store priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            cart: Cart::new(currency),
            listeners: Vec::new(),
            next_subscription: 0,
            deferred: None,
        }
    }

    /// Create an empty store from configuration.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.currency)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Add an item. An id already present has its quantity bumped by one;
    /// otherwise a new line with quantity 1 is inserted.
    pub fn add_to_cart(&mut self, item: NewCartItem) -> Result<AddOutcome, CartError> {
        let id = item.id;
        let outcome = self.cart.add_item(item)?;
        debug!(product_id = %id, ?outcome, "cart add");
        let event = match outcome {
            AddOutcome::Inserted => CartEvent::Added { id },
            AddOutcome::Incremented(quantity) => CartEvent::QuantityChanged { id, quantity },
        };
        self.notify(event);
        Ok(outcome)
    }

    /// Remove a line entirely. Returns `false` if the id was absent.
    pub fn remove_from_cart(&mut self, id: ProductId) -> bool {
        let removed = self.cart.remove_item(id);
        if removed {
            debug!(product_id = %id, "cart remove");
            self.notify(CartEvent::Removed { id });
        }
        removed
    }

    /// Bump a line's quantity by one. Returns `Ok(false)` if the id was absent.
    pub fn increment_quantity(&mut self, id: ProductId) -> Result<bool, CartError> {
        match self.cart.increment(id)? {
            Some(quantity) => {
                debug!(product_id = %id, quantity, "cart increment");
                self.notify(CartEvent::QuantityChanged { id, quantity });
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drop a line's quantity by one; a line at quantity 1 is removed.
    /// Returns `false` if the id was absent.
    pub fn decrement_quantity(&mut self, id: ProductId) -> bool {
        let event = match self.cart.decrement(id) {
            Some(DecrementOutcome::Decremented(quantity)) => {
                CartEvent::QuantityChanged { id, quantity }
            }
            Some(DecrementOutcome::Removed) => CartEvent::Removed { id },
            None => return false,
        };
        debug!(product_id = %id, ?event, "cart decrement");
        self.notify(event);
        true
    }

    /// Remove the line if present, otherwise add it.
    ///
    /// This is the "add / quit from cart" button behavior. It is an explicit
    /// alternative to [`add_to_cart`](Self::add_to_cart), not a replacement;
    /// callers choose which policy they want.
    pub fn toggle_item(&mut self, item: NewCartItem) -> Result<ToggleOutcome, CartError> {
        let id = item.id;
        let outcome = self.cart.toggle_item(item)?;
        debug!(product_id = %id, ?outcome, "cart toggle");
        let event = match outcome {
            ToggleOutcome::Added => CartEvent::Added { id },
            ToggleOutcome::Removed => CartEvent::Removed { id },
        };
        self.notify(event);
        Ok(outcome)
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        if self.cart.is_empty() {
            return;
        }
        self.cart.clear();
        debug!("cart cleared");
        self.notify(CartEvent::Cleared);
    }

    /// Swap in a cart rebuilt elsewhere (snapshot restore).
    pub(crate) fn replace_cart(&mut self, cart: Cart) {
        self.cart = cart;
        self.notify(CartEvent::Restored);
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Sum of quantities, for the cart-icon badge.
    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    /// Sum of price * quantity, for checkout display.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    pub fn summary(&self) -> CartSummary {
        self.cart.summary()
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.cart.get(id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.cart.contains(id)
    }

    pub fn len(&self) -> usize {
        self.cart.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn currency(&self) -> Currency {
        self.cart.currency()
    }

    /// Read-only view of the underlying cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    /// Register a listener called after every effective mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CartEvent, &CartSummary) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        let listener: Listener = Rc::new(RefCell::new(listener));
        self.listeners.push((id, listener));
        id
    }

    /// Drop a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() < len_before
    }

    /// Queue notifications instead of calling listeners, until
    /// [`take_deferred`](Self::take_deferred).
    pub(crate) fn defer_notifications(&mut self) {
        self.deferred = Some(Vec::new());
    }

    /// Stop queueing and hand back what was queued, with the listeners to
    /// call once the caller has released the store.
    pub(crate) fn take_deferred(&mut self) -> (Pending, Vec<Listener>) {
        let pending = self.deferred.take().unwrap_or_default();
        if pending.is_empty() {
            return (pending, Vec::new());
        }
        let listeners = self.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
        (pending, listeners)
    }

    fn notify(&mut self, event: CartEvent) {
        if self.listeners.is_empty() {
            return;
        }
        let summary = self.cart.summary();
        match &mut self.deferred {
            Some(queue) => queue.push((event, summary)),
            None => {
                for (_, listener) in &self.listeners {
                    call(listener, &event, &summary);
                }
            }
        }
    }
}

/// Call every listener for every queued notification.
pub(crate) fn dispatch(pending: &[(CartEvent, CartSummary)], listeners: &[Listener]) {
    for (event, summary) in pending {
        for listener in listeners {
            call(listener, event, summary);
        }
    }
}

/// A listener that changes the cart from inside its own callback is still
/// running when that change is announced; it is skipped for it.
fn call(listener: &Listener, event: &CartEvent, summary: &CartSummary) {
    if let Ok(mut listener) = listener.try_borrow_mut() {
        (&mut *listener)(event, summary);
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, cents: i64) -> NewCartItem {
        NewCartItem::new(id, format!("Product {id}"), Money::new(cents, Currency::BOB), "")
    }

    fn recording(store: &mut CartStore) -> Rc<RefCell<Vec<(CartEvent, CartSummary)>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        store.subscribe(move |event, summary| sink.borrow_mut().push((event.clone(), *summary)));
        log
    }

    #[test]
    fn test_listener_sees_each_change() {
        let mut store = CartStore::default();
        let log = recording(&mut store);

        store.add_to_cart(item(1, 1000)).unwrap();
        store.add_to_cart(item(1, 1000)).unwrap();
        store.decrement_quantity(ProductId::new(1));
        store.remove_from_cart(ProductId::new(1));

        let log = log.borrow();
        let events: Vec<&CartEvent> = log.iter().map(|(e, _)| e).collect();
        assert_eq!(
            events,
            vec![
                &CartEvent::Added { id: ProductId::new(1) },
                &CartEvent::QuantityChanged { id: ProductId::new(1), quantity: 2 },
                &CartEvent::QuantityChanged { id: ProductId::new(1), quantity: 1 },
                &CartEvent::Removed { id: ProductId::new(1) },
            ]
        );
        assert_eq!(log[1].1.total_items, 2);
        assert_eq!(log[1].1.total.amount_cents, 2000);
        assert!(log[3].1.is_empty());
    }

    #[test]
    fn test_noops_do_not_notify() {
        let mut store = CartStore::default();
        store.add_to_cart(item(1, 100)).unwrap();
        let log = recording(&mut store);

        assert!(!store.remove_from_cart(ProductId::new(9)));
        assert!(!store.increment_quantity(ProductId::new(9)).unwrap());
        assert!(!store.decrement_quantity(ProductId::new(9)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_failed_add_does_not_notify() {
        let mut store = CartStore::default();
        let log = recording(&mut store);
        let foreign = NewCartItem::new(1, "x", Money::new(100, Currency::USD), "");
        assert!(store.add_to_cart(foreign).is_err());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = CartStore::default();
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        let sub = store.subscribe(move |_, _| *c.borrow_mut() += 1);

        store.add_to_cart(item(1, 100)).unwrap();
        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.add_to_cart(item(2, 100)).unwrap();

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_clear_notifies_once() {
        let mut store = CartStore::default();
        store.add_to_cart(item(1, 100)).unwrap();
        store.add_to_cart(item(2, 100)).unwrap();
        let log = recording(&mut store);

        store.clear();
        store.clear();
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(log.borrow()[0].0, CartEvent::Cleared);
    }

    #[test]
    fn test_deferred_notifications_wait_for_dispatch() {
        let mut store = CartStore::default();
        let log = recording(&mut store);

        store.defer_notifications();
        store.add_to_cart(item(1, 100)).unwrap();
        store.add_to_cart(item(1, 100)).unwrap();
        assert!(log.borrow().is_empty());

        let (pending, listeners) = store.take_deferred();
        assert_eq!(pending.len(), 2);
        dispatch(&pending, &listeners);
        assert_eq!(log.borrow().len(), 2);
        assert_eq!(log.borrow()[1].1.total_items, 2);

        store.remove_from_cart(ProductId::new(1));
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn test_toggle_events() {
        let mut store = CartStore::default();
        let log = recording(&mut store);
        store.toggle_item(item(3, 100)).unwrap();
        store.toggle_item(item(3, 100)).unwrap();
        let log = log.borrow();
        assert_eq!(log[0].0, CartEvent::Added { id: ProductId::new(3) });
        assert_eq!(log[1].0, CartEvent::Removed { id: ProductId::new(3) });
    }
}
