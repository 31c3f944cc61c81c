//! The cart collection and its merge policy.

use crate::cart::{CartItem, CartSummary, NewCartItem};
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Largest quantity a line can hold: the range of the quantity counter.
pub const MAX_QUANTITY_PER_ITEM: u32 = u32::MAX;

/// What `add_item` did with the incoming record.
///
/// Adding is a merge: an id already in the cart is aggregated into its
/// quantity, never duplicated. Name, price and image of the existing line are
/// kept as first added, so the incoming record's fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was created with quantity 1.
    Inserted,
    /// An existing line was bumped to this quantity.
    Incremented(u32),
}

/// What `toggle_item` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// What `decrement` did to a present line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecrementOutcome {
    /// Quantity dropped to this (still >= 1) value.
    Decremented(u32),
    /// Quantity was 1, so the line was removed.
    Removed,
}

/// An ordered, id-unique collection of cart lines.
///
/// Lines keep insertion order for display. Fields are private so every
/// change goes through the operations below, which hold the invariants:
/// unique ids, and `1 <= quantity <= MAX_QUANTITY_PER_ITEM`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    currency: Currency,
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
        }
    }

    /// Build a cart from lines that were already validated.
    pub(crate) fn from_validated(currency: Currency, items: Vec<CartItem>) -> Self {
        Self { currency, items }
    }

    /// Add an item, aggregating by id.
    ///
    /// Returns an error if:
    /// - A new line's price is negative or in another currency
    /// - The quantity counter would overflow
    ///
    /// The cart is unchanged on error.
    pub fn add_item(&mut self, item: NewCartItem) -> Result<AddOutcome, CartError> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = bumped(existing.quantity)?;
            return Ok(AddOutcome::Incremented(existing.quantity));
        }

        self.check_price(&item)?;
        self.items.push(CartItem::from_new(item));
        Ok(AddOutcome::Inserted)
    }

    /// Remove a line regardless of its quantity.
    pub fn remove_item(&mut self, id: ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() < len_before
    }

    /// Increase a line's quantity by one.
    ///
    /// Returns the new quantity, or `None` if the id is absent.
    pub fn increment(&mut self, id: ProductId) -> Result<Option<u32>, CartError> {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.quantity = bumped(item.quantity)?;
                Ok(Some(item.quantity))
            }
            None => Ok(None),
        }
    }

    /// Decrease a line's quantity by one, removing it instead of reaching 0.
    ///
    /// Returns `None` if the id is absent.
    pub fn decrement(&mut self, id: ProductId) -> Option<DecrementOutcome> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        let item = &mut self.items[pos];
        if item.quantity <= 1 {
            self.items.remove(pos);
            Some(DecrementOutcome::Removed)
        } else {
            item.quantity -= 1;
            Some(DecrementOutcome::Decremented(item.quantity))
        }
    }

    /// Remove the line if present, otherwise add it.
    pub fn toggle_item(&mut self, item: NewCartItem) -> Result<ToggleOutcome, CartError> {
        if self.remove_item(item.id) {
            Ok(ToggleOutcome::Removed)
        } else {
            self.add_item(item)?;
            Ok(ToggleOutcome::Added)
        }
    }

    /// Clear all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of price * quantity.
    pub fn total(&self) -> Money {
        Money::saturating_sum(self.items.iter().map(CartItem::line_total), self.currency)
    }

    /// Recompute the aggregate view.
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            total_items: self.total_items(),
            unique_items: self.items.len(),
            total: self.total(),
        }
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Get a line by id.
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Check whether a line with this id is present.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    fn check_price(&self, item: &NewCartItem) -> Result<(), CartError> {
        if item.price.currency != self.currency {
            return Err(CartError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.price.currency.code().to_string(),
            });
        }
        if item.price.is_negative() {
            return Err(CartError::NegativePrice(item.id.get()));
        }
        Ok(())
    }
}

fn bumped(quantity: u32) -> Result<u32, CartError> {
    quantity.checked_add(1).ok_or(CartError::QuantityExceedsLimit(
        u64::from(quantity) + 1,
        MAX_QUANTITY_PER_ITEM,
    ))
}
