//! Promotion bundles.
//!
//! A promotion groups several products under one promotional price. In the
//! cart it is expanded into one line per included product, each keyed by the
//! product id and priced at the promotion price, so bundles aggregate with
//! ordinary adds of the same product.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cart::{AddOutcome, NewCartItem, ToggleOutcome};
use crate::catalog::{ImageResolver, Photo};
use crate::error::CartError;
use crate::ids::{ProductId, PromotionId};
use crate::money::{Currency, Money};
use crate::store::CartStore;

/// A product inside a promotion, as served by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleProduct {
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "fotos", default)]
    pub photos: Vec<Photo>,
}

/// A promotion record as served by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionRecord {
    pub id: PromotionId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio_promocion")]
    pub price: String,
    #[serde(rename = "productos", default)]
    pub products: Vec<BundleProduct>,
}

impl PromotionRecord {
    /// Parse the promotional price and build a bundle.
    pub fn into_bundle(self, currency: Currency) -> Result<PromotionBundle, CartError> {
        let price = Money::parse_decimal(&self.price, currency)?;
        Ok(PromotionBundle {
            id: self.id,
            name: self.name,
            price,
            products: self.products,
        })
    }
}

/// A promotion ready to be put in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionBundle {
    pub id: PromotionId,
    pub name: String,
    /// Price applied to every included product.
    pub price: Money,
    pub products: Vec<BundleProduct>,
}

impl PromotionBundle {
    /// One cart record per included product.
    pub fn cart_items(&self, images: &ImageResolver) -> Vec<NewCartItem> {
        self.products
            .iter()
            .map(|product| {
                NewCartItem::new(
                    product.id,
                    format!("{} - {}", self.name, product.name),
                    self.price,
                    images.resolve(product.photos.first()),
                )
            })
            .collect()
    }

    pub fn product_ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.products.iter().map(|p| p.id)
    }
}

impl CartStore {
    /// Add every product of a bundle, aggregating like individual adds.
    ///
    /// All or nothing: if any line would be rejected the cart is untouched.
    pub fn add_bundle(
        &mut self,
        bundle: &PromotionBundle,
        images: &ImageResolver,
    ) -> Result<Vec<AddOutcome>, CartError> {
        let items = bundle.cart_items(images);

        let mut trial = self.cart().clone();
        for item in &items {
            trial.add_item(item.clone())?;
        }

        debug!(promotion_id = %bundle.id, lines = items.len(), "cart add bundle");
        items
            .into_iter()
            .map(|item| self.add_to_cart(item))
            .collect()
    }

    /// Toggle every product of a bundle independently: present lines are
    /// removed, absent ones added.
    ///
    /// All or nothing, like [`add_bundle`](Self::add_bundle).
    pub fn toggle_bundle(
        &mut self,
        bundle: &PromotionBundle,
        images: &ImageResolver,
    ) -> Result<Vec<ToggleOutcome>, CartError> {
        let items = bundle.cart_items(images);

        let mut trial = self.cart().clone();
        for item in &items {
            trial.toggle_item(item.clone())?;
        }

        debug!(promotion_id = %bundle.id, lines = items.len(), "cart toggle bundle");
        items
            .into_iter()
            .map(|item| self.toggle_item(item))
            .collect()
    }

    /// Whether every product of the bundle is in the cart.
    pub fn bundle_in_cart(&self, bundle: &PromotionBundle) -> bool {
        !bundle.products.is_empty() && bundle.product_ids().all(|id| self.contains(id))
    }
}
