//! Catalog records as served by the remote storefront API.
//!
//! Pages fetch these JSON collections and turn a record into a
//! [`NewCartItem`] when the shopper presses "add to cart". Field names follow
//! the API; Rust names are mapped with serde renames.

use serde::{Deserialize, Serialize};

use crate::cart::NewCartItem;
use crate::config::StoreConfig;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// A photo reference; the API sends either a bare path or `{ "foto": path }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Photo {
    Path(String),
    Object { foto: String },
}

impl Photo {
    pub fn path(&self) -> &str {
        match self {
            Photo::Path(p) => p,
            Photo::Object { foto } => foto,
        }
    }
}

/// One row of a product's price table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTier {
    #[serde(default)]
    pub precio_extra: Option<String>,
    #[serde(default)]
    pub precio_general: Option<String>,
    #[serde(default)]
    pub precio_unitario: Option<String>,
}

/// A product as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "precio", default)]
    pub base_price: Option<String>,
    #[serde(rename = "precio_extra", default)]
    pub extra_price: Option<String>,
    #[serde(rename = "precio_productos", default)]
    pub price_tiers: Vec<PriceTier>,
    #[serde(rename = "fotos", default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub stock: i64,
}

impl ProductRecord {
    /// Whether the product can be offered (carousels skip the rest).
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// The selling price string: first tier's `precio_extra`, then the
    /// record's own `precio_extra`, then `precio`.
    pub fn price_text(&self) -> Option<&str> {
        self.price_tiers
            .first()
            .and_then(|t| t.precio_extra.as_deref())
            .into_iter()
            .chain(self.extra_price.as_deref())
            .chain(self.base_price.as_deref())
            .map(str::trim)
            .find(|s| !s.is_empty())
    }

    /// Parsed selling price.
    pub fn price(&self, currency: Currency) -> Result<Money, CartError> {
        let text = self
            .price_text()
            .ok_or_else(|| CartError::InvalidPrice(format!("product {} has no price", self.id)))?;
        Money::parse_decimal(text, currency)
    }

    /// Build the cart record for this product.
    pub fn to_cart_item(&self, images: &ImageResolver) -> Result<NewCartItem, CartError> {
        Ok(NewCartItem::new(
            self.id,
            self.name.clone(),
            self.price(images.currency)?,
            images.resolve(self.photos.first()),
        ))
    }
}

/// Turns catalog photo paths into absolute image URLs.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    base_url: String,
    placeholder: String,
    currency: Currency,
}

impl ImageResolver {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            base_url: config.image_base_url.trim_end_matches('/').to_string(),
            placeholder: config.placeholder_image.clone(),
            currency: config.currency,
        }
    }

    /// URL for a photo, or the placeholder when there is none.
    pub fn resolve(&self, photo: Option<&Photo>) -> String {
        match photo.map(Photo::path).map(str::trim) {
            Some(path) if path.starts_with("http://") || path.starts_with("https://") => {
                path.to_string()
            }
            Some(path) if !path.is_empty() => {
                format!("{}/{}", self.base_url, path.trim_start_matches('/'))
            }
            _ => self.placeholder.clone(),
        }
    }

    /// Currency prices are parsed in.
    pub fn currency(&self) -> Currency {
        self.currency
    }
}
