//! Cart error types.

use thiserror::Error;

/// Errors that can occur in cart operations.
///
/// Ordinary cart mutations on well-formed input never fail; these variants
/// cover malformed input, the opt-in snapshot contract and the collaborators
/// around the store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CartError {
    /// Item price is in a different currency than the cart.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Unit price below zero.
    #[error("Negative price for product {0}")]
    NegativePrice(i64),

    /// Price string could not be parsed.
    #[error("Invalid price: {0:?}")]
    InvalidPrice(String),

    /// Quantity counter would overflow.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(u64, u32),

    /// Checkout requested on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Snapshot failed validation.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// No wholesale code was entered.
    #[error("Wholesale code is empty")]
    EmptyCode,

    /// Wholesale code unknown or inactive.
    #[error("Wholesale code is invalid or inactive: {0}")]
    InvalidCode(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CartError {
    fn from(e: serde_json::Error) -> Self {
        CartError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for CartError {
    fn from(e: toml::de::Error) -> Self {
        CartError::Config(e.to_string())
    }
}
