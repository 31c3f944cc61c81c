//! Store configuration.

use serde::{Deserialize, Serialize};

use crate::error::CartError;
use crate::money::Currency;

/// Settings for a cart session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Currency every cart price must be in.
    #[serde(default)]
    pub currency: Currency,

    /// Base URL that catalog photo paths are joined to.
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Image shown for records without photos.
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

fn default_image_base_url() -> String {
    "https://importadoramiranda.com/storage".to_string()
}

fn default_placeholder_image() -> String {
    "/placeholder.jpg".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            image_base_url: default_image_base_url(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

impl StoreConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, CartError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = StoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.currency, Currency::BOB);
    }

    #[test]
    fn test_overrides() {
        let config = StoreConfig::from_toml_str(
            r#"
currency = "USD"
image_base_url = "https://cdn.example/media"
"#,
        )
        .unwrap();
        assert_eq!(config.currency, Currency::USD);
        assert_eq!(config.image_base_url, "https://cdn.example/media");
        assert_eq!(config.placeholder_image, "/placeholder.jpg");
    }

    #[test]
    fn test_bad_currency_is_config_error() {
        let err = StoreConfig::from_toml_str(r#"currency = "XYZ""#).unwrap_err();
        assert!(matches!(err, CartError::Config(_)));
    }
}
