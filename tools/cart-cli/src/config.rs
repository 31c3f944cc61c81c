//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_cart::config::StoreConfig;

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Cart store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Session persistence settings.
    #[serde(default)]
    pub session: SessionConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Where the cart snapshot lives between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Snapshot file, relative to the working directory.
    #[serde(default = "default_session_path")]
    pub path: String,
}

fn default_session_path() -> String {
    ".cart/session.json".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

/// Generate a default cart.toml config file.
pub fn generate_default_config() -> String {
    r#"# Storefront cart configuration

[store]
currency = "BOB"
image_base_url = "https://importadoramiranda.com/storage"
placeholder_image = "/placeholder.jpg"

[session]
path = ".cart/session.json"
"#
    .to_string()
}
