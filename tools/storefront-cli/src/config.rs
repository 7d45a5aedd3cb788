//! CLI configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::cart::{DEFAULT_NOTIFICATION_TTL, DEFAULT_TAX_PERCENT};
use storefront_commerce::catalog::CatalogLatency;
use storefront_commerce::checkout::MockPaymentProcessor;
use storefront_commerce::CartStoreConfig;

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorefrontConfig {
    /// Where state is persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Cart store settings.
    #[serde(default)]
    pub cart: CartConfig,

    /// Mock catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Checkout and payment settings.
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

impl StorefrontConfig {
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

    /// Settings for the cart store.
    pub fn cart_store_config(&self) -> CartStoreConfig {
        CartStoreConfig {
            notification_ttl: Duration::from_secs(self.cart.notification_secs),
            tax_percent: self.checkout.tax_percent,
            ..CartStoreConfig::default()
        }
    }

    /// Simulated catalog latency.
    pub fn catalog_latency(&self) -> CatalogLatency {
        CatalogLatency {
            list: Duration::from_millis(self.catalog.list_delay_ms),
            product: Duration::from_millis(self.catalog.product_delay_ms),
        }
    }

    /// Payment processor for checkout.
    pub fn payment_processor(&self) -> MockPaymentProcessor {
        MockPaymentProcessor::new(Duration::from_millis(self.checkout.payment_delay_ms))
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Data directory (default: `~/.local/share/storefront`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Cart configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartConfig {
    /// Seconds a cart notification stays visible.
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
}

fn default_notification_secs() -> u64 {
    DEFAULT_NOTIFICATION_TTL.as_secs()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            notification_secs: default_notification_secs(),
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Delay before a product listing resolves.
    #[serde(default = "default_list_delay_ms")]
    pub list_delay_ms: u64,

    /// Delay before a single product resolves.
    #[serde(default = "default_product_delay_ms")]
    pub product_delay_ms: u64,
}

fn default_list_delay_ms() -> u64 {
    CatalogLatency::default().list.as_millis() as u64
}

fn default_product_delay_ms() -> u64 {
    CatalogLatency::default().product.as_millis() as u64
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            list_delay_ms: default_list_delay_ms(),
            product_delay_ms: default_product_delay_ms(),
        }
    }
}

/// Checkout configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutConfig {
    /// Sales tax in percent.
    #[serde(default = "default_tax_percent")]
    pub tax_percent: f64,

    /// Time the mock payment takes.
    #[serde(default = "default_payment_delay_ms")]
    pub payment_delay_ms: u64,
}

fn default_tax_percent() -> f64 {
    DEFAULT_TAX_PERCENT
}

fn default_payment_delay_ms() -> u64 {
    MockPaymentProcessor::DEFAULT_DELAY.as_millis() as u64
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            tax_percent: default_tax_percent(),
            payment_delay_ms: default_payment_delay_ms(),
        }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    r#"# Storefront configuration

[storage]
# data_dir = "/home/me/.local/share/storefront"

[cart]
# Seconds a cart notification stays visible
notification_secs = 3

[catalog]
# Simulated network latency
list_delay_ms = 500
product_delay_ms = 300

[checkout]
tax_percent = 10.0
payment_delay_ms = 2000
"#
    .to_string()
}
