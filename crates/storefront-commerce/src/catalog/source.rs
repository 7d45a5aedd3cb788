//! Catalog collaborator: where product data comes from.

use std::time::Duration;

use async_trait::async_trait;

use crate::catalog::{CategoryFilter, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// Read-only product source consumed by the shop pages and the cart.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// List every product.
    async fn list_products(&self) -> Result<Vec<Product>, CommerceError>;

    /// Look up one product.
    ///
    /// Returns [`CommerceError::ProductNotFound`] for an unknown id.
    async fn get_product(&self, id: ProductId) -> Result<Product, CommerceError>;

    /// List products whose category matches `category`, ignoring case.
    async fn products_by_category(&self, category: &str) -> Result<Vec<Product>, CommerceError>;

    /// List products passing a shop filter.
    async fn filtered(&self, filter: CategoryFilter) -> Result<Vec<Product>, CommerceError> {
        let products = self.list_products().await?;
        Ok(products
            .into_iter()
            .filter(|p| filter.matches(&p.category))
            .collect())
    }
}

/// Artificial latency applied before a catalog call resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogLatency {
    /// Delay for listing calls.
    pub list: Duration,
    /// Delay for single-product lookups.
    pub product: Duration,
}

impl CatalogLatency {
    /// No delay at all.
    pub const fn none() -> Self {
        Self {
            list: Duration::ZERO,
            product: Duration::ZERO,
        }
    }
}

impl Default for CatalogLatency {
    fn default() -> Self {
        Self {
            list: Duration::from_millis(500),
            product: Duration::from_millis(300),
        }
    }
}

/// In-memory catalog with simulated network latency.
///
/// The delay always runs to completion; there is no timeout, retry or
/// cancellation.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    products: Vec<Product>,
    latency: CatalogLatency,
}

impl StaticCatalog {
    /// Create a catalog over the given products.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            latency: CatalogLatency::default(),
        }
    }

    /// Catalog preloaded with the demo products.
    pub fn demo() -> Self {
        Self::new(demo_products())
    }

    /// Override the simulated latency.
    pub fn with_latency(mut self, latency: CatalogLatency) -> Self {
        self.latency = latency;
        self
    }

    /// Products without any delay.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    async fn delay(duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

#[async_trait]
impl Catalog for StaticCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, CommerceError> {
        Self::delay(self.latency.list).await;
        tracing::info!(count = self.products.len(), "loaded product listing");
        Ok(self.products.clone())
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, CommerceError> {
        Self::delay(self.latency.product).await;
        match self.products.iter().find(|p| p.id == id) {
            Some(product) => Ok(product.clone()),
            None => {
                tracing::warn!(%id, "product lookup failed");
                Err(CommerceError::ProductNotFound(id))
            }
        }
    }

    async fn products_by_category(&self, category: &str) -> Result<Vec<Product>, CommerceError> {
        Self::delay(self.latency.list).await;
        let products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.in_category(category))
            .cloned()
            .collect();
        tracing::info!(category, count = products.len(), "loaded category listing");
        Ok(products)
    }
}

/// Demo products shown by the shop.
pub fn demo_products() -> Vec<Product> {
    const IMG: &str = "https://fakestoreapi.com/img";
    vec![
        Product::new(1, "Fjallraven Foldsack No. 1 Backpack", Money::usd(10995), "men's clothing", format!("{IMG}/81fPKd-2AYL._AC_SL1500_.jpg"))
            .with_description("Your perfect pack for everyday use and walks in the forest. Stash your laptop (up to 15 inches) in the padded sleeve.")
            .with_rating(3.9, 120),
        Product::new(2, "Mens Casual Premium Slim Fit T-Shirts", Money::usd(2230), "men's clothing", format!("{IMG}/71-3HjGNDUL._AC_SY879._SX._UX._SY._UY_.jpg"))
            .with_description("Slim-fitting style, contrast raglan long sleeve, three-button henley placket.")
            .with_rating(4.1, 259),
        Product::new(3, "Mens Cotton Jacket", Money::usd(5599), "men's clothing", format!("{IMG}/71li-ujtlUL._AC_UX679_.jpg"))
            .with_description("Great outerwear jacket for spring, autumn and winter, suitable for many occasions.")
            .with_rating(4.7, 500),
        Product::new(5, "John Hardy Women's Legends Naga Bracelet", Money::usd(69500), "jewelery", format!("{IMG}/71pWzhdJNwL._AC_UL640_QL65_ML3_.jpg"))
            .with_description("From our Legends Collection, the Naga was inspired by the mythical water dragon that protects the ocean's pearl.")
            .with_rating(4.6, 400),
        Product::new(6, "Solid Gold Petite Micropave", Money::usd(16800), "jewelery", format!("{IMG}/61sbMiUnoGL._AC_UL640_QL65_ML3_.jpg"))
            .with_description("Satisfaction guaranteed. Return or exchange any order within 30 days.")
            .with_rating(3.9, 70),
        Product::new(8, "Pierced Owl Rose Gold Plated Stainless Steel Double", Money::usd(1099), "jewelery", format!("{IMG}/51UDEzMJVpL._AC_UL640_QL65_ML3_.jpg"))
            .with_description("Rose gold plated double flared tunnel plug earrings.")
            .with_rating(1.9, 100),
        Product::new(9, "WD 2TB Elements Portable External Hard Drive", Money::usd(6400), "electronics", format!("{IMG}/61IBBVJvSDL._AC_SY879_.jpg"))
            .with_description("USB 3.0 and USB 2.0 compatibility, fast data transfers, high capacity.")
            .with_rating(3.3, 203),
        Product::new(10, "SanDisk SSD PLUS 1TB Internal SSD", Money::usd(10900), "electronics", format!("{IMG}/61U7T1koQqL._AC_SX679_.jpg"))
            .with_description("Easy upgrade for faster boot up, shutdown, application load and response.")
            .with_rating(2.9, 470),
        Product::new(14, "Samsung 49-Inch CHG90 144Hz Curved Gaming Monitor", Money::usd(99999), "electronics", format!("{IMG}/81Zt42ioCgL._AC_SX679_.jpg"))
            .with_description("49 inch super ultrawide 32:9 curved gaming monitor with dual 27 inch screen side by side.")
            .with_rating(2.2, 140),
        Product::new(15, "BIYLACLESEN Women's 3-in-1 Snowboard Jacket", Money::usd(5699), "women's clothing", format!("{IMG}/51Y5NI-I5jL._AC_UX679_.jpg"))
            .with_description("Detachable liner fabric, warm fleece, and a hood for winter sports.")
            .with_rating(2.6, 235),
        Product::new(18, "MBJ Women's Solid Short Sleeve Boat Neck V", Money::usd(985), "women's clothing", format!("{IMG}/71z3kpMAYsL._AC_UY879_.jpg"))
            .with_description("Lightweight fabric with great stretch for comfort, ribbed on sleeves and neckline.")
            .with_rating(4.7, 130),
        Product::new(20, "DANVOUY Womens T Shirt Casual Cotton Short", Money::usd(1299), "women's clothing", format!("{IMG}/61pHAEJ4NML._AC_UX679_.jpg"))
            .with_description("95% cotton, 5% spandex. Casual, short sleeve, letter print, V-neck.")
            .with_rating(3.6, 145),
    ]
}
