//! Storefront domain types and logic.
//!
//! - **Catalog**: products, categories and the catalog collaborator
//! - **Cart**: cart lines, order pricing and the shared [`CartStore`]
//! - **Checkout**: shipping form, checkout steps and mock payment
//! - **Theme**: persisted light/dark preference
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::Cache;
//! use storefront_commerce::prelude::*;
//!
//! let store = CartStore::open(Cache::in_memory(), CartStoreConfig::default());
//! let product = Product::new(3, "Cotton Jacket", Money::usd(5599), "men's clothing", "j.png");
//!
//! store.add_to_cart(&product, 2);
//! assert_eq!(store.cart_count(), 2);
//! assert_eq!(store.cart_total().display(), "$111.98");
//! assert_eq!(store.notification().message, "Added Cotton Jacket to your cart");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod theme;

pub use cart::{CartEvent, CartStore, CartStoreConfig};
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};
pub use theme::{Theme, ThemeStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        Catalog, CatalogLatency, Category, CategoryFilter, Product, Rating, StaticCatalog,
    };

    // Cart
    pub use crate::cart::{
        CartEvent, CartLine, CartLines, CartStore, CartStoreConfig, Notification, OrderSummary,
    };

    // Checkout
    pub use crate::checkout::{
        CheckoutFlow, CheckoutStep, MockPaymentProcessor, PaymentDetails, PaymentProcessor,
        PaymentReceipt, ShippingInfo,
    };

    // Theme
    pub use crate::theme::{Theme, ThemeStore};
}
