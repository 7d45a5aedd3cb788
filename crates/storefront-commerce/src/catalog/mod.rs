//! Product catalog module.
//!
//! Contains product and category types and the catalog collaborator the
//! shop pages read from.

mod category;
mod product;
mod source;

pub use category::{Category, CategoryFilter};
pub use product::{Product, Rating};
pub use source::{demo_products, Catalog, CatalogLatency, StaticCatalog};
