//! Product types.

use crate::catalog::Category;
use crate::ids::ProductId;
use crate::money::{self, Money};
use serde::{Deserialize, Serialize};

/// Aggregate customer rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rating {
    /// Average score, 0 to 5.
    pub rate: f64,
    /// Number of reviews.
    pub count: u32,
}

impl Rating {
    /// Create a rating, clamping the score into 0..=5.
    pub fn new(rate: f64, count: u32) -> Self {
        Self {
            rate: rate.clamp(0.0, 5.0),
            count,
        }
    }

    /// Number of filled stars when rendered out of five.
    pub fn stars(&self) -> u8 {
        self.rate.round().clamp(0.0, 5.0) as u8
    }
}

/// A product in the catalog.
///
/// The serialized form is the flat JSON object the storefront has always
/// persisted (`id`, `title`, `price`, `description`, `category`, `image`,
/// `rating`), with the price as a decimal number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub title: String,
    /// Unit price.
    #[serde(with = "money::decimal")]
    pub price: Money,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Category slug (e.g. "men's clothing").
    pub category: String,
    /// Image URI.
    pub image: String,
    /// Customer rating.
    #[serde(default)]
    pub rating: Rating,
}

impl Product {
    /// Create a product with an empty description and no reviews.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: Money,
        category: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            description: String::new(),
            category: category.into(),
            image: image.into(),
            rating: Rating::default(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the rating.
    pub fn with_rating(mut self, rate: f64, count: u32) -> Self {
        self.rating = Rating::new(rate, count);
        self
    }

    /// Known category, if the slug matches one.
    pub fn known_category(&self) -> Option<Category> {
        Category::from_slug(&self.category)
    }

    /// Check if the product belongs to `category`, ignoring case.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backpack() -> Product {
        Product::new(
            1,
            "Fjallraven Backpack",
            Money::usd(10995),
            "men's clothing",
            "https://example.com/1.jpg",
        )
        .with_rating(3.9, 120)
    }

    #[test]
    fn test_product_json_shape() {
        let json = serde_json::to_value(backpack()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["price"], 109.95);
        assert_eq!(json["rating"]["count"], 120);
    }

    #[test]
    fn test_product_deserialize_without_optional_fields() {
        let json = r#"{"id":3,"title":"Ring","price":9.99,"category":"jewelery","image":"x"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Money::usd(999));
        assert_eq!(product.rating.count, 0);
        assert!(product.description.is_empty());
    }

    #[test]
    fn test_in_category_case_insensitive() {
        let product = backpack();
        assert!(product.in_category("Men's Clothing"));
        assert!(!product.in_category("electronics"));
        assert_eq!(product.known_category(), Some(Category::MensClothing));
    }

    #[test]
    fn test_rating_clamped() {
        assert_eq!(Rating::new(7.0, 1).rate, 5.0);
        assert_eq!(Rating::new(3.6, 1).stars(), 4);
    }
}
