//! Product categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories the shop filter bar offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Jewelery,
    MensClothing,
    WomensClothing,
}

impl Category {
    /// Every category, in filter-bar order.
    pub const ALL: [Category; 4] = [
        Category::Electronics,
        Category::Jewelery,
        Category::MensClothing,
        Category::WomensClothing,
    ];

    /// Slug stored on products.
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Jewelery => "jewelery",
            Category::MensClothing => "men's clothing",
            Category::WomensClothing => "women's clothing",
        }
    }

    /// Parse a slug, ignoring case.
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(slug.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Shop listing filter: everything, or a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parse `"all"` or a category slug.
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Some(CategoryFilter::All);
        }
        Category::from_slug(value).map(CategoryFilter::Only)
    }

    /// Check if a product's category slug passes the filter.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c.slug().eq_ignore_ascii_case(category),
        }
    }
}
