//! Cart lines and the ordered line list.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// One product in the cart with its quantity.
///
/// Serializes as the product's fields plus `quantity`, which is the format
/// persisted under the `cart` storage key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Snapshot of the product when it was added.
    #[serde(flatten)]
    pub product: Product,
    /// Quantity, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Create a line.
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Identity of the line.
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// `price × quantity`, or None on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.product.price.try_multiply(i64::from(self.quantity))
    }
}

/// What a mutation did to the line list.
#[derive(Debug, Clone, PartialEq)]
pub enum LineChange {
    /// A new line was appended.
    Added { title: String },
    /// An existing line's quantity was increased.
    Incremented { title: String, quantity: u32 },
    /// A line's quantity was set to an absolute value.
    QuantitySet { title: String, quantity: u32 },
    /// A line was deleted.
    Removed { title: String },
    /// All lines were deleted.
    Cleared { removed: usize },
    /// Nothing changed.
    Unchanged,
}

impl LineChange {
    /// Check if the list was modified.
    pub fn is_change(&self) -> bool {
        !matches!(self, LineChange::Unchanged)
    }
}

/// Ordered cart lines with at most one line per product.
///
/// Insertion order is display order. All operations are total; invalid
/// inputs leave the list untouched and report [`LineChange::Unchanged`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CartLines {
    lines: Vec<CartLine>,
}

impl CartLines {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from persisted lines, merging duplicate ids and dropping
    /// zero quantities so the one-line-per-product invariant holds.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut list = Self::new();
        for line in lines {
            list.add(line.product, line.quantity);
        }
        list
    }

    /// Add `quantity` of `product`. Increments an existing line or appends.
    pub fn add(&mut self, product: Product, quantity: u32) -> LineChange {
        if quantity == 0 {
            return LineChange::Unchanged;
        }

        if let Some(existing) = self.lines.iter_mut().find(|l| l.id() == product.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return LineChange::Incremented {
                title: product.title,
                quantity: existing.quantity,
            };
        }

        let title = product.title.clone();
        self.lines.push(CartLine::new(product, quantity));
        LineChange::Added { title }
    }

    /// Remove the line for `id`, if present.
    pub fn remove(&mut self, id: ProductId) -> LineChange {
        match self.lines.iter().position(|l| l.id() == id) {
            Some(index) => {
                let line = self.lines.remove(index);
                LineChange::Removed {
                    title: line.product.title,
                }
            }
            None => LineChange::Unchanged,
        }
    }

    /// Set the quantity for `id`. Zero or negative removes the line.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> LineChange {
        if quantity <= 0 {
            return self.remove(id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.lines.iter_mut().find(|l| l.id() == id) {
            Some(line) if line.quantity == quantity => LineChange::Unchanged,
            Some(line) => {
                line.quantity = quantity;
                LineChange::QuantitySet {
                    title: line.product.title.clone(),
                    quantity,
                }
            }
            None => LineChange::Unchanged,
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) -> LineChange {
        let removed = self.lines.len();
        self.lines.clear();
        LineChange::Cleared { removed }
    }

    /// Sum of all quantities.
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of `price × quantity` over all lines, saturating on overflow.
    pub fn total(&self) -> Money {
        self.lines.iter().fold(Money::zero(Currency::USD), |acc, line| {
            let line_total = line
                .line_total()
                .unwrap_or(Money::usd(i64::MAX));
            Money::usd(acc.amount_cents.saturating_add(line_total.amount_cents))
        })
    }

    /// Line for `id`.
    pub fn get(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id() == id)
    }

    /// Iterate lines in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartLine> {
        self.lines.iter()
    }

    /// Lines as a slice.
    pub fn as_slice(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<'a> IntoIterator for &'a CartLines {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
