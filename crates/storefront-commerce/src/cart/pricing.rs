//! Order summary shown on the cart, checkout and payment pages.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Default sales tax, in percent of the subtotal.
pub const DEFAULT_TAX_PERCENT: f64 = 10.0;

/// Subtotal, shipping, tax and grand total for a cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Shipping cost. Shipping is always free.
    pub shipping: Money,
    /// Tax on the subtotal, rounded to the cent.
    pub tax: Money,
    /// subtotal + shipping + tax.
    pub total: Money,
}

impl OrderSummary {
    /// Build a summary from a subtotal and a tax rate in percent.
    pub fn new(subtotal: Money, tax_percent: f64) -> Self {
        let shipping = Money::zero(subtotal.currency);
        let tax = subtotal.percentage(tax_percent);
        let total = Money::new(
            subtotal
                .amount_cents
                .saturating_add(shipping.amount_cents)
                .saturating_add(tax.amount_cents),
            subtotal.currency,
        );
        Self {
            subtotal,
            shipping,
            tax,
            total,
        }
    }

    /// Shipping label for display.
    pub fn shipping_label(&self) -> String {
        if self.shipping.is_zero() {
            "Free".to_string()
        } else {
            self.shipping.display()
        }
    }
}
