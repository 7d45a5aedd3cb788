//! Commerce error types.

use thiserror::Error;

use crate::ids::ProductId;

/// Errors that can occur in storefront operations.
///
/// Cart mutations never return these; they are total over their inputs.
/// Errors come from the catalog, the checkout flow and payment.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Checkout was started with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Checkout incomplete.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Payment details rejected before processing.
    #[error("Invalid payment details: {0}")]
    InvalidPayment(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Storage error.
    #[error("Cache error: {0}")]
    CacheError(#[from] storefront_cache::CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
