//! Checkout module.
//!
//! Contains the checkout flow, shipping information and the simulated
//! payment step.

mod flow;
mod payment;
mod shipping;

pub use flow::{CheckoutFlow, CheckoutStep};
pub use payment::{MockPaymentProcessor, PaymentDetails, PaymentProcessor, PaymentReceipt};
pub use shipping::{ShippingInfo, DEFAULT_COUNTRY};
