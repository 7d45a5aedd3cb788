//! Shopping cart module.
//!
//! Contains cart lines, order pricing, notifications and the cart store
//! that owns them.

mod line;
mod notification;
mod pricing;
mod store;

pub use line::{CartLine, CartLines, LineChange};
pub use notification::{Notification, NotificationCenter, DEFAULT_NOTIFICATION_TTL};
pub use pricing::{OrderSummary, DEFAULT_TAX_PERCENT};
pub use store::{CartEvent, CartStore, CartStoreConfig, CART_STORAGE_KEY};
