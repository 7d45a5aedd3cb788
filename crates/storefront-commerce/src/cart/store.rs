//! The cart store: single source of truth for cart contents.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use storefront_cache::Cache;
use tokio::sync::broadcast;

use crate::cart::{
    CartLine, CartLines, LineChange, Notification, NotificationCenter, OrderSummary,
    DEFAULT_NOTIFICATION_TTL, DEFAULT_TAX_PERCENT,
};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;

/// Storage key holding the serialized line list.
pub const CART_STORAGE_KEY: &str = "cart";

/// Change notifications published to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    /// The line list changed; re-read count, total and lines.
    LinesChanged,
    /// The cart panel was opened (`true`) or closed (`false`).
    CartPanelToggled(bool),
    /// A notification became visible.
    NotificationShown(String),
    /// The visible notification was hidden.
    NotificationHidden,
    /// Writing the cart to storage failed. In-memory state is still updated.
    PersistFailed(String),
}

/// Cart store settings.
#[derive(Debug, Clone)]
pub struct CartStoreConfig {
    /// Key the line list is persisted under.
    pub storage_key: String,
    /// How long notifications stay visible.
    pub notification_ttl: Duration,
    /// Tax rate used by [`CartStore::order_summary`], in percent.
    pub tax_percent: f64,
    /// Buffered events per subscriber before old ones are dropped.
    pub event_capacity: usize,
}

impl Default for CartStoreConfig {
    fn default() -> Self {
        Self {
            storage_key: CART_STORAGE_KEY.to_string(),
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
            tax_percent: DEFAULT_TAX_PERCENT,
            event_capacity: 64,
        }
    }
}

#[derive(Debug, Default)]
struct CartState {
    lines: CartLines,
    is_open: bool,
}

struct Shared {
    state: Mutex<CartState>,
    cache: Cache,
    config: CartStoreConfig,
    notifications: NotificationCenter,
    events: broadcast::Sender<CartEvent>,
}

/// Owns the cart lines, persists them and announces changes.
///
/// Create one store when the application starts and hand clones to every
/// consumer; clones share state. Consumers read through accessors and mutate
/// only through the operations below, which never fail: storage problems
/// are logged and published as [`CartEvent::PersistFailed`].
///
/// # Example
///
/// ```rust
/// use storefront_cache::Cache;
/// use storefront_commerce::prelude::*;
///
/// let store = CartStore::open(Cache::in_memory(), CartStoreConfig::default());
/// let product = Product::new(1, "A", Money::usd(1000), "electronics", "a.png");
///
/// store.add_to_cart(&product, 1);
/// store.add_to_cart(&product, 2);
/// assert_eq!(store.cart_count(), 3);
/// assert_eq!(store.cart_total(), Money::usd(3000));
/// ```
#[derive(Clone)]
pub struct CartStore {
    shared: Arc<Shared>,
}

impl CartStore {
    /// Create the store, loading any previously persisted lines.
    ///
    /// A missing or unreadable value starts an empty cart.
    pub fn open(cache: Cache, config: CartStoreConfig) -> Self {
        let lines = load_lines(&cache, &config.storage_key);
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        let notifications = NotificationCenter::new(config.notification_ttl, events.clone());

        tracing::debug!(lines = lines.len(), key = %config.storage_key, "cart store opened");

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(CartState {
                    lines,
                    is_open: false,
                }),
                cache,
                config,
                notifications,
                events,
            }),
        }
    }

    /// Subscribe to change events.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.shared.events.subscribe()
    }

    /// Add `quantity` of `product`.
    ///
    /// An existing line for the same product is incremented; otherwise a new
    /// line is appended. A zero quantity does nothing.
    pub fn add_to_cart(&self, product: &Product, quantity: u32) {
        let change = self.mutate(|lines| lines.add(product.clone(), quantity));
        match change {
            LineChange::Added { title } => {
                self.notify(format!("Added {title} to your cart"));
            }
            LineChange::Incremented { title, .. } => {
                self.notify(format!("Updated quantity of {title} in your cart"));
            }
            _ => {
                tracing::debug!(id = %product.id, quantity, "ignored add with zero quantity");
            }
        }
    }

    /// Remove the line for `id`. Unknown ids are ignored silently.
    pub fn remove_from_cart(&self, id: ProductId) {
        if let LineChange::Removed { title } = self.mutate(|lines| lines.remove(id)) {
            self.notify(format!("Removed {title} from your cart"));
        }
    }

    /// Set the quantity for `id` to exactly `quantity`.
    ///
    /// Zero or a negative value removes the line, as [`Self::remove_from_cart`] does.
    pub fn update_quantity(&self, id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(id);
            return;
        }
        self.mutate(|lines| lines.set_quantity(id, quantity));
    }

    /// Empty the cart. Always announces, even if it was already empty.
    pub fn clear_cart(&self) {
        self.mutate(CartLines::clear);
        self.notify("Your cart has been cleared");
    }

    /// Sum of all line quantities (the badge count).
    pub fn cart_count(&self) -> u64 {
        self.state().lines.count()
    }

    /// Sum of `price × quantity` over all lines.
    pub fn cart_total(&self) -> Money {
        self.state().lines.total()
    }

    /// Subtotal, shipping, tax and total for the current lines.
    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary::new(self.cart_total(), self.shared.config.tax_percent)
    }

    /// Snapshot of the lines in display order.
    pub fn lines(&self) -> CartLines {
        self.state().lines.clone()
    }

    /// Line for `id`, if present.
    pub fn line(&self, id: ProductId) -> Option<CartLine> {
        self.state().lines.get(id).cloned()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.state().lines.is_empty()
    }

    /// Whether the cart panel is open.
    pub fn is_cart_open(&self) -> bool {
        self.state().is_open
    }

    /// Open or close the cart panel. Not persisted.
    pub fn set_cart_open(&self, open: bool) {
        let changed = {
            let mut state = self.state();
            let changed = state.is_open != open;
            state.is_open = open;
            changed
        };
        if changed {
            self.publish(CartEvent::CartPanelToggled(open));
        }
    }

    /// Flip the cart panel.
    pub fn toggle_cart(&self) {
        let open = !self.is_cart_open();
        self.set_cart_open(open);
    }

    /// Current notification.
    pub fn notification(&self) -> Notification {
        self.shared.notifications.current()
    }

    /// Dismiss the current notification.
    pub fn hide_notification(&self) {
        self.shared.notifications.hide();
    }

    /// Settings the store was opened with.
    pub fn config(&self) -> &CartStoreConfig {
        &self.shared.config
    }

    /// Apply `f` to the lines; on change, persist and publish.
    fn mutate<F>(&self, f: F) -> LineChange
    where
        F: FnOnce(&mut CartLines) -> LineChange,
    {
        let (change, persisted) = {
            let mut state = self.state();
            let change = f(&mut state.lines);
            let persisted = if change.is_change() {
                Some(self.persist(&state.lines))
            } else {
                None
            };
            (change, persisted)
        };

        match persisted {
            Some(Ok(())) => {
                tracing::debug!(?change, "cart updated");
                self.publish(CartEvent::LinesChanged);
            }
            Some(Err(reason)) => {
                self.publish(CartEvent::LinesChanged);
                self.publish(CartEvent::PersistFailed(reason));
            }
            None => {}
        }
        change
    }

    fn persist(&self, lines: &CartLines) -> Result<(), String> {
        let key = &self.shared.config.storage_key;
        self.shared.cache.set(key, lines).map_err(|e| {
            tracing::warn!(error = %e, key = %key, "failed to persist cart");
            e.to_string()
        })
    }

    fn notify(&self, message: impl Into<String>) {
        self.shared.notifications.show(message);
    }

    fn publish(&self, event: CartEvent) {
        // No subscribers is fine.
        let _ = self.shared.events.send(event);
    }

    fn state(&self) -> MutexGuard<'_, CartState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("CartStore")
            .field("lines", &state.lines.len())
            .field("is_open", &state.is_open)
            .finish_non_exhaustive()
    }
}

fn load_lines(cache: &Cache, key: &str) -> CartLines {
    match cache.get::<Vec<CartLine>>(key) {
        Ok(Some(lines)) => CartLines::from_lines(lines),
        Ok(None) => CartLines::new(),
        Err(e) => {
            tracing::warn!(error = %e, key, "discarding unreadable saved cart");
            CartLines::new()
        }
    }
}
