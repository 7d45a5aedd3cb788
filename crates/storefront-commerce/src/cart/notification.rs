//! Transient user-facing notifications.
//!
//! Only the most recent message is shown. Raising a message aborts the hide
//! task of the previous one before scheduling its own, so an older timer can
//! never hide a newer message.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::cart::CartEvent;

/// How long a notification stays visible.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// What the notification toast displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Notification {
    /// Message text; empty while hidden.
    pub message: String,
    /// Whether the toast is on screen.
    pub is_visible: bool,
}

impl Notification {
    fn visible(message: &str) -> Self {
        Self {
            message: message.to_string(),
            is_visible: true,
        }
    }
}

struct Active {
    message: String,
    deadline: Instant,
}

#[derive(Default)]
struct Slot {
    active: Option<Active>,
    generation: u64,
    hide_task: Option<JoinHandle<()>>,
}

impl Slot {
    fn cancel_pending(&mut self) {
        if let Some(task) = self.hide_task.take() {
            task.abort();
        }
    }
}

/// Holds the current notification and its hide schedule.
///
/// Inside a tokio runtime each notification gets a hide task that emits
/// [`CartEvent::NotificationHidden`] when it fires. Visibility is also checked
/// against the deadline on read, so expiry works without a runtime too.
pub struct NotificationCenter {
    slot: Arc<Mutex<Slot>>,
    ttl: Duration,
    events: broadcast::Sender<CartEvent>,
}

impl NotificationCenter {
    /// Create a center that publishes on `events`.
    pub fn new(ttl: Duration, events: broadcast::Sender<CartEvent>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            ttl,
            events,
        }
    }

    /// Lifetime of each notification.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Show `message`, replacing whatever is on screen.
    pub fn show(&self, message: impl Into<String>) {
        let message = message.into();
        {
            let mut slot = lock(&self.slot);
            slot.cancel_pending();
            slot.generation = slot.generation.wrapping_add(1);
            slot.active = Some(Active {
                message: message.clone(),
                deadline: Instant::now() + self.ttl,
            });
            slot.hide_task = self.schedule_hide(slot.generation);
        }

        tracing::debug!(%message, "notification shown");
        let _ = self.events.send(CartEvent::NotificationShown(message));
    }

    /// Hide the current notification immediately (the toast's close button).
    pub fn hide(&self) {
        let was_visible = {
            let mut slot = lock(&self.slot);
            slot.cancel_pending();
            slot.generation = slot.generation.wrapping_add(1);
            slot.active
                .take()
                .is_some_and(|active| Instant::now() < active.deadline)
        };

        if was_visible {
            let _ = self.events.send(CartEvent::NotificationHidden);
        }
    }

    /// Current notification state.
    pub fn current(&self) -> Notification {
        let slot = lock(&self.slot);
        match &slot.active {
            Some(active) if Instant::now() < active.deadline => {
                Notification::visible(&active.message)
            }
            _ => Notification::default(),
        }
    }

    fn schedule_hide(&self, generation: u64) -> Option<JoinHandle<()>> {
        let handle = Handle::try_current().ok()?;
        let slot = Arc::clone(&self.slot);
        let events = self.events.clone();
        let ttl = self.ttl;

        Some(handle.spawn(async move {
            tokio::time::sleep(ttl).await;
            let hidden = {
                let mut slot = lock(&slot);
                if slot.generation == generation && slot.active.is_some() {
                    slot.active = None;
                    slot.hide_task = None;
                    true
                } else {
                    false
                }
            };
            if hidden {
                tracing::debug!("notification expired");
                let _ = events.send(CartEvent::NotificationHidden);
            }
        }))
    }
}

impl Drop for NotificationCenter {
    fn drop(&mut self) {
        lock(&self.slot).cancel_pending();
    }
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("ttl", &self.ttl)
            .field("current", &self.current())
            .finish()
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center() -> (NotificationCenter, broadcast::Receiver<CartEvent>) {
        let (tx, rx) = broadcast::channel(16);
        (NotificationCenter::new(DEFAULT_NOTIFICATION_TTL, tx), rx)
    }

    #[test]
    fn test_show_without_runtime() {
        let (center, mut rx) = center();
        center.show("Added Ring to your cart");

        assert_eq!(
            center.current(),
            Notification {
                message: "Added Ring to your cart".into(),
                is_visible: true
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            CartEvent::NotificationShown("Added Ring to your cart".into())
        );
    }

    #[test]
    fn test_newest_replaces_previous() {
        let (center, _rx) = center();
        center.show("first");
        center.show("second");
        assert_eq!(center.current().message, "second");
    }

    #[test]
    fn test_manual_hide() {
        let (center, mut rx) = center();
        center.show("hello");
        let _ = rx.try_recv();

        center.hide();
        assert!(!center.current().is_visible);
        assert_eq!(center.current().message, "");
        assert_eq!(rx.try_recv().unwrap(), CartEvent::NotificationHidden);

        // Hiding again does not publish a second event
        center.hide();
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expires_after_ttl() {
        let (center, mut rx) = center();
        center.show("hello");
        assert!(matches!(rx.recv().await, Ok(CartEvent::NotificationShown(_))));

        tokio::time::advance(Duration::from_millis(2900)).await;
        assert!(center.current().is_visible);

        assert_eq!(rx.recv().await.unwrap(), CartEvent::NotificationHidden);
        assert!(!center.current().is_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_old_timer_cannot_hide_new_message() {
        let (center, mut rx) = center();
        center.show("first");
        tokio::time::advance(Duration::from_secs(2)).await;
        center.show("second");

        // The first message's timer would have fired here
        tokio::time::advance(Duration::from_millis(1500)).await;
        tokio::task::yield_now().await;
        assert_eq!(center.current().message, "second");
        assert!(center.current().is_visible);

        // Exactly one hide event arrives, for the second message
        let mut hidden = 0;
        loop {
            match rx.recv().await.unwrap() {
                CartEvent::NotificationHidden => {
                    hidden += 1;
                    break;
                }
                CartEvent::NotificationShown(_) => {}
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert_eq!(hidden, 1);
        assert!(!center.current().is_visible);
        assert!(rx.try_recv().is_err());
    }
}
