//! Notification hub that fans transport notifications out to registered listeners.
//!
//! Transport adapters (or test doubles) call [`NotificationHub::emit`].
//! Channels and the client register listeners per [`NotificationKind`] and
//! keep the returned [`ListenerHandle`] for as long as they want delivery.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::{debug, trace};

use pushline_core::events::{Notification, NotificationKind};
use pushline_core::types::ListenerId;

use super::listener::ListenerHandle;

/// A registered notification listener.
pub type Listener = Arc<dyn Fn(&Notification) + Send + Sync>;

/// Entry in the hub.
struct ListenerEntry {
    /// Registration identifier.
    id: ListenerId,
    /// The listener.
    listener: Listener,
}

/// Registry of notification listeners organized by kind.
pub struct NotificationHub {
    /// Kind → listeners in registration order.
    listeners: Mutex<HashMap<NotificationKind, Vec<ListenerEntry>>>,
}

impl NotificationHub {
    /// Creates an empty hub.
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a listener for one notification kind.
    ///
    /// Delivery continues until the returned handle is removed or dropped.
    pub fn add_listener<F>(self: &Arc<Self>, kind: NotificationKind, listener: F) -> ListenerHandle
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        let id = ListenerId::new();
        let mut listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        listeners.entry(kind).or_default().push(ListenerEntry {
            id,
            listener: Arc::new(listener),
        });

        debug!(kind = %kind, listener_id = %id, "Listener registered");

        ListenerHandle::new(id, kind, Arc::downgrade(self))
    }

    /// Delivers a notification to every listener of its kind.
    ///
    /// Listeners run outside the hub lock, in registration order, so they may
    /// register or remove listeners themselves. Returns the number of
    /// listeners invoked.
    pub fn emit(&self, notification: &Notification) -> usize {
        let kind = notification.kind();
        let targets: Vec<Listener> = {
            let listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
            listeners
                .get(&kind)
                .map(|entries| entries.iter().map(|e| e.listener.clone()).collect())
                .unwrap_or_default()
        };

        trace!(kind = %kind, listeners = targets.len(), "Emitting notification");

        for listener in &targets {
            listener(notification);
        }

        targets.len()
    }

    /// Removes a registration. Returns `false` if it was not present.
    pub(crate) fn remove_listener(&self, kind: NotificationKind, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        let Some(entries) = listeners.get_mut(&kind) else {
            return false;
        };

        let before = entries.len();
        entries.retain(|e| e.id != id);
        let removed = entries.len() < before;

        if entries.is_empty() {
            listeners.remove(&kind);
        }

        if removed {
            debug!(kind = %kind, listener_id = %id, "Listener removed");
        }
        removed
    }

    /// Returns the number of listeners registered for a kind.
    pub fn listener_count(&self, kind: NotificationKind) -> usize {
        let listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        listeners.get(&kind).map(|entries| entries.len()).unwrap_or(0)
    }

    /// Returns the number of listeners across all kinds.
    pub fn total_listeners(&self) -> usize {
        let listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        listeners.values().map(Vec::len).sum()
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NotificationHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationHub")
            .field("listeners", &self.total_listeners())
            .finish()
    }
}
