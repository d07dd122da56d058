//! Ownership of a single hub registration.

use std::sync::Weak;
use std::sync::atomic::{AtomicBool, Ordering};

use pushline_core::events::NotificationKind;
use pushline_core::types::ListenerId;

use super::hub::NotificationHub;

/// Handle to a listener registered on a [`NotificationHub`].
///
/// The registration is released at most once: by [`ListenerHandle::remove`]
/// or, if still held, when the handle is dropped.
#[derive(Debug)]
pub struct ListenerHandle {
    /// Registration identifier.
    id: ListenerId,
    /// Kind the listener was registered for.
    kind: NotificationKind,
    /// Hub holding the registration.
    hub: Weak<NotificationHub>,
    /// Set once the registration has been released.
    released: AtomicBool,
}

impl ListenerHandle {
    pub(crate) fn new(id: ListenerId, kind: NotificationKind, hub: Weak<NotificationHub>) -> Self {
        Self {
            id,
            kind,
            hub,
            released: AtomicBool::new(false),
        }
    }

    /// Registration identifier.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Kind the listener receives.
    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Whether the registration is still held.
    pub fn is_active(&self) -> bool {
        !self.released.load(Ordering::SeqCst)
    }

    /// Releases the registration.
    ///
    /// Returns `true` on the first call and `false` on every later one.
    pub fn remove(&self) -> bool {
        if self.released.swap(true, Ordering::SeqCst) {
            return false;
        }
        if let Some(hub) = self.hub.upgrade() {
            hub.remove_listener(self.kind, self.id);
        }
        true
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.remove();
    }
}
