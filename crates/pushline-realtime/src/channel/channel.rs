//! Single channel with subscription state and bound callbacks.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tracing::{debug, trace};

use pushline_core::events::{ChannelEvent, Notification, NotificationKind};
use pushline_core::traits::Transport;

use crate::metrics::ClientMetrics;
use crate::notification::{ListenerHandle, NotificationHub};

use super::callbacks::{CallbackTable, EventCallback};
use super::types::ChannelKind;

/// A named pub/sub topic.
///
/// Every channel listens to all channel events on the hub and keeps only
/// those addressed to its own name. Nothing is dispatched while the channel
/// is unsubscribed.
pub struct Channel {
    /// Channel name.
    name: String,
    /// Kind derived from the name.
    kind: ChannelKind,
    /// Whether the remote subscription is active.
    subscribed: AtomicBool,
    /// Event name → callbacks.
    callbacks: CallbackTable,
    /// Hub registration, `None` once released.
    listener: Mutex<Option<ListenerHandle>>,
    /// Outbound primitives.
    transport: Arc<dyn Transport>,
    /// Inbound notifications.
    hub: Arc<NotificationHub>,
    /// Shared counters.
    metrics: Arc<ClientMetrics>,
    /// Self reference handed to hub listeners.
    this: Weak<Channel>,
}

impl Channel {
    /// Creates an unsubscribed channel and registers its hub listener.
    pub fn new(
        name: impl Into<String>,
        transport: Arc<dyn Transport>,
        hub: Arc<NotificationHub>,
        metrics: Arc<ClientMetrics>,
    ) -> Arc<Self> {
        let name = name.into();
        Arc::new_cyclic(|this| {
            let listener = Self::listen(&hub, this.clone());
            Self {
                kind: ChannelKind::from_name(&name),
                name,
                subscribed: AtomicBool::new(false),
                callbacks: CallbackTable::new(),
                listener: Mutex::new(Some(listener)),
                transport,
                hub,
                metrics,
                this: this.clone(),
            }
        })
    }

    fn listen(hub: &Arc<NotificationHub>, this: Weak<Channel>) -> ListenerHandle {
        hub.add_listener(NotificationKind::ChannelEvent, move |notification| {
            if let Notification::Event(event) = notification {
                if let Some(channel) = this.upgrade() {
                    channel.handle_event(event);
                }
            }
        })
    }

    /// Channel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Channel kind.
    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    /// Whether the channel is subscribed.
    pub fn is_subscribed(&self) -> bool {
        self.subscribed.load(Ordering::SeqCst)
    }

    /// Whether the hub registration is still held.
    pub fn has_listener(&self) -> bool {
        self.listener
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(ListenerHandle::is_active)
    }

    /// Delivers an inbound event to the callbacks bound to its name.
    ///
    /// Events for other channels, and any event while unsubscribed, are
    /// ignored. Returns the number of callbacks invoked.
    pub fn handle_event(&self, event: &ChannelEvent) -> usize {
        if !self.is_subscribed() || event.channel != self.name {
            return 0;
        }

        // Snapshot so callbacks can bind/unbind on this channel.
        let callbacks = self.callbacks.callbacks(&event.name);
        trace!(
            channel = %self.name,
            event = %event.name,
            callbacks = callbacks.len(),
            "Dispatching event"
        );

        for callback in &callbacks {
            callback.call(&event.data);
        }

        self.metrics.record_dispatch(callbacks.len());
        callbacks.len()
    }

    /// Subscribes the channel on the transport.
    ///
    /// Returns `false` without side effects when already subscribed. Of
    /// several concurrent callers exactly one sends the transport request.
    pub fn subscribe(&self) -> bool {
        {
            let mut listener = self.listener.lock().unwrap_or_else(|e| e.into_inner());
            if self
                .subscribed
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_err()
            {
                return false;
            }
            if listener.is_none() {
                *listener = Some(Self::listen(&self.hub, self.this.clone()));
            }
        }

        self.transport.subscribe(&self.name);
        self.metrics.record_subscribe();

        debug!(
            channel = %self.name,
            kind = %self.kind,
            auth = self.kind.requires_auth(),
            "Channel subscribed"
        );
        true
    }

    /// Unsubscribes the channel and releases its hub registration.
    ///
    /// Returns `false` without side effects when not subscribed. Of several
    /// concurrent callers exactly one sends the transport request.
    pub fn unsubscribe(&self) -> bool {
        let handle = {
            let mut listener = self.listener.lock().unwrap_or_else(|e| e.into_inner());
            if self
                .subscribed
                .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
                .is_err()
            {
                return false;
            }
            listener.take()
        };

        if let Some(handle) = handle {
            handle.remove();
        }
        self.transport.unsubscribe(&self.name);
        self.metrics.record_unsubscribe();

        debug!(channel = %self.name, "Channel unsubscribed");
        true
    }

    /// Binds a callback to an event name.
    ///
    /// The transport is told about the event only when the first callback for
    /// it is bound. The same callback may be bound more than once and is then
    /// invoked once per binding.
    pub fn bind(&self, event: &str, callback: EventCallback) {
        if self.callbacks.push(event, callback) {
            self.transport.bind(&self.name, event);
            self.metrics.record_bind();
            debug!(channel = %self.name, event = %event, "Event bound");
        }
    }

    /// Wraps a closure, binds it, and returns the handle needed to unbind it.
    pub fn on<F>(&self, event: &str, callback: F) -> EventCallback
    where
        F: Fn(&serde_json::Value) + Send + Sync + 'static,
    {
        let callback = EventCallback::new(callback);
        self.bind(event, callback.clone());
        callback
    }

    /// Removes every binding of `callback` for an event name.
    ///
    /// Unknown event names are ignored. Otherwise the transport is told to
    /// unbind the event even if other callbacks remain bound to it. Returns
    /// whether an entry for the event existed.
    pub fn unbind(&self, event: &str, callback: &EventCallback) -> bool {
        let Some(remaining) = self.callbacks.remove(event, callback) else {
            return false;
        };

        self.transport.unbind(&self.name, event);
        self.metrics.record_unbind();

        debug!(channel = %self.name, event = %event, remaining, "Event unbound");
        true
    }

    /// Event names with at least one bound callback.
    pub fn bound_events(&self) -> Vec<String> {
        self.callbacks.event_names()
    }

    /// Number of callbacks bound to an event name.
    pub fn callback_count(&self, event: &str) -> usize {
        self.callbacks.callback_count(event)
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("subscribed", &self.is_subscribed())
            .field("events", &self.callbacks.len())
            .finish()
    }
}
