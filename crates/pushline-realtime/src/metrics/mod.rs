//! Client-side counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Client-level metrics counters.
#[derive(Debug, Default)]
pub struct ClientMetrics {
    /// Events accepted by a subscribed channel
    pub events_dispatched: AtomicU64,
    /// Callback invocations
    pub callbacks_invoked: AtomicU64,
    /// Subscribe requests sent to the transport
    pub subscribe_requests: AtomicU64,
    /// Unsubscribe requests sent to the transport
    pub unsubscribe_requests: AtomicU64,
    /// Bind requests sent to the transport
    pub bind_requests: AtomicU64,
    /// Unbind requests sent to the transport
    pub unbind_requests: AtomicU64,
    /// Connections established
    pub connections_total: AtomicU64,
}

impl ClientMetrics {
    /// Create new zeroed metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event delivered to `callbacks` callbacks
    pub fn record_dispatch(&self, callbacks: usize) {
        self.events_dispatched.fetch_add(1, Ordering::Relaxed);
        self.callbacks_invoked
            .fetch_add(callbacks as u64, Ordering::Relaxed);
    }

    /// Record a subscribe request
    pub fn record_subscribe(&self) {
        self.subscribe_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an unsubscribe request
    pub fn record_unsubscribe(&self) {
        self.unsubscribe_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a bind request
    pub fn record_bind(&self) {
        self.bind_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an unbind request
    pub fn record_unbind(&self) {
        self.unbind_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an established connection
    pub fn record_connect(&self) {
        self.connections_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            events_dispatched: self.events_dispatched.load(Ordering::Relaxed),
            callbacks_invoked: self.callbacks_invoked.load(Ordering::Relaxed),
            subscribe_requests: self.subscribe_requests.load(Ordering::Relaxed),
            unsubscribe_requests: self.unsubscribe_requests.load(Ordering::Relaxed),
            bind_requests: self.bind_requests.load(Ordering::Relaxed),
            unbind_requests: self.unbind_requests.load(Ordering::Relaxed),
            connections_total: self.connections_total.load(Ordering::Relaxed),
        }
    }
}

/// Serializable metrics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Events accepted by a subscribed channel
    pub events_dispatched: u64,
    /// Callback invocations
    pub callbacks_invoked: u64,
    /// Subscribe requests sent to the transport
    pub subscribe_requests: u64,
    /// Unsubscribe requests sent to the transport
    pub unsubscribe_requests: u64,
    /// Bind requests sent to the transport
    pub bind_requests: u64,
    /// Unbind requests sent to the transport
    pub unbind_requests: u64,
    /// Connections established
    pub connections_total: u64,
}
