//! Recording transport for development and testing.
//!
//! Performs no I/O. Every request is appended to an in-memory log that
//! tests can inspect.

use std::sync::Mutex;

use pushline_core::traits::Transport;

/// One recorded transport request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    /// `connect(credential)`
    Connect(String),
    /// `subscribe(channel)`
    Subscribe(String),
    /// `unsubscribe(channel)`
    Unsubscribe(String),
    /// `bind(channel, event)`
    Bind {
        /// Channel name
        channel: String,
        /// Event name
        event: String,
    },
    /// `unbind(channel, event)`
    Unbind {
        /// Channel name
        channel: String,
        /// Event name
        event: String,
    },
}

/// Transport that records requests instead of sending them.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Requests in call order
    calls: Mutex<Vec<TransportCall>>,
}

impl MockTransport {
    /// Create an empty mock transport
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: TransportCall) {
        tracing::trace!(?call, "[MockTransport] request");
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }

    /// Snapshot of all requests so far
    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Forget all recorded requests
    pub fn clear(&self) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Number of recorded requests equal to `call`
    pub fn count(&self, call: &TransportCall) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|c| *c == call)
            .count()
    }

    /// Number of `connect` requests with this credential
    pub fn connect_count(&self, credential: &str) -> usize {
        self.count(&TransportCall::Connect(credential.to_string()))
    }

    /// Number of `subscribe` requests for a channel
    pub fn subscribe_count(&self, channel: &str) -> usize {
        self.count(&TransportCall::Subscribe(channel.to_string()))
    }

    /// Number of `unsubscribe` requests for a channel
    pub fn unsubscribe_count(&self, channel: &str) -> usize {
        self.count(&TransportCall::Unsubscribe(channel.to_string()))
    }

    /// Number of `bind` requests for a channel event
    pub fn bind_count(&self, channel: &str, event: &str) -> usize {
        self.count(&TransportCall::Bind {
            channel: channel.to_string(),
            event: event.to_string(),
        })
    }

    /// Number of `unbind` requests for a channel event
    pub fn unbind_count(&self, channel: &str, event: &str) -> usize {
        self.count(&TransportCall::Unbind {
            channel: channel.to_string(),
            event: event.to_string(),
        })
    }
}

impl Transport for MockTransport {
    fn connect(&self, credential: &str) {
        self.record(TransportCall::Connect(credential.to_string()));
    }

    fn subscribe(&self, channel: &str) {
        self.record(TransportCall::Subscribe(channel.to_string()));
    }

    fn unsubscribe(&self, channel: &str) {
        self.record(TransportCall::Unsubscribe(channel.to_string()));
    }

    fn bind(&self, channel: &str, event: &str) {
        self.record(TransportCall::Bind {
            channel: channel.to_string(),
            event: event.to_string(),
        });
    }

    fn unbind(&self, channel: &str, event: &str) {
        self.record(TransportCall::Unbind {
            channel: channel.to_string(),
            event: event.to_string(),
        });
    }
}
