//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use serde_json::Value;

use pushline_core::events::{ChannelEvent, ConnectionEvent, Notification};
use pushline_realtime::{
    Channel, ChannelRegistry, Client, ClientMetrics, EventCallback, MockTransport, NotificationHub,
};

/// Test context around a client
pub struct TestClient {
    /// The client under test
    pub client: Client,
    /// Recording transport behind the client
    pub transport: Arc<MockTransport>,
    /// Hub the transport emits into
    pub hub: Arc<NotificationHub>,
}

impl TestClient {
    /// Create a client connected with `credential`
    pub fn new(credential: &str) -> Self {
        let transport = Arc::new(MockTransport::new());
        let hub = Arc::new(NotificationHub::new());
        let client = Client::new(credential, transport.clone(), hub.clone());
        Self {
            client,
            transport,
            hub,
        }
    }

    /// Deliver a channel event through the hub
    pub fn deliver(&self, channel: &str, name: &str, data: Value) -> usize {
        self.hub.emit(&event(channel, name, data))
    }

    /// Deliver a lifecycle notification through the hub
    pub fn lifecycle(&self, event: ConnectionEvent) {
        self.hub.emit(&Notification::Connection(event));
    }
}

/// Test context around a bare registry
pub struct TestRegistry {
    /// The registry under test
    pub registry: ChannelRegistry,
    /// Recording transport
    pub transport: Arc<MockTransport>,
    /// Hub channels listen on
    pub hub: Arc<NotificationHub>,
}

impl TestRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        let transport = Arc::new(MockTransport::new());
        let hub = Arc::new(NotificationHub::new());
        let registry = ChannelRegistry::new(
            transport.clone(),
            hub.clone(),
            Arc::new(ClientMetrics::new()),
        );
        Self {
            registry,
            transport,
            hub,
        }
    }

    /// Registered and subscribed channel
    pub fn subscribed(&self, name: &str) -> Arc<Channel> {
        let channel = self.registry.add(name);
        channel.subscribe();
        channel
    }

    /// Emit a channel event through the hub
    pub fn deliver(&self, channel: &str, name: &str, data: Value) {
        self.hub.emit(&event(channel, name, data));
    }
}

/// Build a channel event notification
pub fn event(channel: &str, name: &str, data: Value) -> Notification {
    Notification::Event(ChannelEvent::new(channel, name, data))
}

/// Shared log of `(tag, payload)` pairs written by recording callbacks
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<(String, Value)>>>);

impl CallLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that appends `(tag, data)` on every invocation
    pub fn callback(&self, tag: &str) -> EventCallback {
        let log = self.0.clone();
        let tag = tag.to_string();
        EventCallback::new(move |data| log.lock().unwrap().push((tag.clone(), data.clone())))
    }

    /// All recorded entries
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0.lock().unwrap().clone()
    }

    /// Recorded tags in invocation order
    pub fn tags(&self) -> Vec<String> {
        self.entries().into_iter().map(|(tag, _)| tag).collect()
    }

    /// Number of recorded invocations
    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}
