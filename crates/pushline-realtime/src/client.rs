//! Top-level client that ties the registry to the transport.

use std::sync::Arc;

use tracing::{debug, info};

use pushline_core::config::ClientConfig;
use pushline_core::events::{ConnectionEvent, Notification, NotificationKind};
use pushline_core::traits::Transport;

use crate::channel::channel::Channel;
use crate::channel::registry::ChannelRegistry;
use crate::connection::state::{ConnectionInfo, ConnectionState};
use crate::metrics::{ClientMetrics, MetricsSnapshot};
use crate::notification::{ListenerHandle, NotificationHub};

/// Client facade over one transport connection.
///
/// Connection fields change only through lifecycle notifications (or the
/// equivalent `on_*` methods); subscribe and unsubscribe never touch them.
#[derive(Debug)]
pub struct Client {
    /// Channel registry.
    registry: ChannelRegistry,
    /// Connection fields.
    connection: Arc<ConnectionState>,
    /// Counters shared with every channel.
    metrics: Arc<ClientMetrics>,
    /// Lifecycle listener registrations, released on drop.
    lifecycle: Vec<ListenerHandle>,
}

impl Client {
    /// Creates a client, registers its lifecycle listeners and asks the
    /// transport to connect with `credential`.
    pub fn new(
        credential: impl Into<String>,
        transport: Arc<dyn Transport>,
        hub: Arc<NotificationHub>,
    ) -> Self {
        let credential = credential.into();
        let metrics = Arc::new(ClientMetrics::new());
        let connection = Arc::new(ConnectionState::new());
        let registry = ChannelRegistry::new(transport.clone(), hub.clone(), metrics.clone());

        let lifecycle = NotificationKind::LIFECYCLE
            .iter()
            .map(|kind| {
                let connection = connection.clone();
                let metrics = metrics.clone();
                hub.add_listener(*kind, move |notification| {
                    if let Notification::Connection(event) = notification {
                        apply_lifecycle(&connection, &metrics, event);
                    }
                })
            })
            .collect();

        transport.connect(&credential);
        info!("Client initialized, connecting");

        Self {
            registry,
            connection,
            metrics,
            lifecycle,
        }
    }

    /// Creates a client from configuration and subscribes the configured
    /// channels.
    pub fn from_config(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
        hub: Arc<NotificationHub>,
    ) -> Self {
        let client = Self::new(config.app_key.clone(), transport, hub);
        for name in &config.channels {
            client.subscribe(name);
        }
        client
    }

    /// Returns the channel for `name`, creating and subscribing it as needed.
    pub fn subscribe(&self, name: &str) -> Arc<Channel> {
        let channel = self.registry.add(name);
        channel.subscribe();
        channel
    }

    /// Removes the channel for `name` from the registry and unsubscribes it.
    ///
    /// Returns the removed channel, or `None` if it was never registered.
    pub fn unsubscribe(&self, name: &str) -> Option<Arc<Channel>> {
        let channel = self.registry.remove(name)?;
        channel.unsubscribe();
        debug!(channel = %name, "Client unsubscribed channel");
        Some(channel)
    }

    /// Returns the registered channel for `name`, subscribing it if absent.
    pub fn channel(&self, name: &str) -> Arc<Channel> {
        match self.registry.find(name) {
            Some(channel) => channel,
            None => self.subscribe(name),
        }
    }

    /// Looks up a registered channel.
    pub fn find(&self, name: &str) -> Option<Arc<Channel>> {
        self.registry.find(name)
    }

    /// The channel registry.
    pub fn channels(&self) -> &ChannelRegistry {
        &self.registry
    }

    /// Identifier of the current connection.
    pub fn connection_id(&self) -> Option<String> {
        self.connection.connection_id()
    }

    /// Whether the transport reports an open connection.
    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// Snapshot of the connection fields.
    pub fn connection_info(&self) -> ConnectionInfo {
        self.connection.info()
    }

    /// Snapshot of the client counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Number of lifecycle listeners still registered.
    pub fn lifecycle_listener_count(&self) -> usize {
        self.lifecycle.iter().filter(|h| h.is_active()).count()
    }

    /// The transport is about to connect. No state changes.
    pub fn on_will_connect(&self) {
        self.handle(&ConnectionEvent::WillConnect);
    }

    /// The transport connected with `connection_id`.
    pub fn on_did_connect(&self, connection_id: &str) {
        self.handle(&ConnectionEvent::DidConnect {
            connection_id: connection_id.to_string(),
        });
    }

    /// An established connection dropped.
    pub fn on_did_disconnect_with_error(&self, error: &str) {
        self.handle(&ConnectionEvent::DidDisconnectWithError {
            error: error.to_string(),
        });
    }

    /// A connection attempt failed. The connection id is kept.
    pub fn on_failed_with_error(&self, error: &str) {
        self.handle(&ConnectionEvent::FailedWithError {
            error: error.to_string(),
        });
    }

    /// The transport will reconnect on its own. No state changes.
    pub fn on_will_automatically_reconnect(&self, delay_seconds: u64) {
        self.handle(&ConnectionEvent::WillAutomaticallyReconnect { delay_seconds });
    }

    fn handle(&self, event: &ConnectionEvent) {
        apply_lifecycle(&self.connection, &self.metrics, event);
    }
}

fn apply_lifecycle(connection: &ConnectionState, metrics: &ClientMetrics, event: &ConnectionEvent) {
    if connection.apply(event) {
        metrics.record_connect();
    }
}
