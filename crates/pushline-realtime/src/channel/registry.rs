//! Channel registry holding one live channel per name.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use pushline_core::traits::Transport;

use crate::metrics::ClientMetrics;
use crate::notification::NotificationHub;

use super::channel::Channel;

/// Registry of all known channels, keyed by name.
#[derive(Debug)]
pub struct ChannelRegistry {
    /// Channel name → Channel.
    channels: DashMap<String, Arc<Channel>>,
    /// Transport handed to new channels.
    transport: Arc<dyn Transport>,
    /// Hub new channels listen on.
    hub: Arc<NotificationHub>,
    /// Counters shared with new channels.
    metrics: Arc<ClientMetrics>,
}

impl ChannelRegistry {
    /// Creates an empty registry.
    pub fn new(
        transport: Arc<dyn Transport>,
        hub: Arc<NotificationHub>,
        metrics: Arc<ClientMetrics>,
    ) -> Self {
        Self {
            channels: DashMap::new(),
            transport,
            hub,
            metrics,
        }
    }

    /// Returns the channel for `name`, creating it on first use.
    ///
    /// Repeated calls return the same instance. The channel is never
    /// subscribed here.
    pub fn add(&self, name: &str) -> Arc<Channel> {
        self.channels
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!(channel = %name, "Channel created");
                Channel::new(
                    name,
                    self.transport.clone(),
                    self.hub.clone(),
                    self.metrics.clone(),
                )
            })
            .clone()
    }

    /// Removes the channel for `name` and hands it back.
    ///
    /// The channel is **not** unsubscribed: releasing the remote subscription
    /// is the caller's responsibility. Returns `None` if no channel exists.
    pub fn remove(&self, name: &str) -> Option<Arc<Channel>> {
        let removed = self.channels.remove(name).map(|(_, channel)| channel);
        if removed.is_some() {
            debug!(channel = %name, "Channel removed");
        }
        removed
    }

    /// Looks up the channel for `name`.
    pub fn find(&self, name: &str) -> Option<Arc<Channel>> {
        self.channels.get(name).map(|channel| channel.value().clone())
    }

    /// Whether a channel exists for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    /// Names of all registered channels.
    pub fn names(&self) -> Vec<String> {
        self.channels.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Returns total number of registered channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
