//! Client configuration.

use serde::{Deserialize, Serialize};

/// Settings handed to the client at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Opaque credential passed to the transport's `connect`.
    pub app_key: String,
    /// Channels to subscribe to as soon as the client is built.
    #[serde(default)]
    pub channels: Vec<String>,
}

impl ClientConfig {
    /// Create a configuration with the given credential and no channels.
    pub fn new(app_key: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            channels: Vec::new(),
        }
    }

    /// Add a channel to subscribe on startup.
    pub fn with_channel(mut self, name: impl Into<String>) -> Self {
        self.channels.push(name.into());
        self
    }
}
