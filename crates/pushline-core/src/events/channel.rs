//! Channel event records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::result::AppResult;

/// A named message carrying opaque data, scoped to one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelEvent {
    /// Channel the event was published on.
    pub channel: String,
    /// Event name.
    pub name: String,
    /// Opaque payload.
    #[serde(default)]
    pub data: Value,
}

impl ChannelEvent {
    /// Create a new channel event.
    pub fn new(channel: impl Into<String>, name: impl Into<String>, data: Value) -> Self {
        Self {
            channel: channel.into(),
            name: name.into(),
            data,
        }
    }

    /// Parse an event record of the shape `{"channel", "name", "data"}`.
    pub fn from_json(text: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
