//! Inbound notifications delivered by the transport.
//!
//! A transport adapter turns whatever its native bridge produces into a
//! [`Notification`] and emits it into the notification hub. Generic
//! channel events are consumed by channels; connection lifecycle events
//! are consumed by the client.

pub mod channel;
pub mod connection;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use channel::ChannelEvent;
pub use connection::ConnectionEvent;

/// Routing key for notification listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A named event on some channel.
    ChannelEvent,
    /// The transport is about to open a connection.
    WillConnect,
    /// The transport connected and was assigned a connection id.
    DidConnect,
    /// An established connection dropped.
    DidDisconnectWithError,
    /// A connection attempt failed.
    FailedWithError,
    /// The transport scheduled a reconnection attempt.
    WillAutomaticallyReconnect,
}

impl NotificationKind {
    /// The lifecycle kinds a client listens to.
    pub const LIFECYCLE: [NotificationKind; 5] = [
        NotificationKind::WillConnect,
        NotificationKind::DidConnect,
        NotificationKind::DidDisconnectWithError,
        NotificationKind::FailedWithError,
        NotificationKind::WillAutomaticallyReconnect,
    ];

    /// Stable string name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChannelEvent => "channel_event",
            Self::WillConnect => "will_connect",
            Self::DidConnect => "did_connect",
            Self::DidDisconnectWithError => "did_disconnect_with_error",
            Self::FailedWithError => "failed_with_error",
            Self::WillAutomaticallyReconnect => "will_automatically_reconnect",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything the transport can deliver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum Notification {
    /// A channel event.
    Event(ChannelEvent),
    /// A connection lifecycle change.
    Connection(ConnectionEvent),
}

impl Notification {
    /// The listener routing key for this notification.
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::Event(_) => NotificationKind::ChannelEvent,
            Self::Connection(event) => event.kind(),
        }
    }
}

impl From<ChannelEvent> for Notification {
    fn from(event: ChannelEvent) -> Self {
        Self::Event(event)
    }
}

impl From<ConnectionEvent> for Notification {
    fn from(event: ConnectionEvent) -> Self {
        Self::Connection(event)
    }
}
