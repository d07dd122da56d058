//! Connection lifecycle events.

use serde::{Deserialize, Serialize};

use super::NotificationKind;

/// Lifecycle notifications emitted by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConnectionEvent {
    /// The transport is about to open a connection.
    WillConnect,
    /// The connection is established.
    DidConnect {
        /// Identifier assigned by the remote service.
        connection_id: String,
    },
    /// An established connection dropped.
    DidDisconnectWithError {
        /// Reason reported by the transport.
        error: String,
    },
    /// A connection attempt failed.
    FailedWithError {
        /// Reason reported by the transport.
        error: String,
    },
    /// The transport will retry on its own.
    WillAutomaticallyReconnect {
        /// Delay before the next attempt.
        delay_seconds: u64,
    },
}

impl ConnectionEvent {
    /// The listener routing key for this event.
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::WillConnect => NotificationKind::WillConnect,
            Self::DidConnect { .. } => NotificationKind::DidConnect,
            Self::DidDisconnectWithError { .. } => NotificationKind::DidDisconnectWithError,
            Self::FailedWithError { .. } => NotificationKind::FailedWithError,
            Self::WillAutomaticallyReconnect { .. } => NotificationKind::WillAutomaticallyReconnect,
        }
    }
}
