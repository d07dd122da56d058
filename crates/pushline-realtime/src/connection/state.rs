//! Connection state mirrored from transport lifecycle notifications.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use pushline_core::events::ConnectionEvent;

/// Snapshot of the connection state (serializable)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    /// Identifier assigned by the remote service while connected
    pub connection_id: Option<String>,
    /// Whether the transport reports an open connection
    pub connected: bool,
    /// When the current connection was established
    pub connected_at: Option<DateTime<Utc>>,
}

/// Connection fields owned by the client.
///
/// Only lifecycle events mutate this state.
#[derive(Debug, Default)]
pub struct ConnectionState {
    inner: Mutex<ConnectionInfo>,
}

impl ConnectionState {
    /// Creates a disconnected state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a lifecycle event.
    ///
    /// Returns `true` when a connection was established.
    pub fn apply(&self, event: &ConnectionEvent) -> bool {
        let mut current = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        match event {
            ConnectionEvent::WillConnect => {
                debug!("Transport connecting");
                false
            }
            ConnectionEvent::DidConnect { connection_id } => {
                current.connection_id = Some(connection_id.clone());
                current.connected = true;
                current.connected_at = Some(Utc::now());
                info!(connection_id = %connection_id, "Connected");
                true
            }
            ConnectionEvent::DidDisconnectWithError { error } => {
                current.connection_id = None;
                current.connected = false;
                current.connected_at = None;
                warn!(error = %error, "Disconnected");
                false
            }
            ConnectionEvent::FailedWithError { error } => {
                // A failed attempt keeps the last connection id.
                current.connected = false;
                warn!(error = %error, "Connection failed");
                false
            }
            ConnectionEvent::WillAutomaticallyReconnect { delay_seconds } => {
                debug!(delay_seconds, "Transport will reconnect");
                false
            }
        }
    }

    /// Identifier of the current connection.
    pub fn connection_id(&self) -> Option<String> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .connection_id
            .clone()
    }

    /// Whether the transport reports an open connection.
    pub fn is_connected(&self) -> bool {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).connected
    }

    /// Snapshot of all fields.
    pub fn info(&self) -> ConnectionInfo {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
