//! # pushline-realtime
//!
//! Client-side channel registry for a hosted pub/sub service. Provides:
//!
//! - A notification hub that fans transport notifications out to listeners
//! - Channels with subscription state and per-event callback lists
//! - A registry holding one live channel per name
//! - A client facade tracking connection state from lifecycle notifications
//! - A recording mock transport for tests
//!
//! The realtime connection itself is external: anything implementing
//! [`Transport`](pushline_core::traits::Transport) can back a [`Client`].

pub mod channel;
pub mod client;
pub mod connection;
pub mod metrics;
pub mod notification;
pub mod transport;

pub use channel::{Channel, ChannelKind, ChannelRegistry, EventCallback};
pub use client::Client;
pub use connection::{ConnectionInfo, ConnectionState};
pub use metrics::{ClientMetrics, MetricsSnapshot};
pub use notification::{ListenerHandle, NotificationHub};
pub use transport::{MockTransport, TransportCall};
