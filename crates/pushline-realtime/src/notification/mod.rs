//! Inbound notification fan-out.

pub mod hub;
pub mod listener;

pub use hub::{Listener, NotificationHub};
pub use listener::ListenerHandle;
