//! Channels, their callback tables, and the registry that owns them.

pub mod callbacks;
pub mod channel;
pub mod registry;
pub mod types;

pub use callbacks::{CallbackTable, EventCallback};
pub use channel::Channel;
pub use registry::ChannelRegistry;
pub use types::ChannelKind;
