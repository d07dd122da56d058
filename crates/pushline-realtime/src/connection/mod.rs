//! Connection state tracking.

pub mod state;

pub use state::{ConnectionInfo, ConnectionState};
