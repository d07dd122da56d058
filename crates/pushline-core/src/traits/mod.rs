//! Core traits defined in `pushline-core` and implemented by transport adapters.

pub mod transport;

pub use transport::Transport;
