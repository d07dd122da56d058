//! Transport implementations shipped with the crate.

pub mod mock;

pub use mock::{MockTransport, TransportCall};
