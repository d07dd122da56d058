//! # pushline-core
//!
//! Core crate for Pushline. Contains configuration schemas, the unified
//! error type, inbound notification records, typed identifiers and the
//! [`Transport`](traits::Transport) trait implemented by transport adapters.
//!
//! This crate has **no** internal dependencies on other Pushline crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
