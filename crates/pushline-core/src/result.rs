//! Convenience result type alias for Pushline.

use crate::error::AppError;

/// A specialized `Result` type for fallible Pushline operations.
pub type AppResult<T> = Result<T, AppError>;
