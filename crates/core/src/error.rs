//! Structured error handling for the admin client.
//!
//! Every field validator reports failure as [`AppError::InvalidArgument`];
//! callers either propagate it as an API usage error or translate it into
//! their own error envelope.

use std::fmt::Display;

use thiserror::Error;
use tracing::error;

/// Application error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Internal: {0}")]
    Internal(String),
}

impl AppError {
    /// Create an invalid argument error carrying `msg`.
    #[must_use]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// The message without the variant prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidArgument(msg) | Self::Internal(msg) => msg,
        }
    }

    /// Returns `true` for validation failures.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Extension trait for converting foreign errors to [`AppError::Internal`] with logging.
pub trait InternalExt<T> {
    /// Convert the error to `AppError::Internal`, logging the source.
    ///
    /// # Errors
    /// Returns `AppError::Internal` with the provided message.
    fn internal(self, msg: &'static str) -> Result<T, AppError>;
}

impl<T, E: Display> InternalExt<T> for Result<T, E> {
    fn internal(self, msg: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            error!(error = %e, "{msg}");
            AppError::Internal(format!("{msg}: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_formats_with_prefix() {
        let err = AppError::invalid_argument("uid must be a string");
        assert_eq!(err.to_string(), "Invalid argument: uid must be a string");
        assert_eq!(err.message(), "uid must be a string");
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn internal_ext_maps_error() {
        let result: Result<(), &str> = Err("boom");
        let err = result.internal("encode failed").unwrap_err();
        assert_eq!(err, AppError::Internal("encode failed: boom".to_string()));
        assert!(!err.is_invalid_argument());
    }
}
