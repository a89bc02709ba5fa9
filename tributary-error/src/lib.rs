// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the tributary channel combinators.
//!
//! Every combinator validates its inputs before any concurrent work is
//! started. When validation fails the caller receives a [`TributaryError`]
//! synchronously and nothing has been spawned.
//!
//! # Examples
//!
//! ```
//! use tributary_error::{Result, TributaryError};
//!
//! fn check(position: usize) -> Result<()> {
//!     Err(TributaryError::not_a_source(position, "i32"))
//! }
//!
//! let err = check(2).unwrap_err();
//! assert!(err.is_precondition());
//! assert_eq!(
//!     err.to_string(),
//!     "argument #2 is not a receivable source (found `i32`)"
//! );
//! ```

/// Root error type for all tributary operations.
#[derive(Debug, thiserror::Error)]
pub enum TributaryError {
    /// A positional argument expected to be a source is something else.
    ///
    /// Reported before any worker is spawned.
    #[error("argument #{position} is not a receivable source (found `{kind}`)")]
    NotASource {
        /// Zero-based position of the offending argument
        position: usize,
        /// Type name of the value that was supplied
        kind: &'static str,
    },

    /// The combinator configuration cannot be used.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration
        message: String,
    },

    /// No async runtime is available to host the worker task.
    #[error("No {runtime} runtime available to spawn the combinator worker")]
    RuntimeUnavailable {
        /// Name of the runtime that was looked up
        runtime: &'static str,
    },

    /// The consumer dropped the output before the worker finished.
    #[error("Channel send failed: receiver dropped")]
    ChannelSendError,
}

impl TributaryError {
    /// Create a precondition error for the argument at `position`
    #[must_use]
    pub const fn not_a_source(position: usize, kind: &'static str) -> Self {
        Self::NotASource { position, kind }
    }

    /// Create an invalid configuration error with the given message
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a missing runtime error
    #[must_use]
    pub const fn runtime_unavailable(runtime: &'static str) -> Self {
        Self::RuntimeUnavailable { runtime }
    }

    /// Check if this error was raised while validating the call
    ///
    /// Precondition errors are returned before anything is scheduled.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NotASource { .. } | Self::InvalidConfig { .. } | Self::RuntimeUnavailable { .. }
        )
    }

    /// Check if this error indicates a permanent failure
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(self, Self::ChannelSendError | Self::NotASource { .. })
    }

    /// Position of the offending argument, if the error names one
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::NotASource { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Specialized Result type for tributary operations
pub type Result<T> = std::result::Result<T, TributaryError>;
