// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the Ripple hot-stream subject library
//!
//! Every failure a producer records, a collector raises, or a caller provokes by
//! misusing a subject is a [`SubjectError`]. The type is `Clone` because a single
//! stored failure is handed to every collector that attaches to a failed subject.
//!
//! # Examples
//!
//! ```
//! use ripple_error::{Result, SubjectError};
//!
//! fn second_collect() -> Result<()> {
//!     Err(SubjectError::invalid_state("UnicastSubject allows only a single collector"))
//! }
//!
//! assert!(matches!(second_collect(), Err(SubjectError::InvalidState { .. })));
//! ```

use std::error::Error;
use std::sync::Arc;

/// Root error type for all Ripple operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum SubjectError {
    /// Producer-side failure described by a message
    ///
    /// Recorded through `emit_error` and raised by every collector once all
    /// items emitted before it have been delivered.
    #[error("Stream error: {context}")]
    Stream {
        /// What went wrong on the producer side
        context: String,
    },

    /// Custom error from user code
    ///
    /// Wraps errors produced by producers or collector callbacks. The error is
    /// shared so it can be raised by every collector of a failed subject.
    #[error("User error: {0}")]
    User(#[source] Arc<dyn Error + Send + Sync>),

    /// Protocol violation
    ///
    /// Raised synchronously when a subject is used in a way its admission
    /// policy forbids, e.g. a second `collect` on a unicast subject.
    #[error("Invalid state: {context}")]
    InvalidState {
        /// Description of the violated rule
        context: String,
    },

    /// Cooperative cancellation of a collector
    ///
    /// A collector callback returns this to stop collecting. The collector is
    /// detached and `collect` returns normally.
    #[error("Collector cancelled")]
    Cancelled,
}

impl SubjectError {
    /// Create a producer-side stream error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::Stream {
            context: context.into(),
        }
    }

    /// Create an invalid state error with the given context
    pub fn invalid_state(context: impl Into<String>) -> Self {
        Self::InvalidState {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl Error + Send + Sync + 'static) -> Self {
        Self::User(Arc::new(error))
    }

    /// Returns `true` for [`SubjectError::Cancelled`].
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns `true` when the caller broke a subject's usage rules.
    #[must_use]
    pub const fn is_protocol_violation(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }
}

/// Specialized Result type for Ripple operations
///
/// ```
/// use ripple_error::Result;
///
/// fn process() -> Result<u32> {
///     Ok(7)
/// }
/// ```
pub type Result<T> = std::result::Result<T, SubjectError>;

/// Extension trait for converting errors into `SubjectError`
///
/// Implemented for every `std::error::Error + Send + Sync + 'static`.
pub trait IntoSubjectError {
    /// Convert this error into a `SubjectError::User`
    fn into_subject_error(self) -> SubjectError;
}

impl<E: Error + Send + Sync + 'static> IntoSubjectError for E {
    fn into_subject_error(self) -> SubjectError {
        SubjectError::user_error(self)
    }
}
