// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use ripple_error::{Result, SubjectError};

/// The one-time marker that ends a stream.
///
/// A subject records at most one signal; the first writer wins and the signal
/// never changes afterwards.
#[derive(Debug, Clone)]
pub enum TerminalSignal {
    /// The producer finished normally.
    Completed,
    /// The producer failed; every collector raises this error after its items.
    Failed(SubjectError),
}

impl TerminalSignal {
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// `Ok(())` for completion, the stored error for failure.
    pub fn into_result(self) -> Result<()> {
        match self {
            Self::Completed => Ok(()),
            Self::Failed(err) => Err(err),
        }
    }

    /// Shape of the signal as the final element of a `next()` sequence:
    /// completion ends it, failure yields the error once.
    pub fn into_delivery<T>(self) -> Option<Result<T>> {
        match self {
            Self::Completed => None,
            Self::Failed(err) => Some(Err(err)),
        }
    }
}

impl From<SubjectError> for TerminalSignal {
    fn from(err: SubjectError) -> Self {
        Self::Failed(err)
    }
}
