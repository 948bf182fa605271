// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Subject configuration.
//!
//! [`SubjectConfig`] sets the per-channel buffer capacity and the clock used to
//! timestamp history. [`ReplayLimits`] selects how much history a
//! [`ReplaySubject`](crate::ReplaySubject) keeps.
//!
//! # Example
//! ```
//! use ripple_subject::{ReplayLimits, SubjectConfig};
//! use std::time::Duration;
//!
//! let config = SubjectConfig::default().with_capacity(256);
//! assert_eq!(config.capacity, 256);
//!
//! let limits = ReplayLimits::size_and_age(10, Duration::from_millis(100));
//! assert_eq!(limits.max_size, Some(10));
//! ```

use ripple_core::{Clock, SystemClock};
use std::sync::Arc;
use std::time::Duration;

/// Ring size used when none is configured.
pub const DEFAULT_CAPACITY: usize = 64;

/// Settings shared by every subject variant.
#[derive(Clone, Debug)]
pub struct SubjectConfig {
    /// Items buffered per channel before the producer suspends; rounded up to a power of two.
    pub capacity: usize,
    /// Time source for history timestamps.
    pub clock: Arc<dyn Clock>,
}

impl SubjectConfig {
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }
}

impl Default for SubjectConfig {
    /// - `capacity = DEFAULT_CAPACITY`
    /// - `clock = SystemClock`
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            clock: Arc::new(SystemClock),
        }
    }
}

/// Retention bounds for replay history. `None` means unbounded on that axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayLimits {
    pub max_size: Option<usize>,
    pub max_age: Option<Duration>,
}

impl ReplayLimits {
    pub const fn unbounded() -> Self {
        Self {
            max_size: None,
            max_age: None,
        }
    }

    /// Keeps the newest `max_size` items (at least one).
    pub fn size(max_size: usize) -> Self {
        Self {
            max_size: Some(max_size.max(1)),
            max_age: None,
        }
    }

    /// Keeps items younger than `max_age`, without a count bound.
    pub const fn age(max_age: Duration) -> Self {
        Self {
            max_size: None,
            max_age: Some(max_age),
        }
    }

    pub fn size_and_age(max_size: usize, max_age: Duration) -> Self {
        Self {
            max_size: Some(max_size.max(1)),
            max_age: Some(max_age),
        }
    }
}
