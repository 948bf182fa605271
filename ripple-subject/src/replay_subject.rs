// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot subject that replays its recorded history to every new collector.
//!
//! History can be bounded by count (oldest items are dropped first), by age
//! (items stamped `max_age` or longer ago are dropped), by both, or not at all.
//! Age is measured on the configured [`Clock`](ripple_core::Clock), so tests can
//! drive eviction with a manual clock.
//!
//! ```
//! use ripple_subject::{ReplaySubject, Subject, SubjectExt};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = ReplaySubject::with_max_size(2);
//! for i in 0..5 {
//!     subject.emit(i).await;
//! }
//! subject.complete().await;
//!
//! assert_eq!(subject.to_vec().await.unwrap(), vec![3, 4]);
//! # }
//! ```

use crate::broadcast::BroadcastCore;
use crate::history::ReplayBuffer;
use crate::{Collector, ReplayLimits, Subject, SubjectConfig};
use async_trait::async_trait;
use ripple_core::TerminalSignal;
use ripple_error::{Result, SubjectError};
use std::sync::Arc;
use std::time::Duration;

pub struct ReplaySubject<T: Clone + Send + 'static> {
    core: Arc<BroadcastCore<T, ReplayBuffer<T>>>,
}

impl<T: Clone + Send + 'static> ReplaySubject<T> {
    /// Replays everything ever emitted.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::with_config(ReplayLimits::unbounded(), SubjectConfig::default())
    }

    /// Keeps the last `max_size` items (at least one).
    #[must_use]
    pub fn with_max_size(max_size: usize) -> Self {
        Self::with_config(ReplayLimits::size(max_size), SubjectConfig::default())
    }

    #[must_use]
    pub fn with_max_age(max_age: Duration) -> Self {
        Self::with_config(ReplayLimits::age(max_age), SubjectConfig::default())
    }

    #[must_use]
    pub fn with_limits(max_size: usize, max_age: Duration) -> Self {
        Self::with_config(
            ReplayLimits::size_and_age(max_size, max_age),
            SubjectConfig::default(),
        )
    }

    #[must_use]
    pub fn with_config(limits: ReplayLimits, config: SubjectConfig) -> Self {
        Self {
            core: Arc::new(BroadcastCore::new(ReplayBuffer::new(limits), config)),
        }
    }

    /// Number of items currently retained, before age eviction at the next attach.
    pub fn history_len(&self) -> usize {
        self.core.inspect_history(ReplayBuffer::len)
    }
}

#[async_trait]
impl<T: Clone + Send + 'static> Subject<T> for ReplaySubject<T> {
    async fn emit(&self, value: T) {
        self.core.emit(value).await;
    }

    async fn complete(&self) {
        self.core.terminate(TerminalSignal::Completed).await;
    }

    async fn emit_error(&self, error: SubjectError) {
        self.core.terminate(TerminalSignal::Failed(error)).await;
    }

    fn collector(&self) -> Result<Collector<T>> {
        Ok(self.core.attach())
    }

    fn collector_count(&self) -> usize {
        self.core.collector_count()
    }

    async fn await_collectors(&self, count: usize) {
        self.core.await_collectors(count).await;
    }

    fn is_terminated(&self) -> bool {
        self.core.is_terminated()
    }
}

impl<T: Clone + Send + 'static> Default for ReplaySubject<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<T: Clone + Send + 'static> Clone for ReplaySubject<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}
