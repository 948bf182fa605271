// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot subject that caches its latest item for late collectors.
//!
//! Every new collector is first primed with the cached item (if there is one),
//! then receives live items, then the terminal signal. The cache is overwritten
//! before each item fans out, and is still replayed after the subject terminated.
//!
//! ```
//! use ripple_subject::{BehaviorSubject, Subject, SubjectExt};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = BehaviorSubject::with_value(0);
//! subject.emit(1).await;
//! subject.emit(2).await;
//! subject.complete().await;
//!
//! assert_eq!(subject.value().unwrap(), 2);
//! assert_eq!(subject.to_vec().await.unwrap(), vec![2]);
//! # }
//! ```

use crate::broadcast::BroadcastCore;
use crate::history::LatestValue;
use crate::{Collector, Subject, SubjectConfig};
use async_trait::async_trait;
use ripple_core::TerminalSignal;
use ripple_error::{Result, SubjectError};
use std::sync::Arc;

pub struct BehaviorSubject<T: Clone + Send + 'static> {
    core: Arc<BroadcastCore<T, LatestValue<T>>>,
}

impl<T: Clone + Send + 'static> BehaviorSubject<T> {
    /// Creates a subject with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(None, SubjectConfig::default())
    }

    /// Creates a subject whose cache is seeded with `initial`.
    #[must_use]
    pub fn with_value(initial: T) -> Self {
        Self::with_config(Some(initial), SubjectConfig::default())
    }

    #[must_use]
    pub fn with_config(initial: Option<T>, config: SubjectConfig) -> Self {
        Self {
            core: Arc::new(BroadcastCore::new(LatestValue::new(initial), config)),
        }
    }

    /// The cached item.
    ///
    /// # Errors
    /// `SubjectError::InvalidState` when nothing has been emitted or seeded.
    pub fn value(&self) -> Result<T> {
        self.value_or_none()
            .ok_or_else(|| SubjectError::invalid_state("BehaviorSubject has no value"))
    }

    pub fn value_or_none(&self) -> Option<T> {
        self.core.inspect_history(|cache| cache.get().cloned())
    }
}

#[async_trait]
impl<T: Clone + Send + 'static> Subject<T> for BehaviorSubject<T> {
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

impl<T: Clone + Send + 'static> Default for BehaviorSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> Clone for BehaviorSubject<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}
