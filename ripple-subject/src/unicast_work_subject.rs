// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Resumable single-collector work queue.
//!
//! Like [`UnicastSubject`](crate::UnicastSubject), items are buffered until
//! collected and only one collector may be attached at a time. Unlike it, a
//! collector that stops early hands the queue back: the next collector resumes
//! at the first item not yet taken. Attaching while another collector is active
//! fails with `SubjectError::InvalidState`.
//!
//! ```
//! use futures::StreamExt;
//! use ripple_subject::{Subject, UnicastWorkSubject};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let queue = UnicastWorkSubject::new();
//! for job in 1..=4 {
//!     queue.emit(job).await;
//! }
//! queue.complete().await;
//!
//! let first: Vec<_> = queue.collector().unwrap().into_stream().take(2).collect().await;
//! let rest: Vec<_> = queue.collector().unwrap().into_stream().collect().await;
//!
//! assert_eq!(first.into_iter().map(Result::unwrap).collect::<Vec<_>>(), vec![1, 2]);
//! assert_eq!(rest.into_iter().map(Result::unwrap).collect::<Vec<_>>(), vec![3, 4]);
//! # }
//! ```

use crate::unicast::{Admission, UnicastCore};
use crate::{Collector, Subject, SubjectConfig};
use async_trait::async_trait;
use ripple_core::TerminalSignal;
use ripple_error::{Result, SubjectError};
use std::sync::Arc;

pub struct UnicastWorkSubject<T: Send + 'static> {
    core: Arc<UnicastCore<T>>,
}

impl<T: Send + 'static> UnicastWorkSubject<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SubjectConfig::default())
    }

    #[must_use]
    pub fn with_config(config: SubjectConfig) -> Self {
        Self {
            core: Arc::new(UnicastCore::new(Admission::Sequential, config)),
        }
    }

    /// Items emitted but not yet taken by any collector.
    pub fn buffered(&self) -> usize {
        self.core.buffered()
    }
}

#[async_trait]
impl<T: Send + 'static> Subject<T> for UnicastWorkSubject<T> {
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
        self.core.attach("UnicastWorkSubject")
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

impl<T: Send + 'static> Default for UnicastWorkSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> Clone for UnicastWorkSubject<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}
