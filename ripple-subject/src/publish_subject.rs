// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-collector subject without history.
//!
//! A [`PublishSubject`] forwards each item to the collectors attached at the
//! moment it is emitted.
//!
//! ## Characteristics
//!
//! - **Hot**: items emitted while nobody is attached are dropped.
//! - **Backpressure**: each collector has its own bounded channel; a full one suspends `emit`.
//! - **Isolation**: a collector that fails or is cancelled detaches alone.
//! - **Terminal admission**: collecting a completed subject returns at once; collecting a
//!   failed one raises the stored error at once.
//! - **Cheap to clone**: all clones share the same state.
//!
//! ## Example
//!
//! ```
//! use ripple_subject::{PublishSubject, Subject, SubjectExt};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = PublishSubject::<i32>::new();
//!
//! let collector = subject.clone();
//! let received = tokio::spawn(async move { collector.to_vec().await });
//!
//! subject.await_collector().await;
//! subject.emit(1).await;
//! subject.emit(2).await;
//! subject.complete().await;
//!
//! assert_eq!(received.await.unwrap().unwrap(), vec![1, 2]);
//! # }
//! ```

use crate::broadcast::BroadcastCore;
use crate::history::NoHistory;
use crate::{Collector, Subject, SubjectConfig};
use async_trait::async_trait;
use ripple_core::TerminalSignal;
use ripple_error::{Result, SubjectError};
use std::sync::Arc;

pub struct PublishSubject<T: Clone + Send + 'static> {
    core: Arc<BroadcastCore<T, NoHistory>>,
}

impl<T: Clone + Send + 'static> PublishSubject<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SubjectConfig::default())
    }

    #[must_use]
    pub fn with_config(config: SubjectConfig) -> Self {
        Self {
            core: Arc::new(BroadcastCore::new(NoHistory, config)),
        }
    }
}

#[async_trait]
impl<T: Clone + Send + 'static> Subject<T> for PublishSubject<T> {
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

impl<T: Clone + Send + 'static> Default for PublishSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> Clone for PublishSubject<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}
