// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A publish subject that holds back its producer until enough collectors are attached.
//!
//! [`MulticastSubject::new`] takes the number of collectors to wait for. The first
//! `emit` suspends until that many attachments have happened; a collector that
//! attaches and leaves again still counts. After the threshold has been reached
//! once, `emit` behaves exactly like [`PublishSubject`](crate::PublishSubject).
//! Collectors of an already terminated subject do not count.
//!
//! ```
//! use ripple_subject::{MulticastSubject, Subject, SubjectExt};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = MulticastSubject::<u8>::new(2);
//!
//! let first = tokio::spawn({
//!     let subject = subject.clone();
//!     async move { subject.to_vec().await }
//! });
//! let second = tokio::spawn({
//!     let subject = subject.clone();
//!     async move { subject.to_vec().await }
//! });
//!
//! // Suspends until both collectors are attached.
//! subject.emit(7).await;
//! subject.complete().await;
//!
//! assert_eq!(first.await.unwrap().unwrap(), vec![7]);
//! assert_eq!(second.await.unwrap().unwrap(), vec![7]);
//! # }
//! ```

use crate::broadcast::BroadcastCore;
use crate::history::NoHistory;
use crate::logging::debug;
use crate::{Collector, Subject, SubjectConfig};
use async_trait::async_trait;
use core::sync::atomic::{AtomicUsize, Ordering};
use event_listener::{Event, EventListener};
use ripple_core::TerminalSignal;
use ripple_error::{Result, SubjectError};
use std::sync::Arc;

struct Inner<T: Clone + Send + 'static> {
    core: BroadcastCore<T, NoHistory>,
    expected: usize,
    // attachments still missing before the producer is released; never grows
    remaining: AtomicUsize,
    opened: Event,
}

pub struct MulticastSubject<T: Clone + Send + 'static> {
    inner: Arc<Inner<T>>,
}

impl<T: Clone + Send + 'static> MulticastSubject<T> {
    /// `expected_collectors` is coerced to at least one.
    #[must_use]
    pub fn new(expected_collectors: usize) -> Self {
        Self::with_config(expected_collectors, SubjectConfig::default())
    }

    #[must_use]
    pub fn with_config(expected_collectors: usize, config: SubjectConfig) -> Self {
        let expected = expected_collectors.max(1);
        Self {
            inner: Arc::new(Inner {
                core: BroadcastCore::new(NoHistory, config),
                expected,
                remaining: AtomicUsize::new(expected),
                opened: Event::new(),
            }),
        }
    }

    pub fn expected_collectors(&self) -> usize {
        self.inner.expected
    }

    /// Attachments still needed before the first `emit` proceeds.
    pub fn remaining_collectors(&self) -> usize {
        self.inner.remaining.load(Ordering::Acquire)
    }

    fn count_attachment(inner: &Inner<T>) {
        let previous = inner
            .remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
        if previous == Ok(1) {
            debug!("{} collectors attached, releasing producer", inner.expected);
            inner.opened.notify(usize::MAX);
        }
    }

    async fn await_expected(&self) {
        let mut listener: Option<EventListener> = None;
        loop {
            if self.remaining_collectors() == 0 || self.inner.core.is_terminated() {
                return;
            }
            match listener.take() {
                Some(listener) => listener.await,
                None => listener = Some(self.inner.opened.listen()),
            }
        }
    }

    async fn terminate(&self, signal: TerminalSignal) {
        self.inner.core.terminate(signal).await;
        // a producer still waiting for collectors has nothing left to deliver
        self.inner.opened.notify(usize::MAX);
    }
}

#[async_trait]
impl<T: Clone + Send + 'static> Subject<T> for MulticastSubject<T> {
    async fn emit(&self, value: T) {
        self.await_expected().await;
        self.inner.core.emit(value).await;
    }

    async fn complete(&self) {
        self.terminate(TerminalSignal::Completed).await;
    }

    async fn emit_error(&self, error: SubjectError) {
        self.terminate(TerminalSignal::Failed(error)).await;
    }

    fn collector(&self) -> Result<Collector<T>> {
        let inner = &*self.inner;
        Ok(inner.core.attach_with(|| Self::count_attachment(inner)))
    }

    fn collector_count(&self) -> usize {
        self.inner.core.collector_count()
    }

    async fn await_collectors(&self, count: usize) {
        self.inner.core.await_collectors(count).await;
    }

    fn is_terminated(&self) -> bool {
        self.inner.core.is_terminated()
    }
}

impl<T: Clone + Send + 'static> Clone for MulticastSubject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
