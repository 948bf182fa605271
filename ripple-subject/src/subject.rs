// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Collector;
use async_trait::async_trait;
use core::future::Future;
use ripple_error::{Result, SubjectError};

/// Producer- and consumer-facing contract shared by every subject variant.
///
/// Items reach each attached collector in emission order, and the terminal
/// signal reaches a collector only after every item emitted before it.
#[async_trait]
pub trait Subject<T: Send + 'static>: Send + Sync {
    /// Emits one item, suspending while a collector's buffer is full.
    async fn emit(&self, value: T);

    /// Completes the subject. Only the first terminal call has an effect.
    async fn complete(&self);

    /// Fails the subject with `error`. Only the first terminal call has an effect.
    async fn emit_error(&self, error: SubjectError);

    /// Attaches a new collector.
    ///
    /// # Errors
    /// `SubjectError::InvalidState` when the admission policy refuses the collector.
    fn collector(&self) -> Result<Collector<T>>;

    fn collector_count(&self) -> usize;

    fn has_collectors(&self) -> bool {
        self.collector_count() > 0
    }

    /// Resolves once at least `count` collectors are attached. Never times out.
    async fn await_collectors(&self, count: usize);

    async fn await_collector(&self) {
        self.await_collectors(1).await;
    }

    /// `true` once `complete` or `emit_error` has been called.
    fn is_terminated(&self) -> bool;
}

/// Consumption helpers available on every [`Subject`].
#[async_trait]
pub trait SubjectExt<T: Send + 'static>: Subject<T> {
    /// Attaches a collector and feeds it to `on_item` until the subject terminates.
    ///
    /// # Errors
    /// See [`Collector::collect`]; also fails when the collector is refused.
    async fn collect<F, Fut>(&self, on_item: F) -> Result<()>
    where
        F: FnMut(T) -> Fut + Send,
        Fut: Future<Output = Result<()>> + Send,
    {
        self.collector()?.collect(on_item).await
    }

    /// Collects every item into a `Vec`.
    ///
    /// # Errors
    /// The subject's stored failure; items received before it are discarded.
    async fn to_vec(&self) -> Result<Vec<T>> {
        let mut collector = self.collector()?;
        let mut items = Vec::new();
        while let Some(item) = collector.next().await {
            items.push(item?);
        }
        Ok(items)
    }
}

impl<T: Send + 'static, S: Subject<T> + ?Sized> SubjectExt<T> for S {}
