// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A collector is one attached consumer of a subject.
//!
//! It yields, in order: the items it was primed with at attach time (cached or
//! replayed history), the live items pushed into its channel, and finally the
//! subject's terminal signal. Dropping a collector at any point, including while
//! it is suspended waiting for an item, detaches it from its subject without
//! affecting the producer or other collectors.

use crate::logging::debug;
use core::future::Future;
use futures::future::{select, Either};
use futures::stream::{self, Stream};
use ripple_core::{CancellationToken, ChannelReceiver, CollectorHandle, CollectorId};
use ripple_error::{Result, SubjectError};
use std::collections::VecDeque;

/// Hands the channel receiver back to the subject when the collector goes away.
pub(crate) type Release<T> = Box<dyn FnOnce(ChannelReceiver<T>) + Send>;

pub struct Collector<T: Send + 'static> {
    primed: VecDeque<T>,
    receiver: Option<ChannelReceiver<T>>,
    release: Option<Release<T>>,
    handle: CollectorHandle,
    finished: bool,
}

impl<T: Send + 'static> Collector<T> {
    pub(crate) fn new(
        primed: VecDeque<T>,
        receiver: ChannelReceiver<T>,
        handle: CollectorHandle,
        release: Release<T>,
    ) -> Self {
        Self {
            primed,
            receiver: Some(receiver),
            release: Some(release),
            handle,
            finished: false,
        }
    }

    pub fn id(&self) -> CollectorId {
        self.handle.id()
    }

    /// Next element of this collector's sequence.
    ///
    /// `Some(Ok(item))` for each item, then `None` after completion or a single
    /// `Some(Err(e))` after failure; `None` forever after that.
    pub async fn next(&mut self) -> Option<Result<T>> {
        if self.finished {
            return None;
        }
        if let Some(value) = self.primed.pop_front() {
            return Some(Ok(value));
        }
        let delivery = self.receiver.as_mut()?.recv().await;
        if !matches!(delivery, Some(Ok(_))) {
            self.finished = true;
        }
        delivery
    }

    /// Feeds every item to `on_item` until the subject terminates.
    ///
    /// `on_item` returning [`SubjectError::Cancelled`] stops collection and
    /// returns `Ok(())`; any other error stops collection and is returned.
    /// Either way the collector is detached when this returns.
    ///
    /// # Errors
    /// The subject's stored failure, or the first non-cancellation error from `on_item`.
    pub async fn collect<F, Fut>(mut self, mut on_item: F) -> Result<()>
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        while let Some(item) = self.next().await {
            match on_item(item?).await {
                Ok(()) => {}
                Err(SubjectError::Cancelled) => {
                    debug!("collector {} cancelled by its callback", self.id());
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Like [`collect`](Self::collect), but also stops, returning `Ok(())`, once
    /// `token` is cancelled.
    ///
    /// # Errors
    /// Same as [`collect`](Self::collect).
    pub async fn collect_until<F, Fut>(self, token: &CancellationToken, on_item: F) -> Result<()>
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let id = self.id();
        let collecting = self.collect(on_item);
        let cancelled = token.cancelled();
        futures::pin_mut!(collecting, cancelled);
        match select(collecting, cancelled).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => {
                debug!("collector {} stopped by cancellation token", id);
                Ok(())
            }
        }
    }

    /// Turns the collector into a `Stream`; dropping the stream detaches it.
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> + Send {
        stream::unfold(self, |mut collector| async move {
            let item = collector.next().await?;
            Some((item, collector))
        })
    }
}

impl<T: Send + 'static> Drop for Collector<T> {
    fn drop(&mut self) {
        if let (Some(release), Some(receiver)) = (self.release.take(), self.receiver.take()) {
            release(receiver);
        }
        debug!("collector {} detached", self.handle.id());
    }
}
