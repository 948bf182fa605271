// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bounded single-producer/single-consumer channel with suspension and a terminal slot.
//!
//! ## Characteristics
//!
//! - **Backpressure**: [`ChannelSender::push`] suspends while the ring is full.
//! - **No spinning**: [`ChannelReceiver::recv`] suspends while the ring is empty and is
//!   woken once per push or close.
//! - **Terminal last**: the [`TerminalSignal`] set by [`ChannelSender::close`] is delivered
//!   only after every buffered item has been received.
//! - **Detached receiver**: once the receiver is dropped, pushes become no-ops and a
//!   suspended producer is released.
//! - **Dropped sender**: a receiver whose sender disappeared without a signal ends as
//!   [`TerminalSignal::Completed`].
//!
//! Items pushed after `close` are still buffered and drained before the signal
//! surfaces. Subjects that want a sticky terminal stop pushing themselves.
//!
//! ## Example
//!
//! ```
//! use ripple_core::{resumable_channel, TerminalSignal};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (tx, mut rx) = resumable_channel(4);
//!
//! tx.push(1).await;
//! tx.push(2).await;
//! tx.close(TerminalSignal::Completed);
//!
//! assert_eq!(rx.recv().await.unwrap().unwrap(), 1);
//! assert_eq!(rx.recv().await.unwrap().unwrap(), 2);
//! assert!(rx.recv().await.is_none());
//! # }
//! ```

use crate::bounded_ring::{bounded_ring, RingConsumer, RingProducer};
use crate::logging::trace;
use crate::TerminalSignal;
use core::future::Future;
use core::sync::atomic::{AtomicBool, Ordering};
use event_listener::{Event, EventListener};
use parking_lot::Mutex;
use ripple_error::Result;
use std::sync::Arc;

struct Signals {
    terminal: Mutex<Option<TerminalSignal>>,
    closed: AtomicBool,
    sender_dropped: AtomicBool,
    receiver_dropped: AtomicBool,
    item_ready: Event,
    slot_free: Event,
}

/// Creates a channel whose ring holds at least `capacity` items.
pub fn resumable_channel<T>(capacity: usize) -> (ChannelSender<T>, ChannelReceiver<T>) {
    let (producer, consumer) = bounded_ring(capacity);
    let signals = Arc::new(Signals {
        terminal: Mutex::new(None),
        closed: AtomicBool::new(false),
        sender_dropped: AtomicBool::new(false),
        receiver_dropped: AtomicBool::new(false),
        item_ready: Event::new(),
        slot_free: Event::new(),
    });
    (
        ChannelSender {
            producer: Mutex::new(producer),
            signals: signals.clone(),
        },
        ChannelReceiver { consumer, signals },
    )
}

/// Producer end. Shared by reference; the ring's single-producer rule is
/// upheld by a short lock around each offer.
pub struct ChannelSender<T> {
    producer: Mutex<RingProducer<T>>,
    signals: Arc<Signals>,
}

impl<T> ChannelSender<T> {
    /// Pushes `value`, suspending while the ring is full.
    ///
    /// Returns immediately, discarding the value, when the receiver is gone.
    pub async fn push(&self, value: T) {
        let mut value = value;
        let mut listener: Option<EventListener> = None;
        loop {
            if self.is_detached() {
                trace!("push discarded: receiver detached");
                return;
            }
            match self.try_push(value) {
                Ok(()) => return,
                Err(back) => value = back,
            }
            match listener.take() {
                Some(listener) => listener.await,
                None => listener = Some(self.signals.slot_free.listen()),
            }
        }
    }

    /// Pushes without suspending; hands the value back when the ring is full.
    pub fn try_push(&self, value: T) -> core::result::Result<(), T> {
        self.producer.lock().offer(value)?;
        self.signals.item_ready.notify(1);
        Ok(())
    }

    /// Records the terminal signal. The first call wins; later calls return `false`.
    pub fn close(&self, signal: TerminalSignal) -> bool {
        {
            let mut terminal = self.signals.terminal.lock();
            if terminal.is_some() {
                return false;
            }
            *terminal = Some(signal);
        }
        self.signals.closed.store(true, Ordering::Release);
        self.signals.item_ready.notify(1);
        true
    }

    pub fn is_closed(&self) -> bool {
        self.signals.closed.load(Ordering::Acquire)
    }

    /// `true` once the receiver has been dropped.
    pub fn is_detached(&self) -> bool {
        self.signals.receiver_dropped.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.producer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.producer.lock().is_empty()
    }
}

impl<T> Drop for ChannelSender<T> {
    fn drop(&mut self) {
        self.signals.sender_dropped.store(true, Ordering::Release);
        self.signals.item_ready.notify(1);
    }
}

/// Outcome of a non-suspending receive.
#[derive(Debug)]
pub enum TryRecv<T> {
    Item(T),
    Empty,
    Terminal(TerminalSignal),
}

/// Consumer end. Owned by exactly one collector at a time.
pub struct ChannelReceiver<T> {
    consumer: RingConsumer<T>,
    signals: Arc<Signals>,
}

impl<T> ChannelReceiver<T> {
    /// Receives without suspending.
    ///
    /// The terminal signal is reported only once the ring is drained, and is
    /// reported again on every later call.
    pub fn try_recv(&mut self) -> TryRecv<T> {
        if let Some(value) = self.take() {
            return TryRecv::Item(value);
        }

        let closed = self.signals.closed.load(Ordering::Acquire);
        let orphaned = self.signals.sender_dropped.load(Ordering::Acquire);
        if !closed && !orphaned {
            return TryRecv::Empty;
        }

        // Items pushed before the flag was raised are visible now.
        if let Some(value) = self.take() {
            return TryRecv::Item(value);
        }

        let signal = self
            .signals
            .terminal
            .lock()
            .clone()
            .unwrap_or(TerminalSignal::Completed);
        TryRecv::Terminal(signal)
    }

    /// Receives the next item, suspending while the channel is empty and open.
    ///
    /// Returns `Some(Ok(item))` per item, then `None` on completion or
    /// `Some(Err(e))` on failure.
    pub async fn recv(&mut self) -> Option<Result<T>> {
        let mut listener: Option<EventListener> = None;
        loop {
            match self.try_recv() {
                TryRecv::Item(value) => return Some(Ok(value)),
                TryRecv::Terminal(signal) => return signal.into_delivery(),
                TryRecv::Empty => {}
            }
            match listener.take() {
                Some(listener) => listener.await,
                None => listener = Some(self.signals.item_ready.listen()),
            }
        }
    }

    /// Applies `sink` to every item until the terminal signal, which is returned.
    ///
    /// # Errors
    /// Returns the stored failure, or the first error produced by `sink`.
    pub async fn drain<F, Fut>(&mut self, mut sink: F) -> Result<()>
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        while let Some(item) = self.recv().await {
            sink(item?).await?;
        }
        Ok(())
    }

    /// Discards every buffered item and releases a suspended producer.
    pub fn clear(&mut self) {
        self.consumer.clear();
        self.signals.slot_free.notify(usize::MAX);
    }

    /// `true` once the ring is drained and the channel is closed or its sender is gone.
    pub fn is_terminated(&self) -> bool {
        let ended = self.signals.closed.load(Ordering::Acquire)
            || self.signals.sender_dropped.load(Ordering::Acquire);
        ended && self.consumer.is_empty()
    }

    pub fn len(&self) -> usize {
        self.consumer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumer.is_empty()
    }

    fn take(&mut self) -> Option<T> {
        let value = self.consumer.poll()?;
        self.signals.slot_free.notify(1);
        Some(value)
    }
}

impl<T> Drop for ChannelReceiver<T> {
    fn drop(&mut self) {
        self.signals.receiver_dropped.store(true, Ordering::Release);
        self.signals.slot_free.notify(usize::MAX);
    }
}
