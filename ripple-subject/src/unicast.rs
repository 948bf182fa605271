// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shared engine of the unicast subjects.
//!
//! The subject owns a single resumable channel. Items emitted before anyone
//! collects are buffered in it (the producer suspends once it is full). A
//! collector borrows the receiving end; what happens when it lets go is the
//! [`Admission`] policy.

use crate::collector::{Collector, Release};
use crate::config::SubjectConfig;
use crate::logging::{debug, warn};
use core::sync::atomic::{AtomicBool, Ordering};
use parking_lot::Mutex;
use ripple_core::{resumable_channel, ChannelReceiver, ChannelSender, CollectorGate, TerminalSignal};
use ripple_error::{Result, SubjectError};
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Admission {
    /// One collection per lifetime; the receiver is discarded afterwards.
    Once,
    /// One collection at a time; the receiver, with its unconsumed items,
    /// returns to the subject for the next collector.
    Sequential,
}

pub(crate) struct UnicastCore<T> {
    sender: ChannelSender<T>,
    receiver: Arc<Mutex<Option<ChannelReceiver<T>>>>,
    gate: CollectorGate,
    admission: Admission,
    consumed: Arc<AtomicBool>,
    producer: futures::lock::Mutex<()>,
}

impl<T: Send + 'static> UnicastCore<T> {
    pub(crate) fn new(admission: Admission, config: SubjectConfig) -> Self {
        let (sender, receiver) = resumable_channel(config.capacity);
        Self {
            sender,
            receiver: Arc::new(Mutex::new(Some(receiver))),
            gate: CollectorGate::new(),
            admission,
            consumed: Arc::new(AtomicBool::new(false)),
            producer: futures::lock::Mutex::new(()),
        }
    }

    /// Items emitted after the terminal signal are still queued and reach the
    /// collector before the signal does.
    pub(crate) async fn emit(&self, value: T) {
        let _producer = self.producer.lock().await;
        self.sender.push(value).await;
    }

    pub(crate) async fn terminate(&self, signal: TerminalSignal) {
        let _producer = self.producer.lock().await;
        let failed = signal.is_failure();
        if self.sender.close(signal) {
            debug!("unicast subject terminated (failed: {})", failed);
        }
    }

    pub(crate) fn attach(&self, kind: &str) -> Result<Collector<T>> {
        let Some(receiver) = self.receiver.lock().take() else {
            let context = match self.admission {
                Admission::Once => format!("{kind} allows only a single collector"),
                Admission::Sequential => format!("{kind} is already being collected"),
            };
            warn!("collector refused: {}", context);
            return Err(SubjectError::invalid_state(context));
        };

        let handle = self.gate.attach();
        debug!("collector {} attached to {}", handle.id(), kind);

        let release: Release<T> = match self.admission {
            Admission::Once => {
                let consumed = self.consumed.clone();
                Box::new(move |receiver| {
                    consumed.store(true, Ordering::Release);
                    drop(receiver);
                })
            }
            Admission::Sequential => {
                let slot = Arc::downgrade(&self.receiver);
                Box::new(move |receiver| {
                    if let Some(slot) = slot.upgrade() {
                        *slot.lock() = Some(receiver);
                    }
                })
            }
        };

        Ok(Collector::new(VecDeque::new(), receiver, handle, release))
    }

    pub(crate) async fn await_collectors(&self, count: usize) {
        self.gate.await_count(count).await;
    }

    pub(crate) fn collector_count(&self) -> usize {
        self.gate.count()
    }

    pub(crate) fn is_terminated(&self) -> bool {
        self.sender.is_closed()
    }

    pub(crate) fn is_consumed(&self) -> bool {
        self.consumed.load(Ordering::Acquire)
    }

    pub(crate) fn buffered(&self) -> usize {
        self.sender.len()
    }
}
