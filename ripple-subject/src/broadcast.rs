// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shared engine of the broadcasting subjects (publish, multicast, behavior, replay).
//!
//! Every collector owns its own resumable channel, so a slow collector only
//! slows the producer, never another collector. What a late collector is
//! primed with is decided by the [`HistoryPolicy`].
//!
//! All bookkeeping (collector set, terminal signal, history) lives in one
//! `BroadcastState` behind a single lock. Attaching a collector, recording an
//! item and picking the emit targets happen under that lock, so each collector
//! sees every item exactly once: either in its priming snapshot or live.

use crate::collector::Collector;
use crate::config::SubjectConfig;
use crate::history::HistoryPolicy;
use crate::logging::{debug, trace};
use parking_lot::Mutex;
use ripple_core::{resumable_channel, ChannelSender, Clock, CollectorGate, CollectorId, TerminalSignal};
use std::sync::Arc;

struct Attached<T> {
    id: CollectorId,
    sender: Arc<ChannelSender<T>>,
}

struct BroadcastState<T, H> {
    terminal: Option<TerminalSignal>,
    history: H,
    collectors: Vec<Attached<T>>,
}

pub(crate) struct BroadcastCore<T, H> {
    state: Arc<Mutex<BroadcastState<T, H>>>,
    gate: CollectorGate,
    // one producer at a time keeps every collector channel single-producer
    producer: futures::lock::Mutex<()>,
    capacity: usize,
    clock: Arc<dyn Clock>,
}

impl<T, H> BroadcastCore<T, H>
where
    T: Clone + Send + 'static,
    H: HistoryPolicy<T>,
{
    pub(crate) fn new(history: H, config: SubjectConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(BroadcastState {
                terminal: None,
                history,
                collectors: Vec::new(),
            })),
            gate: CollectorGate::new(),
            producer: futures::lock::Mutex::new(()),
            capacity: config.capacity,
            clock: config.clock,
        }
    }

    pub(crate) async fn emit(&self, value: T) {
        let _producer = self.producer.lock().await;
        let targets: Vec<Arc<ChannelSender<T>>> = {
            let mut state = self.state.lock();
            if state.terminal.is_some() {
                trace!("emit after terminal signal ignored");
                return;
            }
            state.history.record(&value, self.clock.now());
            state.collectors.iter().map(|c| c.sender.clone()).collect()
        };

        if targets.is_empty() {
            trace!("emit with no attached collector, item dropped from live delivery");
            return;
        }

        for sender in &targets {
            sender.push(value.clone()).await;
        }
    }

    pub(crate) async fn terminate(&self, signal: TerminalSignal) {
        let _producer = self.producer.lock().await;
        let targets: Vec<Arc<ChannelSender<T>>> = {
            let mut state = self.state.lock();
            if state.terminal.is_some() {
                return;
            }
            state.terminal = Some(signal.clone());
            state.collectors.iter().map(|c| c.sender.clone()).collect()
        };

        debug!(
            "subject terminated (failed: {}), notifying {} collectors",
            signal.is_failure(),
            targets.len()
        );
        for sender in targets {
            sender.close(signal.clone());
        }
    }

    pub(crate) fn attach(&self) -> Collector<T> {
        self.attach_with(|| {})
    }

    /// Attaches a collector primed with the history valid right now.
    ///
    /// `on_live` runs under the state lock when the collector joins the live
    /// set. A terminated subject still hands out collectors, but they are not
    /// counted as attached: they replay their priming items and then observe
    /// the stored signal.
    pub(crate) fn attach_with(&self, on_live: impl FnOnce()) -> Collector<T> {
        let (sender, receiver) = resumable_channel(self.capacity);
        let (primed, handle) = {
            let mut state = self.state.lock();
            let primed = state.history.replay(self.clock.now());
            let handle = match &state.terminal {
                Some(signal) => {
                    sender.close(signal.clone());
                    self.gate.detached()
                }
                None => {
                    let handle = self.gate.attach();
                    state.collectors.push(Attached {
                        id: handle.id(),
                        sender: Arc::new(sender),
                    });
                    on_live();
                    handle
                }
            };
            (primed, handle)
        };

        let id = handle.id();
        debug!("collector {} attached, primed with {} items", id, primed.len());
        let state = Arc::downgrade(&self.state);
        Collector::new(
            primed,
            receiver,
            handle,
            Box::new(move |receiver| {
                // Drop the receiver first so a producer suspended on it is released.
                drop(receiver);
                if let Some(state) = state.upgrade() {
                    state.lock().collectors.retain(|c| c.id != id);
                }
            }),
        )
    }

    pub(crate) async fn await_collectors(&self, count: usize) {
        self.gate.await_count(count).await;
    }

    pub(crate) fn collector_count(&self) -> usize {
        self.gate.count()
    }

    pub(crate) fn is_terminated(&self) -> bool {
        self.state.lock().terminal.is_some()
    }

    /// Runs `f` against the history under the state lock.
    pub(crate) fn inspect_history<R>(&self, f: impl FnOnce(&H) -> R) -> R {
        f(&self.state.lock().history)
    }
}
