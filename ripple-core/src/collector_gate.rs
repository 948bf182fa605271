// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Collector registration with an awaitable count.
//!
//! A [`CollectorGate`] counts attached collectors. Producers call
//! [`CollectorGate::await_count`] to hold back their first item until enough
//! collectors are listening. Each attachment is represented by a
//! [`CollectorHandle`]; dropping the handle detaches it, so a collector that is
//! cancelled or fails never leaves a stale registration behind.
//!
//! There is no timeout: awaiting a count that is never reached waits forever.

use crate::logging::trace;
use core::fmt;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use event_listener::{Event, EventListener};
use std::sync::Arc;

/// Identifies one attachment, unique per gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectorId(u64);

impl fmt::Display for CollectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
struct GateInner {
    attached: AtomicUsize,
    next_id: AtomicU64,
    changed: Event,
}

#[derive(Debug)]
pub struct CollectorGate {
    inner: Arc<GateInner>,
}

impl CollectorGate {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(GateInner {
                attached: AtomicUsize::new(0),
                next_id: AtomicU64::new(0),
                changed: Event::new(),
            }),
        }
    }

    /// Registers a collector and wakes every task waiting on the count.
    pub fn attach(&self) -> CollectorHandle {
        let id = CollectorId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let count = self.inner.attached.fetch_add(1, Ordering::AcqRel) + 1;
        trace!("collector {} attached ({} total)", id, count);
        self.inner.changed.notify(usize::MAX);
        CollectorHandle {
            id,
            gate: self.inner.clone(),
            counted: true,
        }
    }

    /// Issues a handle with a fresh id that is not counted as attached.
    ///
    /// Collectors of a terminated subject get one of these: they have an id but
    /// never count toward [`count`](Self::count) or [`await_count`](Self::await_count).
    pub fn detached(&self) -> CollectorHandle {
        let id = CollectorId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        trace!("collector {} issued without attaching", id);
        CollectorHandle {
            id,
            gate: self.inner.clone(),
            counted: false,
        }
    }

    /// Detaches a collector. Equivalent to dropping its handle.
    pub fn detach(&self, handle: CollectorHandle) {
        debug_assert!(Arc::ptr_eq(&self.inner, &handle.gate));
        drop(handle);
    }

    pub fn count(&self) -> usize {
        self.inner.attached.load(Ordering::Acquire)
    }

    /// Resolves once at least `count` collectors are attached.
    pub async fn await_count(&self, count: usize) {
        let mut listener: Option<EventListener> = None;
        loop {
            if self.count() >= count {
                return;
            }
            // Listen first, check again, then sleep: an attach racing with the
            // check above is seen either by the check or by the listener.
            match listener.take() {
                Some(listener) => listener.await,
                None => listener = Some(self.inner.changed.listen()),
            }
        }
    }
}

impl Default for CollectorGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof of attachment; detaches on drop.
#[derive(Debug)]
pub struct CollectorHandle {
    id: CollectorId,
    gate: Arc<GateInner>,
    counted: bool,
}

impl CollectorHandle {
    pub fn id(&self) -> CollectorId {
        self.id
    }
}

impl Drop for CollectorHandle {
    fn drop(&mut self) {
        if !self.counted {
            return;
        }
        let left = self.gate.attached.fetch_sub(1, Ordering::AcqRel) - 1;
        trace!("collector {} detached ({} left)", self.id, left);
        self.gate.changed.notify(usize::MAX);
    }
}
