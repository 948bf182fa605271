// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Lock-free SPSC bounded ring.
//!
//! # Overview
//! - Single producer, single consumer, enforced by the split [`RingProducer`] /
//!   [`RingConsumer`] handles: neither is `Clone` and both mutate through `&mut self`.
//! - Capacity is fixed at construction and rounded up to the next power of two
//!   so slot indices are derived by masking.
//! - Neither side ever blocks. A full ring hands the rejected value back; an
//!   empty ring returns `None`.
//!
//! # Memory ordering
//! The producer writes the slot, then publishes `tail` with `Release`. The
//! consumer reads `tail` with `Acquire` before touching the slot, reads the value,
//! then publishes `head` with `Release` so the producer can reuse the slot.

use core::cell::UnsafeCell;
use core::mem::MaybeUninit;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct BoundedRing<T> {
    // next slot to read, written only by the consumer
    head: AtomicUsize,
    // next slot to write, written only by the producer
    tail: AtomicUsize,
    mask: usize,
    slots: Box<[UnsafeCell<MaybeUninit<T>>]>,
}

// Slots are handed from one thread to the other through the head/tail protocol.
unsafe impl<T: Send> Send for BoundedRing<T> {}
unsafe impl<T: Send> Sync for BoundedRing<T> {}

impl<T> BoundedRing<T> {
    fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1).next_power_of_two();
        Self {
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            mask: capacity - 1,
            slots: (0..capacity)
                .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
                .collect(),
        }
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.mask + 1
    }

    #[inline]
    fn len(&self) -> usize {
        // head first: tail only grows, so it can never be observed behind head
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        tail.wrapping_sub(head).min(self.capacity())
    }
}

impl<T> Drop for BoundedRing<T> {
    fn drop(&mut self) {
        let tail = *self.tail.get_mut();
        let mut head = *self.head.get_mut();
        while head != tail {
            let slot = self.slots[head & self.mask].get_mut();
            // Every slot in head..tail was written and not yet read.
            unsafe { slot.assume_init_drop() };
            head = head.wrapping_add(1);
        }
    }
}

/// Creates a ring holding at least `capacity` items and returns its two ends.
///
/// ```
/// use ripple_core::bounded_ring;
///
/// let (mut tx, mut rx) = bounded_ring(3);
/// assert_eq!(tx.capacity(), 4);
///
/// for i in 0..4 {
///     assert!(tx.offer(i).is_ok());
/// }
/// assert_eq!(tx.offer(99), Err(99));
/// assert_eq!(rx.poll(), Some(0));
/// ```
pub fn bounded_ring<T>(capacity: usize) -> (RingProducer<T>, RingConsumer<T>) {
    let ring = Arc::new(BoundedRing::new(capacity));
    (
        RingProducer { ring: ring.clone() },
        RingConsumer { ring },
    )
}

/// Write end of a bounded ring. Only one exists per ring.
pub struct RingProducer<T> {
    ring: Arc<BoundedRing<T>>,
}

impl<T> RingProducer<T> {
    /// Appends `value`, or returns it back when the ring is full.
    ///
    /// Never overwrites unread slots and never blocks.
    #[inline]
    pub fn offer(&mut self, value: T) -> Result<(), T> {
        let ring = &*self.ring;
        let tail = ring.tail.load(Ordering::Relaxed);
        let head = ring.head.load(Ordering::Acquire);
        if tail.wrapping_sub(head) > ring.mask {
            return Err(value);
        }

        // The slot at `tail` is free: the consumer released it through `head`.
        unsafe { (*ring.slots[tail & ring.mask].get()).write(value) };
        ring.tail.store(tail.wrapping_add(1), Ordering::Release);
        Ok(())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.len() == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.ring.len() >= self.ring.capacity()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }
}

/// Read end of a bounded ring. Only one exists per ring.
pub struct RingConsumer<T> {
    ring: Arc<BoundedRing<T>>,
}

impl<T> RingConsumer<T> {
    /// Removes the oldest item, or returns `None` when the ring is empty.
    #[inline]
    pub fn poll(&mut self) -> Option<T> {
        let ring = &*self.ring;
        let head = ring.head.load(Ordering::Relaxed);
        let tail = ring.tail.load(Ordering::Acquire);
        if head == tail {
            return None;
        }

        // The slot at `head` was published by the producer through `tail`.
        let value = unsafe { (*ring.slots[head & ring.mask].get()).assume_init_read() };
        ring.head.store(head.wrapping_add(1), Ordering::Release);
        Some(value)
    }

    /// Drops every item currently buffered.
    pub fn clear(&mut self) {
        while self.poll().is_some() {}
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.len() == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }
}
