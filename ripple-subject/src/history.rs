// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! What a broadcasting subject remembers for collectors that attach later.
//!
//! - [`NoHistory`]: nothing; late collectors see only live items.
//! - [`LatestValue`]: the most recent item, optionally seeded.
//! - [`ReplayBuffer`]: timestamped items bounded by count and/or age.

use crate::config::ReplayLimits;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Retention policy consulted under the subject's state lock.
pub trait HistoryPolicy<T>: Send + 'static {
    /// Called for every item emitted while the subject is active.
    fn record(&mut self, value: &T, now: Instant);

    /// Items a collector attaching at `now` is primed with, oldest first.
    fn replay(&mut self, now: Instant) -> VecDeque<T>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoHistory;

impl<T> HistoryPolicy<T> for NoHistory {
    #[inline]
    fn record(&mut self, _value: &T, _now: Instant) {}

    #[inline]
    fn replay(&mut self, _now: Instant) -> VecDeque<T> {
        VecDeque::new()
    }
}

#[derive(Debug, Clone)]
pub struct LatestValue<T> {
    current: Option<T>,
}

impl<T> LatestValue<T> {
    pub fn new(initial: Option<T>) -> Self {
        Self { current: initial }
    }

    pub fn get(&self) -> Option<&T> {
        self.current.as_ref()
    }
}

impl<T: Clone + Send + 'static> HistoryPolicy<T> for LatestValue<T> {
    fn record(&mut self, value: &T, _now: Instant) {
        self.current = Some(value.clone());
    }

    fn replay(&mut self, _now: Instant) -> VecDeque<T> {
        self.current.iter().cloned().collect()
    }
}

/// Replay history bounded by [`ReplayLimits`].
///
/// Entries are evicted lazily: by count and age when a new item is recorded,
/// by age again when a collector asks for a replay. An entry stamped at `t` is
/// expired once `t <= now - max_age`.
#[derive(Debug, Clone)]
pub struct ReplayBuffer<T> {
    entries: VecDeque<(T, Instant)>,
    max_size: Option<usize>,
    max_age: Option<Duration>,
}

impl<T> ReplayBuffer<T> {
    pub fn new(limits: ReplayLimits) -> Self {
        Self {
            entries: VecDeque::new(),
            max_size: limits.max_size.map(|size| size.max(1)),
            max_age: limits.max_age,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_by_size(&mut self) {
        if let Some(max_size) = self.max_size {
            while self.entries.len() > max_size {
                self.entries.pop_front();
            }
        }
    }

    fn evict_by_age(&mut self, now: Instant) {
        let Some(max_age) = self.max_age else {
            return;
        };
        // Before the clock has advanced `max_age` past its origin nothing can be stale.
        let Some(limit) = now.checked_sub(max_age) else {
            return;
        };
        while self
            .entries
            .front()
            .is_some_and(|(_, stamped)| *stamped <= limit)
        {
            self.entries.pop_front();
        }
    }
}

impl<T: Clone + Send + 'static> HistoryPolicy<T> for ReplayBuffer<T> {
    fn record(&mut self, value: &T, now: Instant) {
        self.entries.push_back((value.clone(), now));
        self.evict_by_size();
        self.evict_by_age(now);
    }

    fn replay(&mut self, now: Instant) -> VecDeque<T> {
        self.evict_by_age(now);
        self.entries.iter().map(|(value, _)| value.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay<T: Clone + Send + 'static>(buffer: &mut ReplayBuffer<T>, now: Instant) -> Vec<T> {
        buffer.replay(now).into_iter().collect()
    }

    #[test]
    fn no_history_replays_nothing() {
        let mut history = NoHistory;
        HistoryPolicy::<i32>::record(&mut history, &1, Instant::now());
        assert!(HistoryPolicy::<i32>::replay(&mut history, Instant::now()).is_empty());
    }

    #[test]
    fn latest_value_keeps_only_last() {
        let now = Instant::now();
        let mut history = LatestValue::new(Some(0));
        assert_eq!(history.replay(now), VecDeque::from([0]));

        history.record(&1, now);
        history.record(&2, now);

        assert_eq!(history.replay(now), VecDeque::from([2]));
        assert_eq!(history.get(), Some(&2));
    }

    #[test]
    fn unbounded_buffer_keeps_everything() {
        let now = Instant::now();
        let mut buffer = ReplayBuffer::new(ReplayLimits::unbounded());
        for i in 0..100 {
            buffer.record(&i, now);
        }
        assert_eq!(buffer.len(), 100);
        assert_eq!(replay(&mut buffer, now), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn size_bound_drops_oldest_first() {
        let now = Instant::now();
        let mut buffer = ReplayBuffer::new(ReplayLimits::size(2));
        for i in 0..5 {
            buffer.record(&i, now);
        }
        assert_eq!(replay(&mut buffer, now), vec![3, 4]);
    }

    #[test]
    fn zero_size_is_coerced_to_one() {
        let now = Instant::now();
        let mut buffer = ReplayBuffer::new(ReplayLimits {
            max_size: Some(0),
            max_age: None,
        });
        buffer.record(&"a", now);
        buffer.record(&"b", now);
        assert_eq!(replay(&mut buffer, now), vec!["b"]);
    }

    #[test]
    fn age_bound_evicts_on_record() {
        let start = Instant::now();
        let ttl = Duration::from_millis(100);
        let mut buffer = ReplayBuffer::new(ReplayLimits::size_and_age(10, ttl));

        for i in 0..3 {
            buffer.record(&i, start);
        }
        let later = start + Duration::from_millis(300);
        buffer.record(&3, later);
        buffer.record(&4, later);

        assert_eq!(buffer.len(), 2);
        assert_eq!(replay(&mut buffer, later), vec![3, 4]);
    }

    #[test]
    fn age_bound_evicts_on_replay() {
        let start = Instant::now();
        let ttl = Duration::from_millis(100);
        let mut buffer = ReplayBuffer::new(ReplayLimits::age(ttl));
        for i in 0..5 {
            buffer.record(&i, start);
        }

        assert_eq!(replay(&mut buffer, start + Duration::from_millis(50)).len(), 5);
        assert!(replay(&mut buffer, start + Duration::from_millis(100)).is_empty());
        assert!(buffer.is_empty());
    }
}
