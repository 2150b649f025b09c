// SPDX-License-Identifier: MPL-2.0
//! Arena of scheduled timers keyed by their owner.
//!
//! Components never hold timer callbacks. They register a deadline under a key
//! (for instance the id of the notification that owns it) and later ask the
//! arena which timers are due. Cancelling by key guarantees that nothing keeps
//! firing once its owner is gone.

use std::collections::BTreeMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Opaque handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

/// Whether a timer fires once or repeatedly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Fires once at its deadline and is then discarded.
    Timeout,
    /// Fires every `period` until cleared.
    Interval(Duration),
}

/// A timer that came due during [`TimerArena::due`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired<K> {
    pub handle: TimerHandle,
    pub key: K,
    pub deadline: Instant,
}

#[derive(Debug, Clone)]
struct Entry<K> {
    key: K,
    deadline: Instant,
    schedule: Schedule,
}

/// Timers indexed by handle, each owned by a key.
#[derive(Debug, Clone)]
pub struct TimerArena<K> {
    entries: BTreeMap<TimerHandle, Entry<K>>,
    next_handle: u64,
}

impl<K> Default for TimerArena<K> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_handle: 0,
        }
    }
}

impl<K: Copy + Eq + Hash> TimerArena<K> {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a one-shot timer.
    pub fn set_timeout(&mut self, key: K, deadline: Instant) -> TimerHandle {
        self.insert(key, deadline, Schedule::Timeout)
    }

    /// Schedules a repeating timer whose first tick is at `first`.
    pub fn set_interval(&mut self, key: K, first: Instant, period: Duration) -> TimerHandle {
        self.insert(key, first, Schedule::Interval(period))
    }

    fn insert(&mut self, key: K, deadline: Instant, schedule: Schedule) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.insert(
            handle,
            Entry {
                key,
                deadline,
                schedule,
            },
        );
        handle
    }

    /// Cancels a timer. Returns `false` if it had already fired or was cleared.
    pub fn clear(&mut self, handle: TimerHandle) -> bool {
        self.entries.remove(&handle).is_some()
    }

    /// Cancels every timer owned by `key` and returns how many were removed.
    pub fn clear_key(&mut self, key: K) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.key != key);
        before - self.entries.len()
    }

    /// Cancels everything.
    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    /// Returns whether any timer is owned by `key`.
    #[must_use]
    pub fn contains_key(&self, key: K) -> bool {
        self.entries.values().any(|entry| entry.key == key)
    }

    /// Collects every timer due at `now`, ordered by deadline.
    ///
    /// Timeouts are removed. Intervals are rescheduled one period after `now`
    /// rather than after their missed deadline, so a late poll yields a single
    /// tick instead of a burst.
    pub fn due(&mut self, now: Instant) -> Vec<Fired<K>> {
        let mut fired: Vec<Fired<K>> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.deadline <= now)
            .map(|(handle, entry)| Fired {
                handle: *handle,
                key: entry.key,
                deadline: entry.deadline,
            })
            .collect();
        fired.sort_by_key(|f| (f.deadline, f.handle));

        for f in &fired {
            let reschedule = match self.entries.get(&f.handle) {
                Some(entry) => match entry.schedule {
                    Schedule::Interval(period) => Some(now + period),
                    Schedule::Timeout => None,
                },
                None => None,
            };
            match reschedule {
                Some(next) => {
                    if let Some(entry) = self.entries.get_mut(&f.handle) {
                        entry.deadline = next;
                    }
                }
                None => {
                    self.entries.remove(&f.handle);
                }
            }
        }

        fired
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.values().map(|entry| entry.deadline).min()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn timeout_fires_once() {
        let start = Instant::now();
        let mut arena = TimerArena::new();
        arena.set_timeout('a', start + ms(100));

        assert!(arena.due(start + ms(99)).is_empty());
        assert_eq!(arena.due(start + ms(100)).len(), 1);
        assert!(arena.due(start + ms(500)).is_empty());
        assert!(arena.is_empty());
    }

    #[test]
    fn late_interval_does_not_burst() {
        let start = Instant::now();
        let mut arena = TimerArena::new();
        arena.set_interval('a', start + ms(50), ms(50));

        // A poll delayed by several periods yields a single tick.
        assert_eq!(arena.due(start + ms(400)).len(), 1);
        assert_eq!(arena.next_deadline(), Some(start + ms(450)));
    }

    #[test]
    fn clear_key_removes_all_timers_of_owner() {
        let start = Instant::now();
        let mut arena = TimerArena::new();
        arena.set_interval(1, start, ms(50));
        arena.set_timeout(1, start + ms(10));
        arena.set_timeout(2, start + ms(10));

        assert_eq!(arena.clear_key(1), 2);
        assert!(!arena.contains_key(1));
        assert!(arena.contains_key(2));
    }

    #[test]
    fn clearing_unknown_handle_is_noop() {
        let start = Instant::now();
        let mut arena = TimerArena::new();
        let handle = arena.set_timeout((), start);
        assert!(arena.clear(handle));
        assert!(!arena.clear(handle));
    }

    #[test]
    fn due_orders_by_deadline() {
        let start = Instant::now();
        let mut arena = TimerArena::new();
        arena.set_timeout("late", start + ms(30));
        arena.set_timeout("early", start + ms(10));

        let keys: Vec<_> = arena.due(start + ms(30)).into_iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["early", "late"]);
    }
}
