// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Statistics are shared by every worker of a search, so each counter is an
//! independent atomic. Readers may see one counter updated and another not
//! yet; no snapshot across counters is ever consistent.

use crate::propagation::Rejection;
use std::sync::atomic::{AtomicU64, Ordering};
use strum::EnumCount;
use strum_macros::EnumCount as EnumCountMacro;

#[derive(EnumCountMacro, Copy, Clone, Debug)]
#[repr(u8)]
enum Counters {
    CountNow,
    CountLast,
    MaxPending,
    TotalPendingNow,
    TotalPendingLast,
}

const COUNT: usize = Counters::COUNT + Rejection::COUNT;

#[derive(Debug)]
pub struct Stats {
    stats: [AtomicU64; COUNT],
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            stats: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }
}

impl Clone for Stats {
    fn clone(&self) -> Self {
        Self {
            stats: std::array::from_fn(|i| AtomicU64::new(self.stats[i].load(Ordering::Relaxed))),
        }
    }
}

impl Stats {
    pub fn new() -> Self {
        Stats::default()
    }

    fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize].load(Ordering::Relaxed)
    }

    fn set(&self, counter: Counters, value: u64) {
        self.stats[counter as usize].store(value, Ordering::Relaxed);
    }

    /// Congruences found so far in the current run.
    pub fn count_now(&self) -> u64 {
        self.get(Counters::CountNow)
    }

    /// Value of [`Stats::count_now`] at the last checkpoint.
    pub fn count_last(&self) -> u64 {
        self.get(Counters::CountLast)
    }

    /// Largest frontier held by any single worker.
    pub fn max_pending(&self) -> u64 {
        self.get(Counters::MaxPending)
    }

    /// Pending definitions created so far in the current run.
    pub fn total_pending_now(&self) -> u64 {
        self.get(Counters::TotalPendingNow)
    }

    /// Value of [`Stats::total_pending_now`] at the last checkpoint.
    pub fn total_pending_last(&self) -> u64 {
        self.get(Counters::TotalPendingLast)
    }

    /// Branches cut for the given reason in the current run.
    pub fn rejections(&self, cause: Rejection) -> u64 {
        self.stats[Counters::COUNT + cause as usize].load(Ordering::Relaxed)
    }

    /// Copy the "now" counters into the "last" counters.
    pub fn checkpoint(&self) -> &Self {
        self.set(Counters::CountLast, self.count_now());
        self.set(Counters::TotalPendingLast, self.total_pending_now());
        self
    }

    /// Reset every counter to 0.
    pub fn zero(&self) -> &Self {
        for counter in &self.stats {
            counter.store(0, Ordering::Relaxed);
        }
        self
    }

    pub(crate) fn record_congruence(&self) {
        self.stats[Counters::CountNow as usize].fetch_add(1, Ordering::Relaxed);
    }

    /// `pushed` definitions were added to a frontier that now holds `pending`.
    pub(crate) fn record_pending(&self, pushed: usize, pending: usize) {
        self.stats[Counters::TotalPendingNow as usize].fetch_add(pushed as u64, Ordering::Relaxed);
        self.stats[Counters::MaxPending as usize].fetch_max(pending as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_rejection(&self, cause: Rejection) {
        self.stats[Counters::COUNT + cause as usize].fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_zero() {
        let stats = Stats::new();
        assert_eq!(stats.count_now(), 0);
        assert_eq!(stats.count_last(), 0);
        assert_eq!(stats.max_pending(), 0);
        assert_eq!(stats.total_pending_now(), 0);
        assert_eq!(stats.total_pending_last(), 0);
        assert_eq!(stats.rejections(Rejection::Pruned), 0);
    }

    #[test]
    fn test_checkpoint_copies_now_into_last() {
        let stats = Stats::new();
        stats.record_congruence();
        stats.record_congruence();
        stats.record_pending(3, 3);
        stats.checkpoint();
        assert_eq!(stats.count_last(), 2);
        assert_eq!(stats.total_pending_last(), 3);

        stats.record_congruence();
        assert_eq!(stats.count_now(), 3);
        assert_eq!(stats.count_last(), 2);
    }

    #[test]
    fn test_max_pending_is_a_maximum() {
        let stats = Stats::new();
        stats.record_pending(4, 4);
        stats.record_pending(1, 2);
        assert_eq!(stats.max_pending(), 4);
        assert_eq!(stats.total_pending_now(), 5);
    }

    #[test]
    fn test_zero() {
        let stats = Stats::new();
        stats.record_congruence();
        stats.record_rejection(Rejection::ShortRule);
        stats.checkpoint().zero();
        assert_eq!(stats.count_now(), 0);
        assert_eq!(stats.count_last(), 0);
        assert_eq!(stats.rejections(Rejection::ShortRule), 0);
    }

    #[test]
    fn test_clone_copies_values() {
        let stats = Stats::new();
        stats.record_congruence();
        let copy = stats.clone();
        stats.record_congruence();
        assert_eq!(copy.count_now(), 1);
        assert_eq!(stats.count_now(), 2);
    }
}
