//! `EventQueue` — processes waiting to resume, ordered by resume time.
//!
//! # Ordering
//!
//! Entries are keyed by `(SimTime, seq)` where `seq` is a counter bumped on
//! every push.  Two processes due at the same instant therefore come out in
//! the order they went in.  The tie-break never depends on hashing or
//! allocation addresses, which keeps runs reproducible.
//!
//! # Performance note
//!
//! `BTreeMap` gives O(log W) insert and O(log W) pop where W = number of
//! pending processes.  A year of 1,000 admissions/year keeps W around the
//! number of patients in the pathway (tens to hundreds).

use std::collections::BTreeMap;

use sf_core::SimTime;

/// A priority queue mapping resume times → suspended processes.
pub struct EventQueue<P> {
    inner: BTreeMap<(SimTime, u64), P>,
    /// Next insertion sequence number.
    seq:   u64,
}

impl<P> Default for EventQueue<P> {
    fn default() -> Self {
        Self { inner: BTreeMap::new(), seq: 0 }
    }
}

impl<P> EventQueue<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `process` to resume at `at`.
    pub fn push(&mut self, at: SimTime, process: P) {
        self.inner.insert((at, self.seq), process);
        self.seq += 1;
    }

    /// Remove and return the earliest entry, or `None` if empty.
    pub fn pop(&mut self) -> Option<(SimTime, P)> {
        self.inner.pop_first().map(|((at, _), p)| (at, p))
    }

    /// The earliest resume time, or `None` if empty.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().map(|&(at, _)| at)
    }

    /// Number of pending processes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Total number of pushes since construction.
    pub fn scheduled_total(&self) -> u64 {
        self.seq
    }
}
