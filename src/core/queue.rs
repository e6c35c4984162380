use keyed_priority_queue::KeyedPriorityQueue;
use std::{cmp::Ordering, collections::VecDeque};

use super::state::{ProcKey, Ticks};

/// Strict FIFO ready queue: append to tail, pop from head.
#[derive(Debug, Default)]
pub struct FifoQueue {
    procs: VecDeque<ProcKey>,
}

impl FifoQueue {
    pub fn push_back(&mut self, key: ProcKey) {
        debug_assert!(!self.contains(key), "process queued twice");
        self.procs.push_back(key);
    }

    pub fn pop_front(&mut self) -> Option<ProcKey> {
        self.procs.pop_front()
    }

    pub fn contains(&self, key: ProcKey) -> bool {
        self.procs.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.procs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procs.is_empty()
    }
}

/// Ordering of a queued process: `key`, then earlier arrival, then insertion
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank<K> {
    pub key: K,
    pub arrival: Ticks,
    seq: u64,
}

impl<K: Ord> Rank<K> {
    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then(self.arrival.cmp(&other.arrival))
            .then(self.seq.cmp(&other.seq))
    }
}

// KeyedPriorityQueue is a max-heap, so the smallest rank has to compare greatest
impl<K: Ord> PartialOrd for Rank<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for Rank<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.natural_cmp(self)
    }
}

/// Ready queue popping the lowest `(key, arrival, insertion)` first.
#[derive(Debug)]
pub struct RankedQueue<K: Ord> {
    procs: KeyedPriorityQueue<ProcKey, Rank<K>>,
    next_seq: u64,
}

impl<K: Ord> Default for RankedQueue<K> {
    fn default() -> Self {
        Self {
            procs: KeyedPriorityQueue::new(),
            next_seq: 0,
        }
    }
}

impl<K: Ord + Copy> RankedQueue<K> {
    pub fn push(&mut self, proc: ProcKey, key: K, arrival: Ticks) {
        let rank = Rank {
            key,
            arrival,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        let replaced = self.procs.push(proc, rank);
        debug_assert!(replaced.is_none(), "process queued twice");
    }

    pub fn pop(&mut self) -> Option<ProcKey> {
        self.procs.pop().map(|(proc, _)| proc)
    }

    pub fn remove(&mut self, proc: ProcKey) -> Option<Rank<K>> {
        self.procs.remove(&proc)
    }

    pub fn rank(&self, proc: ProcKey) -> Option<Rank<K>> {
        self.procs.get_priority(&proc).copied()
    }

    /// Best-ranked process among `candidates` that are queued.
    pub fn best_of(&self, candidates: &[ProcKey]) -> Option<(ProcKey, Rank<K>)> {
        candidates
            .iter()
            .filter_map(|&proc| self.rank(proc).map(|rank| (proc, rank)))
            .max_by(|a, b| a.1.cmp(&b.1))
    }

    pub fn contains(&self, proc: ProcKey) -> bool {
        self.procs.get_priority(&proc).is_some()
    }

    pub fn len(&self) -> usize {
        self.procs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procs.is_empty()
    }
}
