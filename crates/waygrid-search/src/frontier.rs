//! Frontier structures: the FIFO queue behind BFS and the cost-ordered
//! priority queue behind Dijkstra and A*.
//!
//! Priority entries live in a min-heap keyed by `(cost, seq)`. Lower costs
//! pop first; ties are broken by insertion order (FIFO). That tie-break is
//! what pins down the expansion order, and with it the returned path.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

/// An entry in the priority frontier: a flat node index plus the priority it
/// was pushed with.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OpenEntry {
    pub(crate) idx: usize,
    pub(crate) cost: i32,
    /// Monotonically increasing counter used to break ties.
    /// Lower = inserted earlier = dequeued first.
    seq: u64,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Wrapped in Reverse for the BinaryHeap, so this is the "natural"
        // comparison: smaller cost first, then smaller seq.
        self.cost
            .cmp(&other.cost)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

// ---------------------------------------------------------------------------
// PriorityFrontier
// ---------------------------------------------------------------------------

/// A cost-ordered frontier with strict FIFO behaviour at equal cost.
///
/// A node may be pushed several times under different costs (decrease-key by
/// re-insertion); the engine discards stale pops by comparing an entry's
/// recorded cost against the node's current priority.
pub(crate) struct PriorityFrontier {
    heap: BinaryHeap<Reverse<OpenEntry>>,
    seq: u64,
}

impl PriorityFrontier {
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Drop all entries and restart the tie-break counter, so identical runs
    /// assign identical sequence numbers.
    pub(crate) fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }

    pub(crate) fn push(&mut self, idx: usize, cost: i32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(OpenEntry { idx, cost, seq }));
    }

    pub(crate) fn pop(&mut self) -> Option<OpenEntry> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }
}

// ---------------------------------------------------------------------------
// FifoFrontier
// ---------------------------------------------------------------------------

/// Strict insertion-order frontier for breadth-first search. Cells are
/// enqueued at most once per run, so no tie-break bookkeeping is needed.
pub(crate) struct FifoFrontier {
    queue: VecDeque<usize>,
}

impl FifoFrontier {
    pub(crate) fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.queue.clear();
    }

    pub(crate) fn push(&mut self, idx: usize) {
        self.queue.push_back(idx);
    }

    pub(crate) fn pop(&mut self) -> Option<usize> {
        self.queue.pop_front()
    }
}
