use std::collections::BinaryHeap;

/// Reference into the cell array, ordered by `priority` then insertion
/// sequence for use in `BinaryHeap`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct QueueEntry {
    pub(crate) idx: usize,
    pub(crate) priority: i32,
    pub(crate) seq: u64,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest priority first, and
        // the earliest inserted among equals.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of cell indices with stable tie-breaking.
#[derive(Debug, Default)]
pub(crate) struct MinQueue {
    heap: BinaryHeap<QueueEntry>,
    next_seq: u64,
}

impl MinQueue {
    pub(crate) fn push(&mut self, idx: usize, priority: i32) {
        self.heap.push(QueueEntry {
            idx,
            priority,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|e| e.idx)
    }
}
