//! Bounded priority queue for the best-first search.
//!
//! `BoundedQueue` is a max-heap of scored board snapshots with a fixed
//! capacity. When it gets close to full it throws away the worst-scored half
//! of its nodes in one pass. This bounds memory at the cost of completeness:
//! evicted boards are never expanded. Evictions are counted so callers can
//! report how lossy a run was.
use crate::engine::{Board, CELL_COUNT};
use crate::heuristics::evaluate;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

/// A queue entry: a board snapshot and its evaluation.
#[derive(Clone, Debug)]
pub struct SearchNode {
    pub score: i64,
    pub board: Board,
}

impl SearchNode {
    /// Wraps `board`, scoring it with [`evaluate`].
    pub fn new(board: Board) -> Self {
        SearchNode {
            score: evaluate(&board),
            board,
        }
    }
}

// Nodes compare by score alone.
impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
    }
}

impl Eq for SearchNode {}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.cmp(&other.score)
    }
}

/// Fixed-capacity max-heap of [`SearchNode`]s.
#[derive(Debug)]
pub struct BoundedQueue {
    heap: BinaryHeap<SearchNode>,
    capacity: usize,
    margin: usize,
    eviction_passes: u64,
    evicted_nodes: u64,
}

impl BoundedQueue {
    /// Creates an empty queue holding at most `capacity` nodes.
    ///
    /// Eviction kicks in once more than `capacity - margin` nodes are held.
    /// The margin is raised to at least `CELL_COUNT`, the most children a
    /// single expansion can push.
    pub fn new(capacity: usize, margin: usize) -> Self {
        let capacity = capacity.max(2);
        BoundedQueue {
            heap: BinaryHeap::new(),
            capacity,
            margin: margin.max(CELL_COUNT).min(capacity - 1),
            eviction_passes: 0,
            evicted_nodes: 0,
        }
    }

    /// Scores `board` and inserts it.
    pub fn push(&mut self, board: Board) {
        self.push_node(SearchNode::new(board));
    }

    /// Inserts an already scored node. A full queue evicts before inserting.
    pub fn push_node(&mut self, node: SearchNode) {
        if self.heap.len() >= self.capacity {
            self.evict_worst_half();
        }
        self.heap.push(node);
    }

    /// Removes and returns the highest-scored node.
    pub fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop()
    }

    /// Score of the highest-scored node, if any.
    pub fn peek_score(&self) -> Option<i64> {
        self.heap.peek().map(|node| node.score)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `true` once occupancy is within the margin of capacity.
    pub fn is_nearly_full(&self) -> bool {
        self.heap.len() > self.capacity - self.margin
    }

    /// Drops the lowest-scored half of the held nodes.
    ///
    /// Returns the number of nodes dropped.
    pub fn evict_worst_half(&mut self) -> usize {
        let mut nodes = std::mem::take(&mut self.heap).into_vec();
        let evicted = nodes.len() / 2;
        if evicted > 0 {
            let keep = nodes.len() - evicted;
            // Best first: everything before `keep` scores at least as high as the rest.
            nodes.select_nth_unstable_by(keep, |a, b| b.cmp(a));
            nodes.truncate(keep);
            self.eviction_passes += 1;
            self.evicted_nodes += evicted as u64;
            debug!(evicted, kept = keep, "queue nearly full, evicted worst half");
        }
        self.heap = BinaryHeap::from(nodes);
        evicted
    }

    /// Number of eviction passes so far.
    pub fn eviction_passes(&self) -> u64 {
        self.eviction_passes
    }

    /// Total nodes discarded by evictions so far.
    pub fn evicted_nodes(&self) -> u64 {
        self.evicted_nodes
    }
}
