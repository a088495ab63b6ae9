//! Frontier disciplines: FIFO, LIFO and priority.
//!
//! The frontier stores arena indices, not nodes. Loop detection lives in the
//! search loop's explored set.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::node::FrontierKey;
use crate::policy::Algorithm;

/// A priority-heap entry.
///
/// `BinaryHeap` is a max-heap, so the key is wrapped in `Reverse` to pop the
/// lowest key first.
#[derive(Debug, PartialEq, Eq)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    node_id: usize,
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

#[derive(Debug)]
enum Discipline {
    Fifo(VecDeque<usize>),
    Lifo(Vec<usize>),
    Priority(BinaryHeap<FrontierEntry>),
}

/// The open list of a single search invocation.
#[derive(Debug)]
pub struct SearchFrontier {
    discipline: Discipline,
    high_water: u64,
}

impl SearchFrontier {
    /// FIFO frontier (breadth-first).
    #[must_use]
    pub fn fifo() -> Self {
        Self::with(Discipline::Fifo(VecDeque::new()))
    }

    /// LIFO frontier (depth-first).
    #[must_use]
    pub fn lifo() -> Self {
        Self::with(Discipline::Lifo(Vec::new()))
    }

    /// Min-priority frontier, stable among equal priorities.
    #[must_use]
    pub fn priority() -> Self {
        Self::with(Discipline::Priority(BinaryHeap::new()))
    }

    /// The frontier discipline an algorithm uses.
    #[must_use]
    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::BreadthFirst => Self::fifo(),
            Algorithm::DepthFirst => Self::lifo(),
            Algorithm::UniformCost | Algorithm::AStar | Algorithm::BestFirst => Self::priority(),
        }
    }

    fn with(discipline: Discipline) -> Self {
        Self {
            discipline,
            high_water: 0,
        }
    }

    /// Push a node. The key is ignored by FIFO and LIFO frontiers.
    pub fn push(&mut self, node_id: usize, key: FrontierKey) {
        match &mut self.discipline {
            Discipline::Fifo(queue) => queue.push_back(node_id),
            Discipline::Lifo(stack) => stack.push(node_id),
            Discipline::Priority(heap) => heap.push(FrontierEntry {
                key: Reverse(key),
                node_id,
            }),
        }
        let size = self.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Pop the next node according to the discipline.
    #[must_use]
    pub fn pop(&mut self) -> Option<usize> {
        match &mut self.discipline {
            Discipline::Fifo(queue) => queue.pop_front(),
            Discipline::Lifo(stack) => stack.pop(),
            Discipline::Priority(heap) => heap.pop().map(|e| e.node_id),
        }
    }

    /// Current frontier size.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.discipline {
            Discipline::Fifo(queue) => queue.len(),
            Discipline::Lifo(stack) => stack.len(),
            Discipline::Priority(heap) => heap.len(),
        }
    }

    /// Whether the frontier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}
