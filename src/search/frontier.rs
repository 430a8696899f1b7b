use std::{cmp::Ordering, collections::BinaryHeap, hash::Hash};

use ahash::HashSet;

use crate::graphs::Distance;

#[derive(Clone, Debug)]
pub struct FrontierEntry<T> {
    pub priority: Distance,
    pub sequence: u64,
    pub item: T,
}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap.
impl<T> Ord for FrontierEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip both comparisons: smaller priority first, and on equal
        // priority the entry that was pushed first.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<T> PartialOrd for FrontierEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for FrontierEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for FrontierEntry<T> {}

/// Min-priority queue without decrease-key.
///
/// An improved key for an item is pushed as a new entry. The superseded entry
/// stays in the heap and is dropped when it surfaces, see
/// [`PriorityFrontier::pop_open`].
#[derive(Clone, Debug)]
pub struct PriorityFrontier<T> {
    heap: BinaryHeap<FrontierEntry<T>>,
    next_sequence: u64,
}

impl<T> Default for PriorityFrontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PriorityFrontier<T> {
    pub fn new() -> PriorityFrontier<T> {
        PriorityFrontier {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    pub fn push(&mut self, item: T, priority: Distance) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(FrontierEntry {
            priority,
            sequence,
            item,
        });
    }

    /// Removes the entry with minimal priority, the earliest pushed one on
    /// ties.
    pub fn pop(&mut self) -> Option<FrontierEntry<T>> {
        self.heap.pop()
    }

    /// Like [`PriorityFrontier::pop`], but discards every entry for which
    /// `is_stale` holds.
    pub fn pop_open_by(&mut self, is_stale: impl Fn(&T) -> bool) -> Option<FrontierEntry<T>> {
        while let Some(entry) = self.heap.pop() {
            if !is_stale(&entry.item) {
                return Some(entry);
            }
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T: Eq + Hash> PriorityFrontier<T> {
    /// Pops the minimal entry whose item is not in `closed`.
    pub fn pop_open(&mut self, closed: &HashSet<T>) -> Option<FrontierEntry<T>> {
        self.pop_open_by(|item| closed.contains(item))
    }
}

#[cfg(test)]
mod tests {
    use ahash::HashSetExt;

    use super::*;

    #[test]
    fn pops_in_priority_order() {
        let mut frontier = PriorityFrontier::new();
        frontier.push('c', 3.0);
        frontier.push('a', 1.0);
        frontier.push('b', 2.0);

        let order: Vec<char> = std::iter::from_fn(|| frontier.pop())
            .map(|entry| entry.item)
            .collect();
        assert_eq!(order, vec!['a', 'b', 'c']);
        assert!(frontier.is_empty());
    }

    #[test]
    fn ties_break_by_insertion_order() {
        let mut frontier = PriorityFrontier::new();
        for item in ['x', 'y', 'z', 'w'] {
            frontier.push(item, 5.0);
        }
        frontier.push('v', 4.0);

        let order: Vec<char> = std::iter::from_fn(|| frontier.pop())
            .map(|entry| entry.item)
            .collect();
        assert_eq!(order, vec!['v', 'x', 'y', 'z', 'w']);
    }

    #[test]
    fn closed_items_are_skipped() {
        let mut frontier = PriorityFrontier::new();
        frontier.push(1u32, 4.0);
        frontier.push(2, 2.0);
        frontier.push(1, 1.0);

        let mut closed = HashSet::new();
        let first = frontier.pop_open(&closed).unwrap();
        assert_eq!((first.item, first.priority), (1, 1.0));
        closed.insert(1);

        let second = frontier.pop_open(&closed).unwrap();
        assert_eq!(second.item, 2);
        closed.insert(2);

        // the stale entry for 1 is discarded
        assert!(frontier.pop_open(&closed).is_none());
        assert!(frontier.is_empty());
    }

    #[test]
    fn empty_frontier_pops_nothing() {
        let mut frontier: PriorityFrontier<u32> = PriorityFrontier::new();
        assert!(frontier.pop().is_none());
        assert_eq!(frontier.len(), 0);
    }
}
