use std::{cmp::{Ordering, Reverse}, collections::BinaryHeap};

use crate::error::{HuffmanError, Result};

/// Heap entry pairing an item with the sequence number it was inserted with.
///
/// Equal items are ordered by `seq`, so the first inserted one is extracted first.
#[derive(Debug)]
struct Entry<T> {
    item: T,
    seq: u64,
}

impl<T: Ord> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.item.cmp(&other.item) {
            Ordering::Equal => self.seq.cmp(&other.seq),
            ord => ord,
        }
    }
}

impl<T: Ord> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Ord> Eq for Entry<T> {}

/// A min-ordered priority queue backed by a binary heap.
///
/// Items are ordered by their `Ord` implementation. Ties are broken by insertion order
/// (first-inserted-wins), which makes the sequence of `extract_min` results identical to the
/// one produced by a stable, ascending, insertion-sorted list.
#[derive(Debug)]
pub struct MinPriorityQueue<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    next_seq: u64,
}

impl<T: Ord> Default for MinPriorityQueue<T> {
    fn default() -> Self {
        Self { heap: BinaryHeap::new(), next_seq: 0 }
    }
}

impl<T: Ord> MinPriorityQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { heap: BinaryHeap::with_capacity(capacity), next_seq: 0 }
    }

    /// Adds `item` to the queue in *O(log n)*.
    pub fn insert(&mut self, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { item, seq }));
    }

    /// Removes and returns the smallest item.
    ///
    /// # Errors
    ///
    /// Returns [`HuffmanError::EmptyQueue`] if the queue holds no items.
    pub fn extract_min(&mut self) -> Result<T> {
        self.heap
            .pop()
            .map(|Reverse(entry)| entry.item)
            .ok_or(HuffmanError::EmptyQueue)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T: Ord> FromIterator<T> for MinPriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut queue = Self::with_capacity(iter.size_hint().0);
        for item in iter {
            queue.insert(item);
        }
        queue
    }
}

impl<T: Ord> Extend<T> for MinPriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}
