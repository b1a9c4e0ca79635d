//! The search frontier: a binary min-heap of pending search entries.
//!
//! Ordering is not a property of [`FrontierEntry`]. The heap is handed a
//! [`FrontierOrder`] comparator, so the tie-break policy can change without
//! touching the entry's shape. Entries are never updated once pushed; the
//! search pushes a fresh entry when it finds a cheaper route and skips the
//! stale ones as they surface.

use std::cmp::Ordering;

/// One pending route: `node` reached at `cost`, via the trail step
/// `predecessor` (`None` for the start node).
#[derive(Debug, PartialEq)]
pub struct FrontierEntry<'g, K> {
    pub node: &'g K,
    pub cost: f64,
    pub predecessor: Option<usize>,
    /// Push sequence number; earlier discoveries have smaller values.
    pub discovered: usize,
}

// Manual impls: a derive would demand `K: Copy` for the borrowed key.
impl<K> Clone for FrontierEntry<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for FrontierEntry<'_, K> {}

/// Comparator deciding which frontier entry pops first.
///
/// `Ordering::Less` means `a` has priority over `b`.
pub trait FrontierOrder<K> {
    fn compare(&self, a: &FrontierEntry<'_, K>, b: &FrontierEntry<'_, K>) -> Ordering;
}

/// Lowest cost first; equal costs pop in discovery order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByCostThenDiscovery;

impl<K> FrontierOrder<K> for ByCostThenDiscovery {
    fn compare(&self, a: &FrontierEntry<'_, K>, b: &FrontierEntry<'_, K>) -> Ordering {
        a.cost
            .total_cmp(&b.cost)
            .then_with(|| a.discovered.cmp(&b.discovered))
    }
}

/// Lowest cost first; equal costs pop in ascending key order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByCostThenKey;

impl<K: Ord> FrontierOrder<K> for ByCostThenKey {
    fn compare(&self, a: &FrontierEntry<'_, K>, b: &FrontierEntry<'_, K>) -> Ordering {
        a.cost
            .total_cmp(&b.cost)
            .then_with(|| a.node.cmp(b.node))
            .then_with(|| a.discovered.cmp(&b.discovered))
    }
}

/// Binary heap ordered by a borrowed comparator.
pub struct Frontier<'g, 'o, K, O> {
    heap: Vec<FrontierEntry<'g, K>>,
    order: &'o O,
}

impl<'g, 'o, K, O: FrontierOrder<K>> Frontier<'g, 'o, K, O> {
    pub fn new(order: &'o O) -> Self {
        Frontier {
            heap: Vec::new(),
            order,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the entry that would pop next.
    pub fn peek(&self) -> Option<&FrontierEntry<'g, K>> {
        self.heap.first()
    }

    pub fn push(&mut self, entry: FrontierEntry<'g, K>) {
        self.heap.push(entry);
        self.sift_up(self.heap.len() - 1);
    }

    /// Removes and returns the highest-priority entry.
    pub fn pop(&mut self) -> Option<FrontierEntry<'g, K>> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let top = self.heap.pop();
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        top
    }

    fn before(&self, i: usize, j: usize) -> bool {
        self.order.compare(&self.heap[i], &self.heap[j]) == Ordering::Less
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.before(pos, parent) {
                break;
            }
            self.heap.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut best = pos;
            if left < len && self.before(left, best) {
                best = left;
            }
            if right < len && self.before(right, best) {
                best = right;
            }
            if best == pos {
                break;
            }
            self.heap.swap(pos, best);
            pos = best;
        }
    }
}
