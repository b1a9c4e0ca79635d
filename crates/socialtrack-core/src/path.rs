//! PathResult: the outcome of one successful shortest-path query.

use serde::Serialize;

/// Ordered node identities from start to end (inclusive) plus total cost.
///
/// Always holds at least one node. Built by
/// [`PathFinder::shortest_path`](crate::search::PathFinder::shortest_path)
/// and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult<K> {
    path: Vec<K>,
    cost: f64,
}

impl<K> PathResult<K> {
    pub(crate) fn new(path: Vec<K>, cost: f64) -> Self {
        debug_assert!(!path.is_empty());
        PathResult { path, cost }
    }

    pub fn path(&self) -> &[K] {
        &self.path
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn start(&self) -> &K {
        &self.path[0]
    }

    pub fn end(&self) -> &K {
        &self.path[self.path.len() - 1]
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.path.len() - 1
    }

    /// Nodes strictly between start and end.
    pub fn intermediaries(&self) -> &[K] {
        if self.path.len() <= 2 {
            return &[];
        }
        &self.path[1..self.path.len() - 1]
    }

    /// Count of nodes strictly between start and end; the endpoints are
    /// never included.
    pub fn intermediary_count(&self) -> usize {
        self.path.len().saturating_sub(2)
    }
}
