//! PathFinder: Dijkstra's shortest-path search over a [`WeightedAdjacency`].
//!
//! # Search state
//!
//! Every query owns its state and drops it on return:
//! - a [`Frontier`] of pending routes, ordered by the finder's
//!   [`FrontierOrder`];
//! - a best-known-cost [`KeyIndex`], written only when an entry is popped
//!   and expanded, never when it is pushed;
//! - the trail, an append-only list of expanded entries that predecessor
//!   links point into.
//!
//! Pushed entries are never updated. A cheaper route pushes a new entry, and
//! an entry popped for a node whose recorded cost is strictly lower than its
//! own is discarded as stale. An equal-cost duplicate is expanded again; its
//! successor entries carry later discovery numbers and lose every tie.

use crate::error::CoreError;
use crate::frontier::{ByCostThenDiscovery, Frontier, FrontierEntry, FrontierOrder};
use crate::graph::WeightedAdjacency;
use crate::index::KeyIndex;
use crate::key::{NodeKey, Weight};
use crate::path::PathResult;

/// The end of a successful search plus the expanded entries behind it.
#[derive(Debug, Clone)]
pub struct SearchTrail<'g, K> {
    steps: Vec<FrontierEntry<'g, K>>,
    end: usize,
}

impl<'g, K: NodeKey> SearchTrail<'g, K> {
    fn trivial(node: &'g K) -> Self {
        SearchTrail {
            steps: vec![FrontierEntry {
                node,
                cost: 0.0,
                predecessor: None,
                discovered: 0,
            }],
            end: 0,
        }
    }

    /// Total cost of the route to the end node.
    pub fn cost(&self) -> f64 {
        self.steps[self.end].cost
    }

    pub fn end(&self) -> &'g K {
        self.steps[self.end].node
    }

    /// Number of entries the search expanded, the end entry included.
    pub fn expanded(&self) -> usize {
        self.steps.len()
    }

    /// Walks predecessor links back from the end node and returns the path
    /// start first.
    pub fn nodes(&self) -> Vec<&'g K> {
        let mut nodes = Vec::new();
        let mut cursor = Some(self.end);
        while let Some(i) = cursor {
            let step = &self.steps[i];
            nodes.push(step.node);
            cursor = step.predecessor;
        }
        nodes.reverse();
        nodes
    }

    pub fn into_result(self) -> PathResult<K> {
        let path = self.nodes().into_iter().cloned().collect();
        PathResult::new(path, self.cost())
    }
}

/// Shortest-path engine borrowing a read-only graph.
///
/// Holds no state between calls; the same finder can answer any number of
/// independent queries.
#[derive(Debug, Clone)]
pub struct PathFinder<'g, G, O = ByCostThenDiscovery> {
    graph: &'g G,
    order: O,
}

impl<'g, G: WeightedAdjacency> PathFinder<'g, G> {
    /// Creates a finder that breaks equal-cost ties by discovery order.
    pub fn new(graph: &'g G) -> Self {
        PathFinder {
            graph,
            order: ByCostThenDiscovery,
        }
    }
}

impl<'g, G, O> PathFinder<'g, G, O>
where
    G: WeightedAdjacency,
    O: FrontierOrder<G::Key>,
{
    /// Creates a finder with an explicit frontier comparator.
    pub fn with_order(graph: &'g G, order: O) -> Self {
        PathFinder { graph, order }
    }

    /// Runs Dijkstra's algorithm from `start` until `end` is popped.
    ///
    /// Fails with [`CoreError::InvalidArgument`] if either key is absent,
    /// [`CoreError::NotFound`] if either key is not a node (start checked
    /// first), and [`CoreError::NoPath`] if `end` is unreachable. When
    /// `start == end` no search runs and the trail has a single step of
    /// cost 0.
    pub fn compute_shortest_path<'a>(
        &'a self,
        start: &'a G::Key,
        end: &G::Key,
    ) -> Result<SearchTrail<'a, G::Key>, CoreError> {
        if start.is_absent() {
            return Err(CoreError::InvalidArgument { what: "start" });
        }
        if end.is_absent() {
            return Err(CoreError::InvalidArgument { what: "end" });
        }
        if !self.graph.contains_node(start) {
            return Err(CoreError::not_found(start));
        }
        if !self.graph.contains_node(end) {
            return Err(CoreError::not_found(end));
        }
        if start == end {
            return Ok(SearchTrail::trivial(start));
        }

        let mut best_cost: KeyIndex<&'a G::Key, f64> = KeyIndex::new();
        let mut steps: Vec<FrontierEntry<'a, G::Key>> = Vec::new();
        let mut frontier = Frontier::new(&self.order);
        let mut discovered = 0usize;

        frontier.push(FrontierEntry {
            node: start,
            cost: 0.0,
            predecessor: None,
            discovered,
        });

        while let Some(entry) = frontier.pop() {
            if entry.node == end {
                steps.push(entry);
                return Ok(SearchTrail {
                    end: steps.len() - 1,
                    steps,
                });
            }

            // Stale: a strictly cheaper route was already expanded.
            if let Some(&best) = best_cost.find(&entry.node) {
                if best < entry.cost {
                    continue;
                }
            }
            best_cost.put(entry.node, entry.cost);
            steps.push(entry);
            let current = steps.len() - 1;

            for (successor, weight) in self.graph.successors(entry.node)? {
                let candidate = entry.cost + weight.to_cost();
                let improves = match best_cost.find(&successor) {
                    Some(&best) => candidate < best,
                    None => true,
                };
                if improves {
                    discovered += 1;
                    frontier.push(FrontierEntry {
                        node: successor,
                        cost: candidate,
                        predecessor: Some(current),
                        discovered,
                    });
                }
            }
        }

        Err(CoreError::no_path(start, end))
    }

    /// Node identities along the shortest path, start first and end last.
    pub fn shortest_path_data(&self, start: &G::Key, end: &G::Key) -> Result<Vec<G::Key>, CoreError> {
        let trail = self.compute_shortest_path(start, end)?;
        Ok(trail.nodes().into_iter().cloned().collect())
    }

    /// Sum of edge weights along the shortest path.
    pub fn shortest_path_cost(&self, start: &G::Key, end: &G::Key) -> Result<f64, CoreError> {
        Ok(self.compute_shortest_path(start, end)?.cost())
    }

    /// Path and cost together as a [`PathResult`].
    pub fn shortest_path(&self, start: &G::Key, end: &G::Key) -> Result<PathResult<G::Key>, CoreError> {
        Ok(self.compute_shortest_path(start, end)?.into_result())
    }
}
