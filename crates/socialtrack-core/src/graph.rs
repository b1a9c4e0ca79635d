//! GraphStore: the directed weighted graph that path queries run over.
//!
//! Nodes live in a petgraph [`DiGraph`] and are located by identity through a
//! [`KeyIndex`] from key to [`NodeIndex`]. Nodes and edges are never removed,
//! so petgraph's edge indices grow in insertion order; `edges_leaving` relies
//! on that to report a node's edges in the order they were first inserted.
//!
//! The store is directed-only. A symmetric relation such as a friendship is
//! two edges, and issuing both is the loader's job.
//!
//! Search code does not see `GraphStore` directly. It goes through the
//! [`WeightedAdjacency`] trait, which any read-only adjacency source can
//! implement.

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use smallvec::SmallVec;

use crate::error::CoreError;
use crate::index::KeyIndex;
use crate::key::{NodeKey, Weight};

/// What `insert_edge` does when an endpoint is not in the store yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndpointPolicy {
    /// Fail with [`CoreError::NotFound`] naming the missing endpoint.
    #[default]
    Reject,
    /// Insert the missing endpoint(s) before adding the edge.
    AutoCreate,
}

/// A directed edge as seen from its source node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<'g, K, W> {
    pub source: &'g K,
    pub successor: &'g K,
    pub weight: W,
}

/// Successor list gathered for one node during relaxation.
pub type Successors<'g, K, W> = SmallVec<[(&'g K, W); 8]>;

/// Read-only adjacency a [`PathFinder`](crate::search::PathFinder) searches.
pub trait WeightedAdjacency {
    type Key: NodeKey;
    type Weight: Weight;

    fn contains_node(&self, key: &Self::Key) -> bool;

    /// Outgoing `(successor, weight)` pairs of `key`, in insertion order.
    ///
    /// Returns [`CoreError::NotFound`] if `key` is not a node.
    fn successors<'g>(
        &'g self,
        key: &Self::Key,
    ) -> Result<Successors<'g, Self::Key, Self::Weight>, CoreError>;
}

/// Directed weighted graph keyed by node identity.
#[derive(Debug, Clone)]
pub struct GraphStore<K, W> {
    graph: DiGraph<K, W, u32>,
    index: KeyIndex<K, NodeIndex<u32>>,
    policy: EndpointPolicy,
}

impl<K: NodeKey, W: Weight> GraphStore<K, W> {
    /// Creates an empty store that rejects edges with unknown endpoints.
    pub fn new() -> Self {
        Self::with_policy(EndpointPolicy::Reject)
    }

    pub fn with_policy(policy: EndpointPolicy) -> Self {
        GraphStore {
            graph: DiGraph::default(),
            index: KeyIndex::new(),
            policy,
        }
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Adds a node for `key` if absent. Returns true when a node was created.
    pub fn insert_node(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        self.node_index_or_insert(key);
        true
    }

    /// Creates or overwrites the directed edge `from -> to`.
    ///
    /// Returns true if the edge is new. Overwriting replaces the weight,
    /// keeps the edge's position among its source's edges, and leaves the
    /// edge count unchanged.
    ///
    /// Fails with [`CoreError::InvalidWeight`] for negative or non-finite
    /// weights, and with [`CoreError::NotFound`] for a missing endpoint when
    /// the store's policy is [`EndpointPolicy::Reject`]. A failed insertion
    /// leaves the store untouched.
    pub fn insert_edge(&mut self, from: K, to: K, weight: W) -> Result<bool, CoreError> {
        let cost = weight.to_cost();
        if !cost.is_finite() || cost < 0.0 {
            return Err(CoreError::invalid_weight(&from, &to, cost));
        }

        let (a, b) = match self.policy {
            EndpointPolicy::Reject => (*self.index.get(&from)?, *self.index.get(&to)?),
            EndpointPolicy::AutoCreate => (self.node_index_or_insert(from), self.node_index_or_insert(to)),
        };

        match self.graph.find_edge(a, b) {
            Some(edge) => {
                self.graph[edge] = weight;
                Ok(false)
            }
            None => {
                self.graph.add_edge(a, b, weight);
                Ok(true)
            }
        }
    }

    fn node_index_or_insert(&mut self, key: K) -> NodeIndex<u32> {
        if let Some(&idx) = self.index.find(&key) {
            return idx;
        }
        let idx = self.graph.add_node(key.clone());
        self.index.put(key, idx);
        idx
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn contains_node(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct directed edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node identities in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &K> {
        self.index.keys()
    }

    /// Current weight of `from -> to`, if that edge exists.
    pub fn weight(&self, from: &K, to: &K) -> Option<W> {
        let a = *self.index.find(from)?;
        let b = *self.index.find(to)?;
        self.graph.find_edge(a, b).map(|edge| self.graph[edge])
    }

    /// Outgoing edges of `key` in insertion order.
    ///
    /// Returns [`CoreError::NotFound`] if `key` is not a node.
    pub fn edges_leaving(&self, key: &K) -> Result<Vec<Edge<'_, K, W>>, CoreError> {
        let idx = *self.index.get(key)?;
        let mut leaving: Vec<(EdgeIndex<u32>, Edge<'_, K, W>)> = self
            .graph
            .edges(idx)
            .map(|edge| {
                (
                    edge.id(),
                    Edge {
                        source: &self.graph[edge.source()],
                        successor: &self.graph[edge.target()],
                        weight: *edge.weight(),
                    },
                )
            })
            .collect();
        leaving.sort_by_key(|(id, _)| *id);
        Ok(leaving.into_iter().map(|(_, edge)| edge).collect())
    }
}

impl<K: NodeKey, W: Weight> Default for GraphStore<K, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NodeKey, W: Weight> WeightedAdjacency for GraphStore<K, W> {
    type Key = K;
    type Weight = W;

    fn contains_node(&self, key: &K) -> bool {
        GraphStore::contains_node(self, key)
    }

    fn successors<'g>(&'g self, key: &K) -> Result<Successors<'g, K, W>, CoreError> {
        Ok(self
            .edges_leaving(key)?
            .into_iter()
            .map(|edge| (edge.successor, edge.weight))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> GraphStore<&'static str, u32> {
        let mut graph = GraphStore::new();
        for key in ["a", "b", "c"] {
            graph.insert_node(key);
        }
        graph.insert_edge("a", "b", 1).unwrap();
        graph.insert_edge("b", "c", 2).unwrap();
        graph.insert_edge("c", "a", 3).unwrap();
        graph
    }

    #[test]
    fn insert_node_is_idempotent() {
        let mut graph: GraphStore<String, f64> = GraphStore::new();
        assert!(graph.insert_node("alice".into()));
        assert!(!graph.insert_node("alice".into()));
        assert!(graph.insert_node("bob".into()));
        assert_eq!(graph.node_count(), 2);
        assert!(graph.contains_node(&"alice".to_string()));
        assert!(!graph.contains_node(&"carol".to_string()));
    }

    #[test]
    fn repeated_edge_updates_weight_not_count() {
        let mut graph = triangle();
        assert_eq!(graph.edge_count(), 3);

        assert!(!graph.insert_edge("a", "b", 9).unwrap());
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.weight(&"a", &"b"), Some(9));
    }

    #[test]
    fn edges_are_directed() {
        let graph = triangle();
        assert_eq!(graph.weight(&"a", &"b"), Some(1));
        assert_eq!(graph.weight(&"b", &"a"), None);
    }

    #[test]
    fn reject_policy_refuses_unknown_endpoints() {
        let mut graph = triangle();
        let err = graph.insert_edge("a", "zed", 1).unwrap_err();
        assert_eq!(err, CoreError::NotFound { key: "\"zed\"".into() });

        let err = graph.insert_edge("ghost", "a", 1).unwrap_err();
        assert_eq!(err, CoreError::NotFound { key: "\"ghost\"".into() });

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn auto_create_policy_inserts_endpoints() {
        let mut graph: GraphStore<&str, f64> = GraphStore::with_policy(EndpointPolicy::AutoCreate);
        assert!(graph.insert_edge("x", "y", 0.5).unwrap());
        assert_eq!(graph.node_count(), 2);
        assert!(graph.contains_node(&"x"));
        assert!(graph.contains_node(&"y"));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn negative_and_non_finite_weights_are_rejected() {
        let mut graph: GraphStore<&str, f64> = GraphStore::with_policy(EndpointPolicy::AutoCreate);
        assert!(matches!(
            graph.insert_edge("a", "b", -1.0),
            Err(CoreError::InvalidWeight { .. })
        ));
        assert!(matches!(
            graph.insert_edge("a", "b", f64::INFINITY),
            Err(CoreError::InvalidWeight { .. })
        ));
        assert!(matches!(
            graph.insert_edge("a", "b", f64::NAN),
            Err(CoreError::InvalidWeight { .. })
        ));
        // Nothing was created by the failed insertions.
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn zero_weight_is_allowed() {
        let mut graph = triangle();
        assert!(graph.insert_edge("a", "c", 0).unwrap());
    }

    #[test]
    fn edges_leaving_in_insertion_order() {
        let mut graph: GraphStore<char, u32> = GraphStore::with_policy(EndpointPolicy::AutoCreate);
        graph.insert_edge('s', 'c', 3).unwrap();
        graph.insert_edge('s', 'a', 1).unwrap();
        graph.insert_edge('x', 'y', 7).unwrap();
        graph.insert_edge('s', 'b', 2).unwrap();
        // Overwrite keeps the original slot.
        graph.insert_edge('s', 'c', 4).unwrap();

        let leaving = graph.edges_leaving(&'s').unwrap();
        let successors: Vec<(char, u32)> = leaving.iter().map(|e| (*e.successor, e.weight)).collect();
        assert_eq!(successors, vec![('c', 4), ('a', 1), ('b', 2)]);
        assert!(leaving.iter().all(|e| *e.source == 's'));
    }

    #[test]
    fn edges_leaving_unknown_node_is_not_found() {
        let graph = triangle();
        assert!(matches!(
            graph.edges_leaving(&"nope"),
            Err(CoreError::NotFound { .. })
        ));
        assert!(graph.edges_leaving(&"a").is_ok());
    }

    #[test]
    fn nodes_iterate_in_insertion_order() {
        let mut graph: GraphStore<u32, u8> = GraphStore::with_policy(EndpointPolicy::AutoCreate);
        graph.insert_node(5);
        graph.insert_edge(2, 5, 1).unwrap();
        graph.insert_edge(9, 2, 1).unwrap();
        let nodes: Vec<u32> = graph.nodes().copied().collect();
        assert_eq!(nodes, vec![5, 2, 9]);
    }

    #[test]
    fn successors_match_edges_leaving() {
        let graph = triangle();
        let successors = graph.successors(&"b").unwrap();
        assert_eq!(successors.as_slice(), &[(&"c", 2)]);
    }
}
