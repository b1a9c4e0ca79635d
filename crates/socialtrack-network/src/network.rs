//! SocialNetwork: a friendship graph loaded from DOT files and queried for
//! closest connections.
//!
//! Users are `String` keys in a [`GraphStore`] with `f64` weights. An
//! undirected statement (`a -- b`) inserts both directed edges; a directed
//! one (`a -> b`) inserts only `a -> b`. Loading is all-or-nothing: a file
//! is parsed and applied to a staged copy of the graph, and the copy only
//! replaces the live graph once every statement went in.

use std::path::Path;

use socialtrack_core::{CoreError, EndpointPolicy, GraphStore, PathFinder, PathResult};
use tracing::{debug, info, warn};

use crate::dot::{self, Statement};
use crate::error::LoadError;
use crate::stats::NetworkStats;

/// Counts from one successful load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub users_added: usize,
    pub edges_added: usize,
    pub friendships_added: usize,
    pub self_loops_skipped: usize,
}

/// The social graph behind the lookup tool.
#[derive(Debug, Clone)]
pub struct SocialNetwork {
    graph: GraphStore<String, f64>,
    friendships: usize,
    loaded: bool,
}

impl SocialNetwork {
    /// Creates an empty network whose edge statements introduce their users.
    pub fn new() -> Self {
        Self::with_policy(EndpointPolicy::AutoCreate)
    }

    /// Creates an empty network with an explicit endpoint policy. Under
    /// [`EndpointPolicy::Reject`] every user must be declared by a node
    /// statement before an edge mentions it.
    pub fn with_policy(policy: EndpointPolicy) -> Self {
        SocialNetwork {
            graph: GraphStore::with_policy(policy),
            friendships: 0,
            loaded: false,
        }
    }

    /// Loads a `.dot` file, merging it into the current graph.
    pub fn load_dot_file(&mut self, path: impl AsRef<Path>) -> Result<LoadSummary, LoadError> {
        let path = path.as_ref();
        let is_dot = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("dot"));
        if !is_dot {
            return Err(LoadError::NotDot {
                path: path.to_path_buf(),
            });
        }

        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let summary = self.load_dot_str(&text)?;
        info!(
            path = %path.display(),
            users = summary.users_added,
            friendships = summary.friendships_added,
            "loaded social network"
        );
        Ok(summary)
    }

    /// Loads DOT text, merging it into the current graph.
    pub fn load_dot_str(&mut self, text: &str) -> Result<LoadSummary, LoadError> {
        let parsed = dot::parse(text)?;
        debug!(
            graph = parsed.name.as_deref().unwrap_or("<anonymous>"),
            directed = parsed.directed,
            statements = parsed.statements.len(),
            "parsed dot text"
        );
        let mut staged = self.graph.clone();
        let mut friendships = self.friendships;
        let mut summary = LoadSummary::default();
        let users_before = staged.node_count();
        let edges_before = staged.edge_count();

        for statement in parsed.statements {
            match statement {
                Statement::Node { id, .. } => {
                    staged.insert_node(id);
                }
                Statement::Edge(edge) => {
                    if edge.from == edge.to {
                        warn!(line = edge.line, user = %edge.from, "skipping self-loop");
                        summary.self_loops_skipped += 1;
                        continue;
                    }
                    let known = staged.weight(&edge.from, &edge.to).is_some()
                        || staged.weight(&edge.to, &edge.from).is_some();
                    let line = edge.line;
                    let graph_err = |source: CoreError| LoadError::Graph { line, source };

                    if edge.undirected {
                        staged
                            .insert_edge(edge.to.clone(), edge.from.clone(), edge.weight)
                            .map_err(graph_err)?;
                    }
                    staged
                        .insert_edge(edge.from, edge.to, edge.weight)
                        .map_err(graph_err)?;
                    if !known {
                        friendships += 1;
                        summary.friendships_added += 1;
                    }
                }
            }
        }

        summary.users_added = staged.node_count() - users_before;
        summary.edges_added = staged.edge_count() - edges_before;
        self.graph = staged;
        self.friendships = friendships;
        self.loaded = true;
        Ok(summary)
    }

    /// True once any load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn contains_user(&self, user: &str) -> bool {
        self.graph.contains_node(&user.to_string())
    }

    pub fn user_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn friendship_count(&self) -> usize {
        self.friendships
    }

    /// Read access to the underlying graph.
    pub fn graph(&self) -> &GraphStore<String, f64> {
        &self.graph
    }

    /// Shortest weighted path from `from` to `to`.
    pub fn closest_connection(&self, from: &str, to: &str) -> Result<PathResult<String>, CoreError> {
        let finder = PathFinder::new(&self.graph);
        let result = finder.shortest_path(&from.to_string(), &to.to_string());
        match &result {
            Ok(path) => debug!(from, to, hops = path.hop_count(), cost = path.cost(), "closest connection"),
            Err(err) => debug!(from, to, error = %err, "closest connection failed"),
        }
        result
    }

    pub fn stats(&self) -> NetworkStats {
        NetworkStats::new(self.graph.node_count(), self.friendships, self.graph.edge_count())
    }
}

impl Default for SocialNetwork {
    fn default() -> Self {
        Self::new()
    }
}
