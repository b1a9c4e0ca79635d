//! Core error types for socialtrack-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering the
//! failure modes of graph construction and shortest-path queries. Keys are
//! rendered with their `Debug` form so the enum stays non-generic.

use std::fmt;

use thiserror::Error;

/// Core errors produced by the socialtrack-core crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A query endpoint was the absent sentinel (for string keys: empty).
    #[error("invalid argument: {what} node was not supplied")]
    InvalidArgument { what: &'static str },

    /// A key was not present in the graph or index.
    #[error("node not found: {key}")]
    NotFound { key: String },

    /// The end node is unreachable from the start node.
    #[error("no path from {start} to {end}")]
    NoPath { start: String, end: String },

    /// An edge weight converted to a negative or non-finite cost.
    #[error("invalid weight on edge {from} -> {to}: {cost}")]
    InvalidWeight { from: String, to: String, cost: f64 },
}

impl CoreError {
    pub fn not_found<K: fmt::Debug + ?Sized>(key: &K) -> Self {
        CoreError::NotFound {
            key: format!("{:?}", key),
        }
    }

    pub fn no_path<K: fmt::Debug + ?Sized>(start: &K, end: &K) -> Self {
        CoreError::NoPath {
            start: format!("{:?}", start),
            end: format!("{:?}", end),
        }
    }

    pub fn invalid_weight<K: fmt::Debug + ?Sized>(from: &K, to: &K, cost: f64) -> Self {
        CoreError::InvalidWeight {
            from: format!("{:?}", from),
            to: format!("{:?}", to),
            cost,
        }
    }
}
