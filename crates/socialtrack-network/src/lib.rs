//! Social network backend for the socialtrack tool.
//!
//! Turns DOT descriptions of friendships into a
//! [`GraphStore`](socialtrack_core::GraphStore) and answers the questions
//! the front end asks of it: closest connection between two users and
//! dataset statistics.
//!
//! # Modules
//!
//! - [`error`]: LoadError enum with all load failure modes
//! - [`dot`]: DOT subset parser producing node and edge statements
//! - [`network`]: SocialNetwork, loading and querying
//! - [`stats`]: NetworkStats and its text rendering

pub mod dot;
pub mod error;
pub mod network;
pub mod stats;

// Re-export key types for ergonomic use.
pub use error::LoadError;
pub use network::{LoadSummary, SocialNetwork};
pub use stats::NetworkStats;
