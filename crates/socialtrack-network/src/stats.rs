//! Aggregate statistics reported for a loaded network.

use std::fmt;

use serde::Serialize;

/// User, friendship and average-friend counts for a [`SocialNetwork`](crate::SocialNetwork).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetworkStats {
    pub users: usize,
    /// Distinct pairs of users joined by at least one edge statement.
    pub friendships: usize,
    /// Directed edges per user; 0 for an empty network.
    pub average_friends: f64,
}

impl NetworkStats {
    pub fn new(users: usize, friendships: usize, directed_edges: usize) -> Self {
        let average_friends = if users == 0 {
            0.0
        } else {
            directed_edges as f64 / users as f64
        };
        NetworkStats {
            users,
            friendships,
            average_friends,
        }
    }
}

impl fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Users: {}", self.users)?;
        writeln!(f, "Total Friendships: {}", self.friendships)?;
        write!(f, "Average Friends Per User: {:.2}", self.average_friends)
    }
}
