//! Capability traits for node identities and edge weights.
//!
//! [`NodeKey`] is the bound every node identity satisfies: hashable,
//! comparable, cloneable and printable for error messages. It also carries
//! the notion of an "absent" key, which query entry points reject before
//! touching the graph.
//!
//! [`Weight`] keeps the edge weight type pluggable. The search accumulates
//! costs as `f64`, so a weight only has to say how it converts.

use std::fmt;
use std::hash::Hash;

/// Identity of a node in a [`GraphStore`](crate::graph::GraphStore).
pub trait NodeKey: Clone + Eq + Hash + fmt::Debug {
    /// Returns true when the key is the caller's "not supplied" sentinel.
    fn is_absent(&self) -> bool {
        false
    }
}

impl NodeKey for String {
    fn is_absent(&self) -> bool {
        self.trim().is_empty()
    }
}

impl NodeKey for &str {
    fn is_absent(&self) -> bool {
        self.trim().is_empty()
    }
}

macro_rules! present_keys {
    ($($ty:ty),* $(,)?) => {
        $(impl NodeKey for $ty {})*
    };
}

present_keys!(char, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Numeric edge weight, convertible to the `f64` cost the search sums.
///
/// Insertion rejects weights whose cost is negative or not finite.
pub trait Weight: Copy + fmt::Debug {
    fn to_cost(self) -> f64;
}

macro_rules! numeric_weights {
    ($($ty:ty),* $(,)?) => {
        $(impl Weight for $ty {
            fn to_cost(self) -> f64 {
                self as f64
            }
        })*
    };
}

numeric_weights!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);
