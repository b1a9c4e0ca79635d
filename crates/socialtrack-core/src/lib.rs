pub mod error;
pub mod frontier;
pub mod graph;
pub mod index;
pub mod key;
pub mod path;
pub mod search;

// Re-export commonly used types
pub use error::CoreError;
pub use frontier::{ByCostThenDiscovery, ByCostThenKey, Frontier, FrontierEntry, FrontierOrder};
pub use graph::{Edge, EndpointPolicy, GraphStore, Successors, WeightedAdjacency};
pub use index::KeyIndex;
pub use key::{NodeKey, Weight};
pub use path::PathResult;
pub use search::{PathFinder, SearchTrail};
