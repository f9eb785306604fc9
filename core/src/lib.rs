//! influence-core: closeness-style influence scores over in-memory graphs.
//!
//! A node's influence score is the reciprocal of the sum of its shortest-path
//! distances to every node it can reach. Unweighted graphs measure distance in
//! hops (BFS); weighted graphs sum non-negative edge weights (Dijkstra).
//! Unreachable nodes contribute nothing, and a node that reaches nothing
//! scores 0.
//!
//! Every node is an independent source, so runs can be spread across the
//! rayon pool with `CentralityConfig::parallel()` without changing results.

mod centrality;
mod config;
mod error;
mod graph;
mod traversal;

pub use centrality::{closeness, influence_scores, weighted_influence_scores, ScoreTable};
pub use config::{CentralityConfig, Execution};
pub use error::{InfluenceError, Result};
pub use graph::{Graph, NeighborPolicy, NodeId, WeightedEdge, WeightedGraph};
pub use traversal::{hop_distances, weighted_distances, DistanceTable};
