use thiserror::Error;

use crate::graph::NodeId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InfluenceError {
    /// Edge weights must be finite and non-negative for shortest-path relaxation.
    #[error("invalid weight {weight} on edge {from} -> {to}: weights must be finite and non-negative")]
    InvalidWeight { from: NodeId, to: NodeId, weight: f64 },

    #[error("malformed graph: node {node} lists neighbor {neighbor}, which is not a graph node")]
    MalformedGraph { node: NodeId, neighbor: NodeId },

    /// Individually finite weights whose path or total sum exceeds `f64::MAX`.
    #[error("distance overflow: shortest-path distances from node {node} exceed the f64 range")]
    DistanceOverflow { node: NodeId },
}

pub type Result<T> = std::result::Result<T, InfluenceError>;
