//! Random and fixed-shape graph generators.
//!
//! Every generator registers all of `0..node_count` as nodes and only ever
//! adds undirected edges, so the output is symmetric with no self loops and
//! no duplicate edges.

use std::collections::HashSet;

use influence_core::{Graph, NodeId, WeightedGraph};
use rand::Rng;

/// Upper bound for generated edge weights.
const MAX_WEIGHT: f64 = 10.0;

/// Cap on the edge buffer reserved up front; larger runs grow on demand.
const MAX_PREALLOCATED_EDGES: u64 = 1 << 20;

/// Random undirected edges: each node makes `average_degree` attempts at
/// picking a uniform partner, skipping itself and partners it already has.
pub fn random_edges<R: Rng>(node_count: u64, average_degree: u32, rng: &mut R) -> Vec<(NodeId, NodeId)> {
    let mut seen: HashSet<(NodeId, NodeId)> = HashSet::new();
    let mut edges = Vec::with_capacity(edge_capacity(node_count, average_degree));

    for i in 0..node_count {
        for _ in 0..average_degree {
            let j = rng.gen_range(0..node_count);
            if j == i {
                continue;
            }
            let key = (i.min(j), i.max(j));
            if seen.insert(key) {
                edges.push((i, j));
            }
        }
    }

    edges
}

fn edge_capacity(node_count: u64, average_degree: u32) -> usize {
    node_count
        .saturating_mul(u64::from(average_degree))
        .min(MAX_PREALLOCATED_EDGES) as usize
}

/// Path 0 - 1 - ... - (n-1).
pub fn path_edges(node_count: u64) -> Vec<(NodeId, NodeId)> {
    (1..node_count).map(|id| (id - 1, id)).collect()
}

/// Star with node 0 at the center.
pub fn star_edges(node_count: u64) -> Vec<(NodeId, NodeId)> {
    (1..node_count).map(|id| (0, id)).collect()
}

/// Unweighted graph over `0..node_count` with the given edges.
pub fn build_graph(node_count: u64, edges: &[(NodeId, NodeId)]) -> Graph {
    let mut graph = Graph::with_capacity(node_count as usize);
    for id in 0..node_count {
        graph.add_node(id);
    }
    for &(a, b) in edges {
        graph.add_edge(a, b);
    }
    graph
}

/// Weighted graph over `0..node_count` with the given edges. Weights are
/// drawn from `[0, 10]` and rounded to two decimals.
pub fn build_weighted_graph<R: Rng>(
    node_count: u64,
    edges: &[(NodeId, NodeId)],
    rng: &mut R,
) -> anyhow::Result<WeightedGraph> {
    let mut graph = WeightedGraph::with_capacity(node_count as usize);
    for id in 0..node_count {
        graph.add_node(id);
    }
    for &(a, b) in edges {
        graph.add_edge(a, b, random_weight(rng))?;
    }
    Ok(graph)
}

fn random_weight<R: Rng>(rng: &mut R) -> f64 {
    (rng.gen::<f64>() * MAX_WEIGHT * 100.0).round() / 100.0
}
