use std::collections::BTreeMap;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::{CentralityConfig, Execution};
use crate::error::{InfluenceError, Result};
use crate::graph::{Graph, NodeId, Projection, WeightedGraph};
use crate::traversal::{bfs_distances, dijkstra_distances};

/// Influence score per node, ordered by node id.
///
/// Holds exactly the node set of the graph it was computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    scores: BTreeMap<NodeId, f64>,
}

impl ScoreTable {
    pub fn get(&self, id: NodeId) -> Option<f64> {
        self.scores.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// `(node, score)` pairs in ascending node order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.scores.iter().map(|(&id, &score)| (id, score))
    }

    /// Nodes ranked by score.
    ///
    /// If `top_n` is 0, returns all nodes. Otherwise returns the top N by
    /// score (descending). Ties are broken by node ID (ascending).
    pub fn ranked(&self, top_n: usize) -> Vec<(NodeId, f64)> {
        let mut results: Vec<(NodeId, f64)> = self.iter().collect();

        results.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        if top_n > 0 && top_n < results.len() {
            results.truncate(top_n);
        }

        results
    }

    pub fn into_inner(self) -> BTreeMap<NodeId, f64> {
        self.scores
    }

    fn from_slots<T: Copy>(projection: &Projection<T>, scores: Vec<f64>) -> Self {
        Self {
            scores: projection.ids().iter().copied().zip(scores).collect(),
        }
    }
}

/// Reciprocal of a total distance, or 0 when nothing else is reachable.
pub fn closeness(total_distance: f64) -> f64 {
    if total_distance > 0.0 {
        1.0 / total_distance
    } else {
        0.0
    }
}

/// Influence scores on an unweighted graph, with distances counted in hops.
///
/// Runs one BFS per node and sums the finite hop counts; unreachable nodes
/// contribute nothing.
pub fn influence_scores(graph: &Graph, config: &CentralityConfig) -> ScoreTable {
    let projection = graph.project();
    let scores = score_all("unweighted", &projection, config, |projection, source| {
        let total: u64 = bfs_distances(projection, source)
            .into_iter()
            .flatten()
            .map(u64::from)
            .sum();
        trace!(node = projection.node_id(source), total, "source complete");
        closeness(total as f64)
    });
    ScoreTable::from_slots(&projection, scores)
}

/// Influence scores on a weighted graph, with distances as summed edge weights.
///
/// Runs one Dijkstra per node. Weights are non-negative by construction of
/// `WeightedGraph`. Fails with `DistanceOverflow` if a path length or a
/// node's total distance exceeds the `f64` range; with several overflowing
/// sources the smallest node id is reported.
pub fn weighted_influence_scores(
    graph: &WeightedGraph,
    config: &CentralityConfig,
) -> Result<ScoreTable> {
    let projection = graph.project();
    let scores = score_all("weighted", &projection, config, |projection, source| -> Result<f64> {
        let total: f64 = dijkstra_distances(projection, source)?
            .into_iter()
            .flatten()
            .sum();
        if !total.is_finite() {
            return Err(InfluenceError::DistanceOverflow {
                node: projection.node_id(source),
            });
        }
        trace!(node = projection.node_id(source), total, "source complete");
        Ok(closeness(total))
    });
    let scores = scores.into_iter().collect::<Result<Vec<f64>>>()?;
    Ok(ScoreTable::from_slots(&projection, scores))
}

/// Run `score_source` for every slot of `projection`.
///
/// Each source owns its own distance buffer and the results come back in
/// slot order, so both execution modes produce identical output.
fn score_all<T, R, F>(
    kind: &'static str,
    projection: &Projection<T>,
    config: &CentralityConfig,
    score_source: F,
) -> Vec<R>
where
    T: Copy + Sync,
    R: Send,
    F: Fn(&Projection<T>, usize) -> R + Sync,
{
    let node_count = projection.len();
    let started = Instant::now();
    debug!(
        kind,
        nodes = node_count,
        execution = %config.execution,
        "computing influence scores"
    );

    let results: Vec<R> = match config.execution {
        Execution::Sequential => (0..node_count)
            .map(|source| score_source(projection, source))
            .collect(),
        Execution::Parallel => (0..node_count)
            .into_par_iter()
            .map(|source| score_source(projection, source))
            .collect(),
    };

    debug!(
        kind,
        nodes = node_count,
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "influence scores computed"
    );

    results
}
