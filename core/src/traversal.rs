use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, VecDeque};

use ordered_float::OrderedFloat;

use crate::error::{InfluenceError, Result};
use crate::graph::{Graph, NodeId, Projection, WeightedGraph};

/// Distance from one source to every node. `None` means unreachable.
pub type DistanceTable<D> = BTreeMap<NodeId, Option<D>>;

/// Hop distances from `source` to every node of `graph`.
///
/// Returns None if `source` is not in the graph.
pub fn hop_distances(graph: &Graph, source: NodeId) -> Option<DistanceTable<u32>> {
    let projection = graph.project();
    let slot = projection.slot_of(source)?;
    let distances = bfs_distances(&projection, slot);
    Some(label(&projection, distances))
}

/// Weighted shortest-path distances from `source` to every node of `graph`.
///
/// Returns Ok(None) if `source` is not in the graph, and `DistanceOverflow`
/// if a path length does not fit in an `f64`.
pub fn weighted_distances(
    graph: &WeightedGraph,
    source: NodeId,
) -> Result<Option<DistanceTable<f64>>> {
    let projection = graph.project();
    let Some(slot) = projection.slot_of(source) else {
        return Ok(None);
    };
    let distances = dijkstra_distances(&projection, slot)?;
    Ok(Some(label(&projection, distances)))
}

fn label<T: Copy, D>(projection: &Projection<T>, distances: Vec<Option<D>>) -> DistanceTable<D> {
    projection.ids().iter().copied().zip(distances).collect()
}

/// BFS from `source`, returning hop counts indexed by slot.
///
/// A node is marked as soon as it is enqueued, so self loops and parallel
/// edges are visited at most once.
pub(crate) fn bfs_distances(projection: &Projection<u32>, source: usize) -> Vec<Option<u32>> {
    let mut distances: Vec<Option<u32>> = vec![None; projection.len()];
    let mut queue: VecDeque<(usize, u32)> = VecDeque::new();

    distances[source] = Some(0);
    queue.push_back((source, 0));

    while let Some((current, depth)) = queue.pop_front() {
        for &next in projection.neighbors(current) {
            let next = next as usize;
            if distances[next].is_none() {
                distances[next] = Some(depth + 1);
                queue.push_back((next, depth + 1));
            }
        }
    }

    distances
}

/// Dijkstra from `source` with lazy deletion, returning distances indexed by slot.
///
/// Improved distances are pushed as new heap entries instead of decreasing
/// keys in place. An entry whose distance is worse than the recorded best is
/// stale and skipped when popped. Requires non-negative weights, which
/// `WeightedGraph` guarantees. Every recorded distance is finite; a relaxation
/// that overflows to infinity fails with `DistanceOverflow`.
pub(crate) fn dijkstra_distances(
    projection: &Projection<(u32, f64)>,
    source: usize,
) -> Result<Vec<Option<f64>>> {
    let mut distances: Vec<Option<f64>> = vec![None; projection.len()];
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, usize)>> = BinaryHeap::new();

    distances[source] = Some(0.0);
    heap.push(Reverse((OrderedFloat(0.0), source)));

    while let Some(Reverse((OrderedFloat(dist), current))) = heap.pop() {
        if distances[current].is_some_and(|best| dist > best) {
            continue;
        }

        for &(next, weight) in projection.neighbors(current) {
            let next = next as usize;
            let candidate = dist + weight;
            if !candidate.is_finite() {
                return Err(InfluenceError::DistanceOverflow {
                    node: projection.node_id(source),
                });
            }
            let improves = match distances[next] {
                None => true,
                Some(best) => candidate < best,
            };
            if improves {
                distances[next] = Some(candidate);
                heap.push(Reverse((OrderedFloat(candidate), next)));
            }
        }
    }

    Ok(distances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NeighborPolicy, WeightedEdge};

    fn make_chain(n: u64) -> Graph {
        let mut g = Graph::new();
        for i in 0..n - 1 {
            g.add_edge(i, i + 1);
        }
        g
    }

    fn make_cycle(n: u64) -> Graph {
        let mut g = Graph::new();
        for i in 0..n {
            g.add_edge(i, (i + 1) % n);
        }
        g
    }

    // --- BFS tests ---

    #[test]
    fn test_bfs_chain() {
        let g = make_chain(4);
        let d = hop_distances(&g, 0).unwrap();
        assert_eq!(d[&0], Some(0));
        assert_eq!(d[&1], Some(1));
        assert_eq!(d[&2], Some(2));
        assert_eq!(d[&3], Some(3));
    }

    #[test]
    fn test_bfs_cycle_takes_short_way_round() {
        let g = make_cycle(6);
        let d = hop_distances(&g, 0).unwrap();
        assert_eq!(d[&3], Some(3));
        assert_eq!(d[&5], Some(1));
        assert_eq!(d[&4], Some(2));
    }

    #[test]
    fn test_bfs_unreachable_is_none() {
        let mut g = make_chain(3);
        g.add_edge(10, 11);
        let d = hop_distances(&g, 0).unwrap();
        assert_eq!(d.len(), 5);
        assert_eq!(d[&10], None);
        assert_eq!(d[&11], None);
    }

    #[test]
    fn test_bfs_source_not_in_graph() {
        let g = make_chain(3);
        assert!(hop_distances(&g, 999).is_none());
    }

    #[test]
    fn test_bfs_self_loop() {
        let mut g = Graph::new();
        g.add_edge(0, 0);
        g.add_edge(0, 1);
        let d = hop_distances(&g, 0).unwrap();
        assert_eq!(d[&0], Some(0));
        assert_eq!(d[&1], Some(1));
    }

    #[test]
    fn test_bfs_parallel_edges() {
        let mut g = Graph::new();
        g.add_edge(0, 1);
        g.add_edge(0, 1);
        g.add_edge(0, 1);
        let d = hop_distances(&g, 0).unwrap();
        assert_eq!(d[&1], Some(1));
    }

    #[test]
    fn test_bfs_follows_lists_as_given() {
        // 0 -> 1 only: 1 cannot reach 0.
        let g = Graph::from_adjacency(vec![(0, vec![1]), (1, vec![])], NeighborPolicy::Reject)
            .unwrap();
        assert_eq!(hop_distances(&g, 0).unwrap()[&1], Some(1));
        assert_eq!(hop_distances(&g, 1).unwrap()[&0], None);
    }

    // --- Dijkstra tests ---

    #[test]
    fn test_dijkstra_chain() {
        let mut g = WeightedGraph::new();
        g.add_edge(0, 1, 2.0).unwrap();
        g.add_edge(1, 2, 3.0).unwrap();
        let d = weighted_distances(&g, 0).unwrap().unwrap();
        assert_eq!(d[&1], Some(2.0));
        assert_eq!(d[&2], Some(5.0));
    }

    #[test]
    fn test_dijkstra_prefers_cheaper_longer_path() {
        // Direct edge 0-2 costs 10, the detour through 1 costs 3.
        let mut g = WeightedGraph::new();
        g.add_edge(0, 2, 10.0).unwrap();
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(1, 2, 2.0).unwrap();
        let d = weighted_distances(&g, 0).unwrap().unwrap();
        assert_eq!(d[&2], Some(3.0));
    }

    #[test]
    fn test_dijkstra_stale_entries_ignored() {
        // Node 3 is first reached at 100 via 0, then improved to 3 via 1 and 2.
        let mut g = WeightedGraph::new();
        g.add_edge(0, 3, 100.0).unwrap();
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(1, 2, 1.0).unwrap();
        g.add_edge(2, 3, 1.0).unwrap();
        g.add_edge(3, 4, 1.0).unwrap();
        let d = weighted_distances(&g, 0).unwrap().unwrap();
        assert_eq!(d[&3], Some(3.0));
        assert_eq!(d[&4], Some(4.0));
    }

    #[test]
    fn test_dijkstra_zero_weight_edges() {
        let mut g = WeightedGraph::new();
        g.add_edge(0, 1, 0.0).unwrap();
        g.add_edge(1, 2, 0.0).unwrap();
        let d = weighted_distances(&g, 0).unwrap().unwrap();
        assert_eq!(d[&2], Some(0.0));
    }

    #[test]
    fn test_dijkstra_unreachable_is_none() {
        let mut g = WeightedGraph::new();
        g.add_edge(0, 1, 1.5).unwrap();
        g.add_node(2);
        let d = weighted_distances(&g, 0).unwrap().unwrap();
        assert_eq!(d[&2], None);
        assert_eq!(weighted_distances(&g, 7), Ok(None));
    }

    #[test]
    fn test_dijkstra_large_weights_do_not_overflow() {
        let mut g = WeightedGraph::new();
        g.add_edge(0, 1, f64::MAX / 2.0).unwrap();
        g.add_node(2);
        let d = weighted_distances(&g, 0).unwrap().unwrap();
        assert_eq!(d[&1], Some(f64::MAX / 2.0));
        assert_eq!(d[&2], None);
    }

    #[test]
    fn test_dijkstra_path_overflow_is_error() {
        let mut g = WeightedGraph::new();
        g.add_edge(0, 1, f64::MAX).unwrap();
        g.add_edge(1, 2, f64::MAX).unwrap();
        assert_eq!(
            weighted_distances(&g, 0),
            Err(InfluenceError::DistanceOverflow { node: 0 })
        );
        assert_eq!(
            weighted_distances(&g, 2),
            Err(InfluenceError::DistanceOverflow { node: 2 })
        );
    }

    #[test]
    fn test_dijkstra_asymmetric_lists() {
        let g = WeightedGraph::from_adjacency(
            vec![
                (0, vec![WeightedEdge { target: 1, weight: 4.0 }]),
                (1, vec![]),
            ],
            NeighborPolicy::Reject,
        )
        .unwrap();
        assert_eq!(weighted_distances(&g, 0).unwrap().unwrap()[&1], Some(4.0));
        assert_eq!(weighted_distances(&g, 1).unwrap().unwrap()[&0], None);
    }
}
