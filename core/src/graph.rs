use std::collections::HashMap;

use tracing::warn;

use crate::error::{InfluenceError, Result};

/// Opaque node identifier.
pub type NodeId = u64;

/// What `from_adjacency` does with a neighbor that is not itself a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborPolicy {
    /// Fail with `MalformedGraph`.
    #[default]
    Reject,
    /// Add the neighbor as a node with an empty adjacency list.
    Register,
}

/// A weighted adjacency entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEdge {
    pub target: NodeId,
    pub weight: f64,
}

/// Unweighted graph: node → ordered neighbor list.
///
/// `add_edge` stores every edge in both directions, so graphs built through it
/// are undirected. Graphs built with `from_adjacency` are taken as given.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: HashMap<NodeId, Vec<NodeId>>,
}

/// Weighted graph: node → ordered `(neighbor, weight)` list.
///
/// Every stored weight is finite and non-negative; the constructors reject
/// anything else with `InvalidWeight`.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    adjacency: HashMap<NodeId, Vec<WeightedEdge>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known node count.
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(node_count),
        }
    }

    /// Build from a raw adjacency map. Lists are kept exactly as supplied.
    pub fn from_adjacency<I>(adjacency: I, policy: NeighborPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeId, Vec<NodeId>)>,
    {
        let mut adjacency: HashMap<NodeId, Vec<NodeId>> = adjacency.into_iter().collect();
        resolve_neighbors(&mut adjacency, policy)?;
        Ok(Self { adjacency })
    }

    /// Register a node with no edges. No-op if it already exists.
    pub fn add_node(&mut self, id: NodeId) {
        self.adjacency.entry(id).or_default();
    }

    /// Add an undirected edge, registering both endpoints.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) {
        self.adjacency.entry(a).or_default().push(b);
        self.adjacency.entry(b).or_default().push(a);
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Neighbors of `id`, or an empty slice for unknown nodes.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Node ids in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Undirected edge count (each edge is stored twice).
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|v| v.len()).sum::<usize>() / 2
    }

    pub(crate) fn project(&self) -> Projection<u32> {
        Projection::build(&self.adjacency)
    }
}

impl WeightedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(node_count),
        }
    }

    /// Build from a raw adjacency map, validating every weight.
    pub fn from_adjacency<I>(adjacency: I, policy: NeighborPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeId, Vec<WeightedEdge>)>,
    {
        let mut adjacency: HashMap<NodeId, Vec<WeightedEdge>> = adjacency.into_iter().collect();
        // Report the smallest offending edge so the error does not depend on hash order.
        let invalid = adjacency
            .iter()
            .flat_map(|(&from, edges)| edges.iter().map(move |e| (from, e.target, e.weight)))
            .filter_map(|(from, to, weight)| {
                check_weight(from, to, weight)
                    .err()
                    .map(|err| ((from, to), err))
            })
            .min_by_key(|(edge, _)| *edge);
        if let Some((_, err)) = invalid {
            return Err(err);
        }
        resolve_neighbors(&mut adjacency, policy)?;
        Ok(Self { adjacency })
    }

    pub fn add_node(&mut self, id: NodeId) {
        self.adjacency.entry(id).or_default();
    }

    /// Add an undirected weighted edge. The graph is untouched if the weight is rejected.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: f64) -> Result<()> {
        check_weight(a, b, weight)?;
        self.adjacency
            .entry(a)
            .or_default()
            .push(WeightedEdge { target: b, weight });
        self.adjacency
            .entry(b)
            .or_default()
            .push(WeightedEdge { target: a, weight });
        Ok(())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.adjacency.contains_key(&id)
    }

    pub fn neighbors(&self, id: NodeId) -> &[WeightedEdge] {
        self.adjacency.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|v| v.len()).sum::<usize>() / 2
    }

    pub(crate) fn project(&self) -> Projection<(u32, f64)> {
        Projection::build(&self.adjacency)
    }
}

fn check_weight(from: NodeId, to: NodeId, weight: f64) -> Result<()> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(InfluenceError::InvalidWeight { from, to, weight })
    }
}

/// An adjacency entry that can be rewritten in terms of dense slots.
pub(crate) trait AdjacencyEntry {
    type Slotted: Copy;

    fn target(&self) -> NodeId;
    fn slotted(&self, slot: u32) -> Self::Slotted;
}

impl AdjacencyEntry for NodeId {
    type Slotted = u32;

    fn target(&self) -> NodeId {
        *self
    }

    fn slotted(&self, slot: u32) -> u32 {
        slot
    }
}

impl AdjacencyEntry for WeightedEdge {
    type Slotted = (u32, f64);

    fn target(&self) -> NodeId {
        self.target
    }

    fn slotted(&self, slot: u32) -> (u32, f64) {
        (slot, self.weight)
    }
}

fn resolve_neighbors<E: AdjacencyEntry>(
    adjacency: &mut HashMap<NodeId, Vec<E>>,
    policy: NeighborPolicy,
) -> Result<()> {
    let mut missing: Vec<(NodeId, NodeId)> = adjacency
        .iter()
        .flat_map(|(&node, edges)| edges.iter().map(move |e| (node, e.target())))
        .filter(|(_, neighbor)| !adjacency.contains_key(neighbor))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    match policy {
        NeighborPolicy::Reject => {
            // Report the smallest offender so the error does not depend on hash order.
            missing.sort_unstable();
            let (node, neighbor) = missing[0];
            Err(InfluenceError::MalformedGraph { node, neighbor })
        }
        NeighborPolicy::Register => {
            for &(_, neighbor) in &missing {
                adjacency.entry(neighbor).or_default();
            }
            warn!(
                registered = missing.len(),
                "neighbors missing from the key set were registered with empty adjacency"
            );
            Ok(())
        }
    }
}

/// Dense, slot-indexed copy of a graph used for the per-source runs.
///
/// Slots follow ascending node id, so iterating slots is deterministic
/// regardless of the hash order of the source map.
pub(crate) struct Projection<T> {
    ids: Vec<NodeId>,
    adjacency: Vec<Vec<T>>,
}

impl<T: Copy> Projection<T> {
    fn build<E>(source: &HashMap<NodeId, Vec<E>>) -> Self
    where
        E: AdjacencyEntry<Slotted = T>,
    {
        let mut ids: Vec<NodeId> = source.keys().copied().collect();
        ids.sort_unstable();

        let index: HashMap<NodeId, u32> = ids
            .iter()
            .enumerate()
            .map(|(slot, &id)| (id, slot as u32))
            .collect();

        let adjacency = ids
            .iter()
            .map(|id| {
                source[id]
                    .iter()
                    .filter_map(|e| index.get(&e.target()).map(|&slot| e.slotted(slot)))
                    .collect()
            })
            .collect();

        Self { ids, adjacency }
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn node_id(&self, slot: usize) -> NodeId {
        self.ids[slot]
    }

    pub(crate) fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    pub(crate) fn slot_of(&self, id: NodeId) -> Option<usize> {
        self.ids.binary_search(&id).ok()
    }

    pub(crate) fn neighbors(&self, slot: usize) -> &[T] {
        &self.adjacency[slot]
    }
}
