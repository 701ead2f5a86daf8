use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::config::{EngineConfig, SelfLoopPolicy};
use crate::error::GraphError;

/// Cost of traversing an edge. Always finite and non-negative once stored.
pub type Weight = f64;

/// Bounds every vertex identifier must satisfy. `Ord` drives the
/// engine's tie-break between equally distant vertices.
pub trait VertexId: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> VertexId for T {}

/// Dense internal index assigned to every identifier the graph has seen.
pub(crate) type VertexIdx = usize;

/// In-memory undirected weighted graph.
///
/// Identifiers are interned to dense indices on first sight, whether they
/// arrive through `add_vertex` or as an edge endpoint. Only identifiers
/// registered with `add_vertex` belong to the vertex set; the rest exist
/// purely as adjacency entries and are never visited by the engine.
///
/// Each undirected edge is stored twice in `adjacency` (once per endpoint)
/// and twice in `weights` (once per ordered pair), always with equal values.
#[derive(Debug, Clone)]
pub struct Graph<V = String> {
    ids: HashMap<V, VertexIdx>,
    names: Vec<V>,
    members: Vec<bool>,
    member_count: usize,
    adjacency: Vec<Vec<VertexIdx>>,
    weights: HashMap<(VertexIdx, VertexIdx), Weight>,
    edge_count: usize,
    self_loops: SelfLoopPolicy,
}

impl<V: VertexId> Graph<V> {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(vertex_count: usize, edge_count: usize) -> Self {
        Self {
            ids: HashMap::with_capacity(vertex_count),
            names: Vec::with_capacity(vertex_count),
            members: Vec::with_capacity(vertex_count),
            member_count: 0,
            adjacency: Vec::with_capacity(vertex_count),
            weights: HashMap::with_capacity(edge_count * 2),
            edge_count: 0,
            self_loops: SelfLoopPolicy::default(),
        }
    }

    /// Empty graph that applies the config's self-loop policy.
    pub fn with_config(config: &EngineConfig) -> Self {
        Self::new().with_self_loop_policy(config.self_loops)
    }

    pub fn with_self_loop_policy(mut self, policy: SelfLoopPolicy) -> Self {
        self.self_loops = policy;
        self
    }

    pub fn self_loop_policy(&self) -> SelfLoopPolicy {
        self.self_loops
    }

    fn intern(&mut self, v: V) -> VertexIdx {
        if let Some(&idx) = self.ids.get(&v) {
            return idx;
        }
        let idx = self.names.len();
        self.ids.insert(v.clone(), idx);
        self.names.push(v);
        self.members.push(false);
        self.adjacency.push(Vec::new());
        idx
    }

    /// Register a vertex. Returns false if it was already registered.
    pub fn add_vertex(&mut self, v: V) -> bool {
        let idx = self.intern(v);
        if self.members[idx] {
            return false;
        }
        self.members[idx] = true;
        self.member_count += 1;
        true
    }

    /// Add an undirected edge of the given weight.
    ///
    /// Neither endpoint is added to the vertex set. Adding the same pair
    /// again appends a duplicate adjacency entry and overwrites the weight.
    /// On error the graph is left unchanged.
    pub fn add_edge(&mut self, from: V, to: V, weight: Weight) -> Result<(), GraphError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight {
                from: format!("{:?}", from),
                to: format!("{:?}", to),
                weight,
            });
        }

        if from == to {
            return match self.self_loops {
                SelfLoopPolicy::Ignore => {
                    tracing::debug!(vertex = ?from, "ignoring self-loop");
                    Ok(())
                }
                SelfLoopPolicy::Reject => Err(GraphError::SelfLoop(format!("{:?}", from))),
            };
        }

        // Normalize -0.0 to +0.0.
        let weight = weight + 0.0;
        let a = self.intern(from);
        let b = self.intern(to);
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
        self.weights.insert((a, b), weight);
        self.weights.insert((b, a), weight);
        self.edge_count += 1;
        Ok(())
    }

    pub fn contains_vertex<Q>(&self, v: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index_of(v).is_some_and(|idx| self.members[idx])
    }

    /// Registered vertices in identifier order.
    pub fn vertices(&self) -> Vec<&V> {
        let mut out: Vec<&V> = self
            .names
            .iter()
            .zip(&self.members)
            .filter_map(|(name, &member)| member.then_some(name))
            .collect();
        out.sort();
        out
    }

    /// Neighbors of `v` in edge-insertion order, duplicates included.
    /// Empty if `v` has no edges.
    pub fn neighbors<Q>(&self, v: &Q) -> impl Iterator<Item = &V>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let adj: &[VertexIdx] = match self.index_of(v) {
            Some(idx) => &self.adjacency[idx],
            None => &[],
        };
        adj.iter().map(move |&n| &self.names[n])
    }

    /// Weight of the edge between `from` and `to`, if one was recorded.
    pub fn weight<Q>(&self, from: &Q, to: &Q) -> Option<Weight>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let a = self.index_of(from)?;
        let b = self.index_of(to)?;
        self.weight_between(a, b)
    }

    pub fn vertex_count(&self) -> usize {
        self.member_count
    }

    /// Number of recorded `add_edge` calls, repeated pairs included.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.member_count == 0
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let per_id = size_of::<V>() * 2 + size_of::<VertexIdx>() + size_of::<bool>() + 16;
        let ids_mem = self.names.len() * (per_id + size_of::<Vec<VertexIdx>>());
        let adj_mem: usize = self
            .adjacency
            .iter()
            .map(|v| v.capacity() * size_of::<VertexIdx>())
            .sum();
        let weights_mem =
            self.weights.len() * (size_of::<(VertexIdx, VertexIdx)>() + size_of::<Weight>() + 8);

        ids_mem + adj_mem + weights_mem
    }

    // Index-level access for the engine.

    pub(crate) fn index_of<Q>(&self, v: &Q) -> Option<VertexIdx>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.ids.get(v).copied()
    }

    pub(crate) fn index_len(&self) -> usize {
        self.names.len()
    }

    pub(crate) fn is_member(&self, idx: VertexIdx) -> bool {
        self.members[idx]
    }

    pub(crate) fn name(&self, idx: VertexIdx) -> &V {
        &self.names[idx]
    }

    pub(crate) fn neighbor_indices(&self, idx: VertexIdx) -> &[VertexIdx] {
        &self.adjacency[idx]
    }

    pub(crate) fn weight_between(&self, a: VertexIdx, b: VertexIdx) -> Option<Weight> {
        self.weights.get(&(a, b)).copied()
    }
}

impl<V: VertexId> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}
