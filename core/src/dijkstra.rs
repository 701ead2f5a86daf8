use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::hash::Hash;

use crate::config::QueueStrategy;
use crate::error::GraphError;
use crate::graph::{Graph, VertexId, VertexIdx, Weight};

/// Cumulative weight from the start vertex, with an explicit state for
/// vertices no path reaches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distance {
    Finite(f64),
    Infinite,
}

impl Distance {
    pub const ZERO: Distance = Distance::Finite(0.0);

    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    /// The numeric distance, or `None` when unreachable.
    pub fn value(&self) -> Option<f64> {
        match *self {
            Distance::Finite(d) => Some(d),
            Distance::Infinite => None,
        }
    }

    /// Extend by one edge. Infinity absorbs, and a sum that overflows `f64`
    /// saturates to `Infinite`.
    pub fn plus(self, weight: Weight) -> Distance {
        self.checked_plus(weight).unwrap_or(Distance::Infinite)
    }

    /// Extend by one edge, or `None` if a finite distance overflows `f64`.
    pub fn checked_plus(self, weight: Weight) -> Option<Distance> {
        match self {
            Distance::Finite(d) => {
                let sum = d + weight;
                sum.is_finite().then_some(Distance::Finite(sum))
            }
            Distance::Infinite => Some(Distance::Infinite),
        }
    }
}

// Finite distances are sums of validated weights, so never NaN.
impl Eq for Distance {}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Distance::Finite(a), Distance::Finite(b)) => a.total_cmp(b),
            (Distance::Finite(_), Distance::Infinite) => Ordering::Less,
            (Distance::Infinite, Distance::Finite(_)) => Ordering::Greater,
            (Distance::Infinite, Distance::Infinite) => Ordering::Equal,
        }
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{}", d),
            Distance::Infinite => f.write_str("inf"),
        }
    }
}

/// Distances and predecessors from one start vertex to every vertex in
/// the graph. Borrows the graph it was computed over.
#[derive(Debug, Clone)]
pub struct ShortestPaths<'g, V> {
    pub(crate) graph: &'g Graph<V>,
    pub(crate) start: VertexIdx,
    pub(crate) dist: Vec<Distance>,
    pub(crate) prev: Vec<Option<VertexIdx>>,
    strategy: QueueStrategy,
    settled: usize,
}

impl<'g, V: VertexId> ShortestPaths<'g, V> {
    pub fn start(&self) -> &'g V {
        self.graph.name(self.start)
    }

    pub fn strategy(&self) -> QueueStrategy {
        self.strategy
    }

    /// Distance to `v`, or `None` if `v` is not in the vertex set.
    pub fn distance<Q>(&self, v: &Q) -> Option<Distance>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.member_index(v)?;
        Some(self.dist[idx])
    }

    /// Vertex preceding `v` on its shortest path. `None` for the start,
    /// for unreachable vertices, and for identifiers outside the vertex set.
    pub fn predecessor<Q>(&self, v: &Q) -> Option<&'g V>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.member_index(v)?;
        self.prev[idx].map(|p| self.graph.name(p))
    }

    pub fn is_reachable<Q>(&self, v: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.distance(v).is_some_and(|d| d.is_finite())
    }

    /// Reachable vertices with their distances, in identifier order.
    pub fn reachable(&self) -> Vec<(&'g V, f64)> {
        let graph = self.graph;
        let mut out: Vec<(&'g V, f64)> = self
            .dist
            .iter()
            .enumerate()
            .filter(|&(idx, _)| graph.is_member(idx))
            .filter_map(|(idx, d)| d.value().map(|d| (graph.name(idx), d)))
            .collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }

    /// Number of vertices covered (the size of the vertex set).
    pub fn len(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of vertices settled at a finite distance.
    pub fn settled(&self) -> usize {
        self.settled
    }

    pub(crate) fn member_index<Q>(&self, v: &Q) -> Option<VertexIdx>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.graph
            .index_of(v)
            .filter(|&idx| self.graph.is_member(idx))
    }
}

/// Heap entry. Reversed ordering turns `BinaryHeap` into a min-heap on
/// `(dist, rank)`, where `rank` is the vertex's position in identifier
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    dist: Distance,
    rank: usize,
    idx: VertexIdx,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .cmp(&self.dist)
            .then_with(|| other.rank.cmp(&self.rank))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra from `start` using the default binary-heap strategy.
pub fn compute_shortest_paths<'g, V, Q>(
    graph: &'g Graph<V>,
    start: &Q,
) -> Result<ShortestPaths<'g, V>, GraphError>
where
    V: VertexId + Borrow<Q>,
    Q: Hash + Eq + fmt::Debug + ?Sized,
{
    compute_shortest_paths_with(graph, start, QueueStrategy::default())
}

/// Dijkstra from `start` with an explicit queue strategy.
///
/// Among vertices at equal distance the one with the smallest identifier
/// is settled first, so predecessors are reproducible. Neighbors outside
/// the vertex set are never relaxed. Unreachable vertices keep
/// `Distance::Infinite` and no predecessor.
pub fn compute_shortest_paths_with<'g, V, Q>(
    graph: &'g Graph<V>,
    start: &Q,
    strategy: QueueStrategy,
) -> Result<ShortestPaths<'g, V>, GraphError>
where
    V: VertexId + Borrow<Q>,
    Q: Hash + Eq + fmt::Debug + ?Sized,
{
    let start_idx = graph
        .index_of(start)
        .filter(|&idx| graph.is_member(idx))
        .ok_or_else(|| GraphError::InvalidVertex(format!("{:?}", start)))?;

    let n = graph.index_len();
    let mut dist = vec![Distance::Infinite; n];
    let mut prev: Vec<Option<VertexIdx>> = vec![None; n];
    let mut visited = vec![false; n];
    dist[start_idx] = Distance::ZERO;

    // Members in identifier order; rank[idx] is the position in that order.
    let mut order: Vec<VertexIdx> = (0..n).filter(|&idx| graph.is_member(idx)).collect();
    order.sort_by(|&a, &b| graph.name(a).cmp(graph.name(b)));
    let mut rank = vec![usize::MAX; n];
    for (r, &idx) in order.iter().enumerate() {
        rank[idx] = r;
    }

    let settled = match strategy {
        QueueStrategy::BinaryHeap => {
            run_heap(graph, start_idx, &rank, &mut dist, &mut prev, &mut visited)?
        }
        QueueStrategy::LinearScan => {
            run_linear(graph, &order, &mut dist, &mut prev, &mut visited)?
        }
    };

    tracing::debug!(
        start = ?graph.name(start_idx),
        %strategy,
        settled,
        vertices = order.len(),
        "computed shortest paths"
    );

    Ok(ShortestPaths {
        graph,
        start: start_idx,
        dist,
        prev,
        strategy,
        settled,
    })
}

/// Relax every unvisited member neighbor of `current`. Calls `on_improve`
/// for each neighbor whose distance dropped.
fn relax<V: VertexId>(
    graph: &Graph<V>,
    current: VertexIdx,
    dist: &mut [Distance],
    prev: &mut [Option<VertexIdx>],
    visited: &[bool],
    mut on_improve: impl FnMut(VertexIdx, Distance),
) -> Result<(), GraphError> {
    let base = dist[current];
    for &next in graph.neighbor_indices(current) {
        if visited[next] || !graph.is_member(next) {
            continue;
        }
        let Some(weight) = graph.weight_between(current, next) else {
            continue;
        };
        let candidate = base
            .checked_plus(weight)
            .ok_or_else(|| GraphError::DistanceOverflow(format!("{:?}", graph.name(next))))?;
        if candidate < dist[next] {
            dist[next] = candidate;
            prev[next] = Some(current);
            on_improve(next, candidate);
        }
    }
    Ok(())
}

fn run_heap<V: VertexId>(
    graph: &Graph<V>,
    start: VertexIdx,
    rank: &[usize],
    dist: &mut [Distance],
    prev: &mut [Option<VertexIdx>],
    visited: &mut [bool],
) -> Result<usize, GraphError> {
    let mut heap = BinaryHeap::new();
    heap.push(Candidate {
        dist: Distance::ZERO,
        rank: rank[start],
        idx: start,
    });
    let mut settled = 0;

    while let Some(Candidate { dist: d, idx, .. }) = heap.pop() {
        // Stale entry: the vertex was settled through a shorter path.
        if visited[idx] || d > dist[idx] {
            continue;
        }
        visited[idx] = true;
        settled += 1;

        relax(graph, idx, dist, prev, visited, |next, candidate| {
            heap.push(Candidate {
                dist: candidate,
                rank: rank[next],
                idx: next,
            });
        })?;
    }

    Ok(settled)
}

fn run_linear<V: VertexId>(
    graph: &Graph<V>,
    order: &[VertexIdx],
    dist: &mut [Distance],
    prev: &mut [Option<VertexIdx>],
    visited: &mut [bool],
) -> Result<usize, GraphError> {
    let mut settled = 0;

    loop {
        // Strict `<` while walking in identifier order keeps the smallest
        // identifier among equal distances.
        let mut best: Option<VertexIdx> = None;
        for &idx in order {
            if visited[idx] {
                continue;
            }
            if best.map_or(true, |b| dist[idx] < dist[b]) {
                best = Some(idx);
            }
        }

        // Everything left is unreachable.
        let Some(current) = best.filter(|&b| dist[b].is_finite()) else {
            break;
        };
        visited[current] = true;
        settled += 1;

        relax(graph, current, dist, prev, visited, |_, _| {})?;
    }

    Ok(settled)
}
