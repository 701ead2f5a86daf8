use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use crate::config::QueueStrategy;
use crate::dijkstra::{compute_shortest_paths_with, Distance, ShortestPaths};
use crate::error::GraphError;
use crate::graph::{Graph, VertexId, Weight};

/// An ordered route from start to end with its total weight. Always holds
/// at least the start vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Route<V> {
    vertices: Vec<V>,
    legs: Vec<Weight>,
    total_distance: f64,
}

/// A single vertex on a route.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStep<'a, V> {
    pub vertex: &'a V,
    /// Weight of the edge used to arrive here. None for the start vertex.
    pub leg: Option<Weight>,
    pub cumulative: f64,
}

impl<V> Route<V> {
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Weight of each edge on the route; `legs()[i]` joins `vertices()[i]`
    /// and `vertices()[i + 1]`.
    pub fn legs(&self) -> &[Weight] {
        &self.legs
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    pub fn into_vertices(self) -> Vec<V> {
        self.vertices
    }

    pub fn start(&self) -> &V {
        &self.vertices[0]
    }

    pub fn end(&self) -> &V {
        &self.vertices[self.vertices.len() - 1]
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.legs.len()
    }

    pub fn steps(&self) -> Vec<PathStep<'_, V>> {
        let mut cumulative = 0.0;
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, vertex)| {
                let leg = i.checked_sub(1).map(|j| self.legs[j]);
                if let Some(w) = leg {
                    cumulative += w;
                }
                PathStep { vertex, leg, cumulative }
            })
            .collect()
    }
}

impl<V: fmt::Display> fmt::Display for Route<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, " ({})", self.total_distance)
    }
}

/// Result of a point-to-point query. An unreachable end vertex is a normal
/// outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum PathOutcome<V> {
    Found(Route<V>),
    Unreachable { start: V, end: V },
}

impl<V> PathOutcome<V> {
    pub fn is_found(&self) -> bool {
        matches!(self, PathOutcome::Found(_))
    }

    pub fn route(&self) -> Option<&Route<V>> {
        match self {
            PathOutcome::Found(route) => Some(route),
            PathOutcome::Unreachable { .. } => None,
        }
    }

    pub fn into_route(self) -> Option<Route<V>> {
        match self {
            PathOutcome::Found(route) => Some(route),
            PathOutcome::Unreachable { .. } => None,
        }
    }

    pub fn total_distance(&self) -> Distance {
        match self {
            PathOutcome::Found(route) => Distance::Finite(route.total_distance),
            PathOutcome::Unreachable { .. } => Distance::Infinite,
        }
    }
}

impl<'g, V: VertexId> ShortestPaths<'g, V> {
    /// Reconstruct the route to `end` from this result without recomputing.
    pub fn path_to<Q>(&self, end: &Q) -> Result<PathOutcome<V>, GraphError>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        let end_idx = self
            .member_index(end)
            .ok_or_else(|| GraphError::InvalidVertex(format!("{:?}", end)))?;

        let Distance::Finite(total_distance) = self.dist[end_idx] else {
            return Ok(PathOutcome::Unreachable {
                start: self.start().clone(),
                end: self.graph.name(end_idx).clone(),
            });
        };

        let mut indices = vec![end_idx];
        let mut current = end_idx;
        while let Some(p) = self.prev[current] {
            indices.push(p);
            current = p;
        }
        indices.reverse();

        let legs = indices
            .windows(2)
            .map(|pair| {
                let weight = self.graph.weight_between(pair[0], pair[1]);
                debug_assert!(weight.is_some(), "predecessor link without an edge");
                weight.unwrap_or(0.0)
            })
            .collect();
        let vertices = indices
            .into_iter()
            .map(|idx| self.graph.name(idx).clone())
            .collect();

        Ok(PathOutcome::Found(Route {
            vertices,
            legs,
            total_distance,
        }))
    }
}

/// Shortest route from `start` to `end`.
///
/// Both endpoints must be registered vertices; `start` is checked first.
pub fn shortest_path<V, Q>(graph: &Graph<V>, start: &Q, end: &Q) -> Result<PathOutcome<V>, GraphError>
where
    V: VertexId + Borrow<Q>,
    Q: Hash + Eq + fmt::Debug + ?Sized,
{
    shortest_path_with(graph, start, end, QueueStrategy::default())
}

pub fn shortest_path_with<V, Q>(
    graph: &Graph<V>,
    start: &Q,
    end: &Q,
    strategy: QueueStrategy,
) -> Result<PathOutcome<V>, GraphError>
where
    V: VertexId + Borrow<Q>,
    Q: Hash + Eq + fmt::Debug + ?Sized,
{
    for v in [start, end] {
        if !graph.contains_vertex(v) {
            return Err(GraphError::InvalidVertex(format!("{:?}", v)));
        }
    }

    let paths = compute_shortest_paths_with(graph, start, strategy)?;
    paths.path_to(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dijkstra::compute_shortest_paths;

    fn five_rooms() -> Graph {
        let mut g = Graph::new();
        for v in ["a", "b", "c", "d", "e"] {
            g.add_vertex(v.to_string());
        }
        for (u, v, w) in [
            ("a", "b", 5.0),
            ("a", "c", 6.0),
            ("a", "d", 10.0),
            ("b", "d", 6.0),
            ("c", "d", 6.0),
            ("d", "e", 2.0),
        ] {
            g.add_edge(u.to_string(), v.to_string(), w).unwrap();
        }
        g
    }

    fn route_names(outcome: &PathOutcome<String>) -> Vec<&str> {
        outcome
            .route()
            .unwrap()
            .vertices()
            .iter()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn test_five_rooms_a_to_e() {
        let g = five_rooms();
        let outcome = shortest_path(&g, "a", "e").unwrap();
        assert_eq!(route_names(&outcome), vec!["a", "d", "e"]);
        assert_eq!(outcome.total_distance(), Distance::Finite(12.0));
        let route = outcome.route().unwrap();
        assert_eq!(route.legs(), &[10.0, 2.0]);
        assert_eq!(route.hops(), 2);
        assert_eq!(route.to_string(), "a -> d -> e (12)");
    }

    #[test]
    fn test_reverse_direction_same_distance() {
        let g = five_rooms();
        let forward = shortest_path(&g, "a", "e").unwrap();
        let back = shortest_path(&g, "e", "a").unwrap();
        assert_eq!(forward.total_distance(), back.total_distance());
        assert_eq!(route_names(&back), vec!["e", "d", "a"]);
    }

    #[test]
    fn test_same_start_and_end() {
        let g = five_rooms();
        let outcome = shortest_path(&g, "c", "c").unwrap();
        assert_eq!(route_names(&outcome), vec!["c"]);
        assert_eq!(outcome.total_distance(), Distance::ZERO);
        assert_eq!(outcome.route().unwrap().hops(), 0);
    }

    #[test]
    fn test_unreachable_reported() {
        let mut g = five_rooms();
        g.add_vertex("island".into());
        let outcome = shortest_path(&g, "a", "island").unwrap();
        assert_eq!(
            outcome,
            PathOutcome::Unreachable {
                start: "a".to_string(),
                end: "island".to_string()
            }
        );
        assert!(!outcome.is_found());
        assert_eq!(outcome.total_distance(), Distance::Infinite);

        // And from the island outwards.
        let outcome = shortest_path(&g, "island", "a").unwrap();
        assert!(outcome.route().is_none());
    }

    #[test]
    fn test_invalid_start_checked_first() {
        let g = five_rooms();
        let err = shortest_path(&g, "x", "y").unwrap_err();
        assert_eq!(err, GraphError::InvalidVertex("\"x\"".into()));
        let err = shortest_path(&g, "a", "y").unwrap_err();
        assert_eq!(err, GraphError::InvalidVertex("\"y\"".into()));
    }

    #[test]
    fn test_vertex_only_in_edge_is_invalid() {
        let mut g = five_rooms();
        g.add_edge("e".into(), "Roof".into(), 3.0).unwrap();
        assert!(matches!(
            shortest_path(&g, "a", "Roof"),
            Err(GraphError::InvalidVertex(_))
        ));
    }

    #[test]
    fn test_steps_cumulative() {
        let g = five_rooms();
        let route = shortest_path(&g, "c", "e").unwrap().into_route().unwrap();
        let steps = route.steps();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].vertex, "c");
        assert!(steps[0].leg.is_none());
        assert_eq!(steps[0].cumulative, 0.0);
        assert_eq!(steps[1].vertex, "d");
        assert_eq!(steps[1].leg, Some(6.0));
        assert_eq!(steps[2].cumulative, 8.0);
        assert_eq!(route.start(), "c");
        assert_eq!(route.end(), "e");
    }

    #[test]
    fn test_route_shape() {
        let g = five_rooms();
        for end in ["a", "b", "c", "d", "e"] {
            let route = shortest_path(&g, "a", end).unwrap().into_route().unwrap();
            assert_eq!(route.vertices().len(), route.legs().len() + 1);
            assert_eq!(route.legs().iter().sum::<f64>(), route.total_distance());
            assert_eq!(route.start(), "a");
            assert_eq!(route.end(), end);
        }
        let route = shortest_path(&g, "b", "e").unwrap().into_route().unwrap();
        assert_eq!(route.into_vertices(), vec!["b", "d", "e"]);
    }

    #[test]
    fn test_path_to_reuses_result() {
        let g = five_rooms();
        let paths = compute_shortest_paths(&g, "b").unwrap();
        for target in ["a", "c", "d", "e"] {
            let reused = paths.path_to(target).unwrap();
            let fresh = shortest_path(&g, "b", target).unwrap();
            assert_eq!(reused, fresh);
        }
        assert!(paths.path_to("nowhere").is_err());
    }

    #[test]
    fn test_linear_scan_matches_heap() {
        let g = five_rooms();
        for start in ["a", "b", "c", "d", "e"] {
            for end in ["a", "b", "c", "d", "e"] {
                assert_eq!(
                    shortest_path_with(&g, start, end, QueueStrategy::BinaryHeap).unwrap(),
                    shortest_path_with(&g, start, end, QueueStrategy::LinearScan).unwrap(),
                );
            }
        }
    }
}
