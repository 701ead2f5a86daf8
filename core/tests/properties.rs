//! Property tests for the shortest-path engine over random graphs.
//!
//! Weights are small integers so every sum is exact in f64 and distances
//! can be compared with `==`.

use proptest::prelude::*;
use wayfinder_core::{
    compute_shortest_paths, compute_shortest_paths_with, shortest_path, Distance, Graph,
    PathOutcome, QueueStrategy,
};

fn build(n: u32, edges: &[(u32, u32, u32)]) -> Graph<u32> {
    let mut g = Graph::new();
    for v in 0..n {
        g.add_vertex(v);
    }
    for &(a, b, w) in edges {
        // Self-loops are ignored under the default policy.
        g.add_edge(a, b, f64::from(w)).unwrap();
    }
    g
}

/// Vertex count plus edges between those vertices; sparse enough that some
/// graphs come out disconnected.
fn graph_input() -> impl Strategy<Value = (u32, Vec<(u32, u32, u32)>)> {
    (1u32..12).prop_flat_map(|n| {
        let edge = (0..n, 0..n, 0u32..20);
        (Just(n), prop::collection::vec(edge, 0..(n as usize * 2)))
    })
}

proptest! {
    /// The start vertex sits at distance zero with no predecessor.
    #[test]
    fn start_is_zero((n, edges) in graph_input(), s in 0u32..12) {
        let g = build(n, &edges);
        let start = s % n;
        let sp = compute_shortest_paths(&g, &start).unwrap();
        prop_assert_eq!(sp.distance(&start), Some(Distance::ZERO));
        prop_assert!(sp.predecessor(&start).is_none());
    }

    /// No edge can shorten a settled distance (triangle inequality).
    #[test]
    fn triangle_inequality((n, edges) in graph_input(), s in 0u32..12) {
        let g = build(n, &edges);
        let sp = compute_shortest_paths(&g, &(s % n)).unwrap();
        for &(a, b, _) in &edges {
            if a == b {
                continue;
            }
            let w = g.weight(&a, &b).unwrap();
            let da = sp.distance(&a).unwrap();
            let db = sp.distance(&b).unwrap();
            prop_assert!(db <= da.plus(w));
            prop_assert!(da <= db.plus(w));
        }
    }

    /// Every reachable non-start vertex takes its distance from its best
    /// neighbor, and its predecessor is such a neighbor.
    #[test]
    fn relaxation_fixed_point((n, edges) in graph_input(), s in 0u32..12) {
        let g = build(n, &edges);
        let start = s % n;
        let sp = compute_shortest_paths(&g, &start).unwrap();
        for v in 0..n {
            let Some(dv) = sp.distance(&v).unwrap().value() else { continue };
            if v == start {
                continue;
            }
            let best = g
                .neighbors(&v)
                .filter_map(|u| sp.distance(u).unwrap().value().map(|du| du + g.weight(u, &v).unwrap()))
                .fold(f64::INFINITY, f64::min);
            prop_assert_eq!(dv, best);

            let p = sp.predecessor(&v).unwrap();
            let dp = sp.distance(p).unwrap().value().unwrap();
            prop_assert_eq!(dp + g.weight(p, &v).unwrap(), dv);
        }
    }

    /// Unreachable, infinite distance and missing predecessor coincide.
    #[test]
    fn unreachable_has_no_predecessor((n, edges) in graph_input(), s in 0u32..12) {
        let g = build(n, &edges);
        let start = s % n;
        let sp = compute_shortest_paths(&g, &start).unwrap();
        for v in (0..n).filter(|&v| v != start) {
            let infinite = sp.distance(&v) == Some(Distance::Infinite);
            prop_assert_eq!(infinite, sp.predecessor(&v).is_none());
            prop_assert_eq!(infinite, !sp.is_reachable(&v));
        }
    }

    /// Route legs are real edges and sum to the reported total.
    #[test]
    fn route_weights_sum_to_total((n, edges) in graph_input(), s in 0u32..12, e in 0u32..12) {
        let g = build(n, &edges);
        let (start, end) = (s % n, e % n);
        match shortest_path(&g, &start, &end).unwrap() {
            PathOutcome::Found(route) => {
                prop_assert_eq!(route.start(), &start);
                prop_assert_eq!(route.end(), &end);
                let mut sum = 0.0;
                for (pair, leg) in route.vertices().windows(2).zip(route.legs()) {
                    prop_assert_eq!(g.weight(&pair[0], &pair[1]), Some(*leg));
                    sum += leg;
                }
                prop_assert_eq!(sum, route.total_distance());
            }
            PathOutcome::Unreachable { start: s2, end: e2 } => {
                prop_assert_eq!((s2, e2), (start, end));
                let sp = compute_shortest_paths(&g, &start).unwrap();
                prop_assert_eq!(sp.distance(&end), Some(Distance::Infinite));
            }
        }
    }

    /// Undirected graphs give the same distance in both directions.
    #[test]
    fn distance_symmetric((n, edges) in graph_input(), s in 0u32..12, e in 0u32..12) {
        let g = build(n, &edges);
        let (a, b) = (s % n, e % n);
        let ab = shortest_path(&g, &a, &b).unwrap();
        let ba = shortest_path(&g, &b, &a).unwrap();
        prop_assert_eq!(ab.total_distance(), ba.total_distance());
    }

    /// Heap and linear-scan strategies settle in the same order.
    #[test]
    fn strategies_agree((n, edges) in graph_input(), s in 0u32..12) {
        let g = build(n, &edges);
        let start = s % n;
        let heap = compute_shortest_paths_with(&g, &start, QueueStrategy::BinaryHeap).unwrap();
        let scan = compute_shortest_paths_with(&g, &start, QueueStrategy::LinearScan).unwrap();
        for v in 0..n {
            prop_assert_eq!(heap.distance(&v), scan.distance(&v));
            prop_assert_eq!(heap.predecessor(&v), scan.predecessor(&v));
        }
        prop_assert_eq!(heap.settled(), scan.settled());
    }
}

#[test]
fn isolated_vertex_is_unreachable() {
    let mut g = build(3, &[(0, 1, 4), (1, 2, 4)]);
    g.add_vertex(99);
    for v in 0..3u32 {
        assert_eq!(
            shortest_path(&g, &v, &99u32).unwrap(),
            PathOutcome::Unreachable { start: v, end: 99 }
        );
    }
}
