use std::collections::VecDeque;
use std::time::Instant;

use wayfinder_core::{compute_shortest_paths_with, Graph, PathOutcome, QueueStrategy};

/// Above this size the O(V²) linear scan is skipped.
const LINEAR_SCAN_LIMIT: u64 = 20_000;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: wayfinder-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  floors      Stacked corridor grids joined by stairwells");
        println!("  lsystem     Fractal branching tree (deep paths)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense clusters connected by a thin bridge");
        println!("  dla         Diffusion-limited aggregation (organic branching)");
        println!();
        println!("Default node_count: 200000");
        println!("Linear-scan timings only run for node_count <= {}", LINEAR_SCAN_LIMIT);
        return;
    }

    if node_count < 20 {
        eprintln!("node_count must be at least 20");
        return;
    }

    println!("wayfinder-bench");
    println!("===============");
    println!();

    let generators: Vec<(&str, fn(u64) -> Graph<u64>)> = match mode {
        "floors" => vec![("Floors (grid + stairwells)", gen_floors)],
        "lsystem" => vec![("L-system tree", gen_lsystem)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "dla" => vec![("DLA (organic branching)", gen_dla)],
        "all" => vec![
            ("Floors (grid + stairwells)", gen_floors as fn(u64) -> Graph<u64>),
            ("L-system tree", gen_lsystem),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
            ("DLA (organic branching)", gen_dla),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, node_count);
    }
}

fn run_benchmark(name: &str, generator: fn(u64) -> Graph<u64>, node_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} vertices", node_count);

    let t = Instant::now();
    let graph = generator(node_count);
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s - {} vertices, {} edges, ~{:.0}MB",
        gen_time.as_secs_f64(),
        graph.vertex_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    println!();
    println!("{:>12} {:>12} {:>12} {:>10}", "strategy", "settled", "far dist", "time");
    println!("{:->12} {:->12} {:->12} {:->10}", "", "", "", "");

    let far_node = graph.vertex_count() as u64 - 1;
    let mut strategies = vec![QueueStrategy::BinaryHeap];
    if node_count <= LINEAR_SCAN_LIMIT {
        strategies.push(QueueStrategy::LinearScan);
    }

    for strategy in strategies {
        let t = Instant::now();
        let paths = match compute_shortest_paths_with(&graph, &0u64, strategy) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("query failed: {}", e);
                return;
            }
        };
        let elapsed = t.elapsed();
        let far = paths
            .distance(&far_node)
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>12} {:>12} {:>12} {:>8.1}ms",
            strategy.to_string(),
            paths.settled(),
            far,
            elapsed.as_secs_f64() * 1000.0
        );
    }

    // Route reconstruction: vertex 0 to the last vertex
    println!();
    let t = Instant::now();
    let outcome = wayfinder_core::shortest_path(&graph, &0, &far_node);
    let elapsed = t.elapsed();
    match outcome {
        Ok(PathOutcome::Found(route)) => println!(
            "Shortest path 0 -> {}: {} hops, distance {} in {:.1}ms",
            far_node,
            route.hops(),
            route.total_distance(),
            elapsed.as_secs_f64() * 1000.0
        ),
        Ok(PathOutcome::Unreachable { .. }) => println!(
            "Shortest path 0 -> {}: unreachable ({:.1}ms)",
            far_node,
            elapsed.as_secs_f64() * 1000.0
        ),
        Err(e) => println!("Shortest path 0 -> {}: {}", far_node, e),
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators - all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
    /// Corridor length in metres, 1..=30.
    fn weight(&mut self) -> f64 {
        (self.next(30) + 1) as f64
    }
}

/// Generators only produce distinct endpoints and finite positive weights.
fn connect(graph: &mut Graph<u64>, a: u64, b: u64, weight: f64) {
    if a != b {
        graph
            .add_edge(a, b, weight)
            .expect("generator weights are valid");
    }
}

fn with_vertices(node_count: u64, edges_per_vertex: u64) -> Graph<u64> {
    let mut graph = Graph::with_capacity(node_count as usize, (node_count * edges_per_vertex) as usize);
    for i in 0..node_count {
        graph.add_vertex(i);
    }
    graph
}

/// Building floors: each floor is a square corridor grid, floors are joined
/// by a handful of stairwells at fixed grid positions.
fn gen_floors(node_count: u64) -> Graph<u64> {
    let floors = 10u64.min(node_count / 4).max(1);
    let per_floor = node_count / floors;
    let side = (per_floor as f64).sqrt().floor().max(1.0) as u64;
    let cells = side * side;
    let mut graph = with_vertices(node_count, 2);
    let mut rng = FastRng::new(4242);

    for floor in 0..floors {
        let base = floor * cells;
        for r in 0..side {
            for c in 0..side {
                let id = base + r * side + c;
                if c + 1 < side {
                    connect(&mut graph, id, id + 1, rng.weight());
                }
                if r + 1 < side {
                    connect(&mut graph, id, id + side, rng.weight());
                }
            }
        }
        if floor > 0 {
            for stair in [0, side - 1, cells - side, cells - 1] {
                connect(&mut graph, base - cells + stair, base + stair, 8.0);
            }
        }
    }

    // Leftover vertices hang off the top floor as a service corridor
    let used = floors * cells;
    for id in used..node_count {
        let prev = if id == used { used - 1 } else { id - 1 };
        connect(&mut graph, prev, id, rng.weight());
    }

    graph
}

/// L-system fractal tree: deep branching with self-similar structure.
///
/// Each vertex spawns three children. Produces deep paths (log depth)
/// with exponential width.
fn gen_lsystem(node_count: u64) -> Graph<u64> {
    let mut graph = with_vertices(node_count, 1);
    let mut rng = FastRng::new(42);

    let branching = 3u64;
    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                let child = next_id;
                next_id += 1;
                connect(&mut graph, parent, child, rng.weight());
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }

    graph
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Start with each vertex connected to K nearest neighbors on a ring,
/// then rewire each edge with probability p.
fn gen_small_world(node_count: u64) -> Graph<u64> {
    let k = 5u64;
    let p = 0.05f64;
    let mut graph = with_vertices(node_count, k);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            let w = rng.weight();
            if rng.next_f64() < p {
                let rewired = rng.next(node_count);
                connect(&mut graph, i, if rewired != i { rewired } else { neighbor }, w);
            } else {
                connect(&mut graph, i, neighbor, w);
            }
        }
    }

    graph
}

/// Erdos-Renyi: uniform random edges, ~5 per vertex on average.
/// Sparse enough that a few vertices usually stay unreachable.
fn gen_random(node_count: u64) -> Graph<u64> {
    let target_edges = node_count * 5 / 2;
    let mut graph = with_vertices(node_count, 3);
    let mut rng = FastRng::new(54321);

    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        let w = rng.weight();
        connect(&mut graph, from, to, w);
    }

    graph
}

/// Barbell: two dense clusters connected by a single thin bridge.
///
/// Worst case for "find path through bottleneck". The bridge corridors are
/// long, so every cross-cluster route pays for them.
fn gen_barbell(node_count: u64) -> Graph<u64> {
    let bridge_len = 10u64;
    let cluster = (node_count - bridge_len) / 2;
    let mut graph = with_vertices(node_count, 10);
    let mut rng = FastRng::new(99999);

    let mut densify = |graph: &mut Graph<u64>, base: u64| {
        for i in 0..cluster {
            for _ in 0..10u64.min(cluster - 1) {
                let target = rng.next(cluster);
                let w = rng.weight();
                connect(graph, base + i, base + target, w);
            }
        }
    };

    densify(&mut graph, 0);

    let bridge_start = cluster;
    for i in 0..bridge_len {
        let id = bridge_start + i;
        connect(&mut graph, id - 1, id, 50.0);
    }

    let b_start = bridge_start + bridge_len;
    connect(&mut graph, b_start - 1, b_start, 50.0);
    densify(&mut graph, b_start);

    // Any odd leftover vertex joins cluster B
    for id in (b_start + cluster)..node_count {
        connect(&mut graph, id - 1, id, 1.0);
    }

    graph
}

/// DLA (Diffusion-Limited Aggregation): organic branching growth.
///
/// Each new vertex attaches to a random recent "surface" vertex, with
/// occasional long-range shortcuts that create loops.
fn gen_dla(node_count: u64) -> Graph<u64> {
    let mut graph = with_vertices(node_count, 2);
    let mut rng = FastRng::new(77777);

    let mut surface: VecDeque<u64> = VecDeque::with_capacity(10001);
    surface.push_back(0);
    let surface_max = 10000usize;

    for new_node in 1..node_count {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        let w = rng.weight();
        connect(&mut graph, new_node, attach_to, w);

        // 10% chance of a second connection (creates loops / shortcuts)
        if rng.next(10) == 0 && new_node > 1 {
            let other = rng.next(new_node);
            if other != attach_to {
                let w = rng.weight();
                connect(&mut graph, new_node, other, w);
            }
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    graph
}
