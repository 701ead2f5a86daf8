use std::time::Instant;

use crate::config::EngineConfig;
use crate::error::LoadError;
use crate::graph::Graph;
use crate::store::GraphStore;

/// Counters recorded while populating a graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadStats {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub skipped_self_loops: usize,
    pub load_time_ms: f64,
}

/// A populated graph plus the statistics of the load that built it.
#[derive(Debug, Clone)]
pub struct LoadedGraph<V> {
    pub graph: Graph<V>,
    pub stats: LoadStats,
}

/// Build a graph from everything `store` lists.
///
/// Vertices and edges are independent listings, so the order in which a
/// store returns them does not matter. The first rejected edge aborts the
/// load.
pub fn load_graph<S: GraphStore>(
    store: &S,
    config: &EngineConfig,
) -> Result<LoadedGraph<S::Vertex>, LoadError> {
    let start = Instant::now();

    let vertices = store.list_vertices()?;
    let edges = store.list_edges()?;

    let mut graph = Graph::with_capacity(vertices.len(), edges.len())
        .with_self_loop_policy(config.self_loops);

    for v in vertices {
        graph.add_vertex(v);
    }

    let mut skipped_self_loops = 0;
    for record in edges {
        let self_loop = record.from == record.to;
        graph.add_edge(record.from, record.to, record.weight)?;
        if self_loop {
            skipped_self_loops += 1;
        }
    }

    let stats = LoadStats {
        vertex_count: graph.vertex_count(),
        edge_count: graph.edge_count(),
        skipped_self_loops,
        load_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    };

    tracing::info!(
        vertices = stats.vertex_count,
        edges = stats.edge_count,
        skipped_self_loops,
        load_time_ms = stats.load_time_ms,
        "graph loaded"
    );

    Ok(LoadedGraph { graph, stats })
}
