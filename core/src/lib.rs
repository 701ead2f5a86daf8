//! wayfinder-core: In-memory weighted graph and shortest-path engine.
//!
//! A pure Rust library that holds an undirected weighted graph of named
//! locations (rooms, corridors, stairwells) and answers shortest-route
//! queries with Dijkstra's algorithm.
//!
//! Graph data comes from a [`GraphStore`]; [`load_graph`] populates a
//! [`Graph`] from one, after which the graph is read-only and any number of
//! [`compute_shortest_paths`] / [`shortest_path`] queries can run against it.

mod config;
mod dijkstra;
mod error;
mod graph;
mod load;
mod path;
mod store;

pub use config::{EngineConfig, QueueStrategy, SelfLoopPolicy, ENV_SELF_LOOPS, ENV_STRATEGY};
pub use dijkstra::{compute_shortest_paths, compute_shortest_paths_with, Distance, ShortestPaths};
pub use error::{ConfigError, GraphError, LoadError, StoreError};
pub use graph::{Graph, VertexId, Weight};
pub use load::{load_graph, LoadStats, LoadedGraph};
pub use path::{shortest_path, shortest_path_with, PathOutcome, PathStep, Route};
pub use store::{EdgeRecord, GraphStore, JsonStore, MemoryStore, StoreDocument};
