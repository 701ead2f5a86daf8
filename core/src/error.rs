use thiserror::Error;

/// Errors raised by graph population and shortest-path queries.
///
/// Vertex identifiers are carried in their `Debug` form so the error type
/// stays independent of the graph's vertex type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A start or end vertex was never registered with `add_vertex`.
    #[error("vertex {0} is not in the graph")]
    InvalidVertex(String),

    /// Edge weights must be finite and non-negative.
    #[error("invalid weight {weight} on edge {from} -- {to}: weights must be finite and non-negative")]
    InvalidWeight { from: String, to: String, weight: f64 },

    /// Self-loop rejected under `SelfLoopPolicy::Reject`.
    #[error("self-loop on vertex {0} rejected")]
    SelfLoop(String),

    /// A path distance exceeded the range of `f64`.
    #[error("distance to vertex {0} overflows f64")]
    DistanceOverflow(String),
}

/// Errors reading from or writing to a graph store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but its contents are unusable.
    #[error("malformed store document: {0}")]
    Format(String),
}

/// Errors populating a graph from a store.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("rejected edge record: {0}")]
    Graph(#[from] GraphError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown queue strategy '{0}' (expected binary_heap or linear_scan)")]
    UnknownStrategy(String),

    #[error("unknown self-loop policy '{0}' (expected ignore or reject)")]
    UnknownSelfLoopPolicy(String),

    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}
