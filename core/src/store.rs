//! Graph stores: the external source of vertex identifiers and edge triples.
//!
//! The loader only needs the two listings; how a store persists them is its
//! own business. Records may come back in any order.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::graph::{VertexId, Weight};

/// One undirected edge as persisted by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord<V> {
    pub from: V,
    pub to: V,
    pub weight: Weight,
}

impl<V> EdgeRecord<V> {
    pub fn new(from: V, to: V, weight: Weight) -> Self {
        Self { from, to, weight }
    }
}

/// Source of raw graph data.
pub trait GraphStore {
    type Vertex: VertexId;

    fn list_vertices(&self) -> Result<Vec<Self::Vertex>, StoreError>;

    fn list_edges(&self) -> Result<Vec<EdgeRecord<Self::Vertex>>, StoreError>;
}

/// Store held entirely in memory; listings return records in insertion
/// order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore<V> {
    vertices: Vec<V>,
    edges: Vec<EdgeRecord<V>>,
}

impl<V: VertexId> MemoryStore<V> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn add_vertex(&mut self, v: V) {
        self.vertices.push(v);
    }

    pub fn add_edge(&mut self, from: V, to: V, weight: Weight) {
        self.edges.push(EdgeRecord::new(from, to, weight));
    }
}

impl<V: VertexId> GraphStore for MemoryStore<V> {
    type Vertex = V;

    fn list_vertices(&self) -> Result<Vec<V>, StoreError> {
        Ok(self.vertices.clone())
    }

    fn list_edges(&self) -> Result<Vec<EdgeRecord<V>>, StoreError> {
        Ok(self.edges.clone())
    }
}

/// On-disk layout of a [`JsonStore`]:
///
/// ```json
/// {
///   "vertices": ["Main Entrance", "ECG-15"],
///   "edges": [{"from": "Main Entrance", "to": "ECG-15", "weight": 5.0}]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreDocument {
    #[serde(default)]
    pub vertices: Vec<String>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord<String>>,
}

/// Store backed by a JSON document with string vertex identifiers.
#[derive(Debug, Clone, Default)]
pub struct JsonStore {
    document: StoreDocument,
}

impl JsonStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and validate a store document from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let document: StoreDocument = serde_json::from_str(&text)?;
        Self::from_document(document)
    }

    pub fn from_document(document: StoreDocument) -> Result<Self, StoreError> {
        if let Some(pos) = document.vertices.iter().position(|v| v.trim().is_empty()) {
            return Err(StoreError::Format(format!("vertex #{} has an empty identifier", pos)));
        }
        if let Some(pos) = document
            .edges
            .iter()
            .position(|e| e.from.trim().is_empty() || e.to.trim().is_empty())
        {
            return Err(StoreError::Format(format!("edge #{} has an empty endpoint", pos)));
        }
        Ok(Self { document })
    }

    pub fn document(&self) -> &StoreDocument {
        &self.document
    }

    pub fn add_vertex(&mut self, v: impl Into<String>) {
        self.document.vertices.push(v.into());
    }

    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>, weight: Weight) {
        self.document
            .edges
            .push(EdgeRecord::new(from.into(), to.into(), weight));
    }

    /// Write the document as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&self.document)?;
        std::fs::write(path.as_ref(), text)?;
        Ok(())
    }
}

impl GraphStore for JsonStore {
    type Vertex = String;

    fn list_vertices(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.document.vertices.clone())
    }

    fn list_edges(&self) -> Result<Vec<EdgeRecord<String>>, StoreError> {
        Ok(self.document.edges.clone())
    }
}
