//! In-memory graph snapshots.

use super::{Graph, VertexId};
use crate::color::Color;
use crate::error::Result;

/// A plain-data copy of a [`Graph`], including its stored coloring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphSnapshot {
    pub vertices: Vec<VertexId>,
    pub edges: Vec<(VertexId, VertexId)>,
    pub colors: Vec<(VertexId, Color)>,
}

impl Graph {
    /// Captures the current topology and stored coloring.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            vertices: self.vertices().to_vec(),
            edges: self.edges().collect(),
            colors: self
                .assignment()
                .filter_map(|(v, c)| c.map(|c| (v, c)))
                .collect(),
        }
    }

    /// Rebuilds a graph from a snapshot, validating every edge and color.
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Result<Self> {
        let mut graph = Graph::with_capacity(snapshot.vertices.len());
        for &v in &snapshot.vertices {
            graph.add_vertex(v);
        }
        for &(u, v) in &snapshot.edges {
            graph.add_edge(u, v)?;
        }
        for &(v, c) in &snapshot.colors {
            graph.set_color(v, Some(c))?;
        }
        Ok(graph)
    }
}
