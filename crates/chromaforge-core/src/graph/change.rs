//! Structural graph edits.

use super::VertexId;

/// A single structural edit, applied with [`super::Graph::apply_changes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum GraphChange {
    AddVertex(VertexId),
    RemoveVertex(VertexId),
    AddEdge(VertexId, VertexId),
    RemoveEdge(VertexId, VertexId),
}

impl GraphChange {
    pub fn add_vertex(v: impl Into<VertexId>) -> Self {
        GraphChange::AddVertex(v.into())
    }

    pub fn remove_vertex(v: impl Into<VertexId>) -> Self {
        GraphChange::RemoveVertex(v.into())
    }

    pub fn add_edge(u: impl Into<VertexId>, v: impl Into<VertexId>) -> Self {
        GraphChange::AddEdge(u.into(), v.into())
    }

    pub fn remove_edge(u: impl Into<VertexId>, v: impl Into<VertexId>) -> Self {
        GraphChange::RemoveEdge(u.into(), v.into())
    }

    /// Returns true if the change removes topology.
    pub fn is_removal(&self) -> bool {
        matches!(
            self,
            GraphChange::RemoveVertex(_) | GraphChange::RemoveEdge(..)
        )
    }
}
