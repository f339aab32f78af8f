//! Undirected graph with a stored color assignment.
//!
//! The graph owns its vertex set, a symmetric adjacency relation and the
//! last-known-good coloring. It knows nothing about constraints or
//! strategies; those live in [`crate::constraint`] and the solver crate.

mod change;
mod snapshot;


use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::color::{validate_color, Color};
use crate::error::{ColoringError, Result};

pub use change::GraphChange;
pub use snapshot::GraphSnapshot;

/// Identifier of a vertex, unique within a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct VertexId(pub u64);

impl VertexId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for VertexId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
struct VertexEntry {
    neighbors: BTreeSet<VertexId>,
    color: Option<Color>,
}

/// An undirected simple graph.
///
/// Vertices iterate in insertion order. Every structural change that
/// modifies the topology bumps [`Graph::revision`], which lets colorings
/// detect that they were computed against an older graph.
///
/// # Example
///
/// ```
/// use chromaforge_core::Graph;
///
/// let mut graph = Graph::new();
/// graph.add_vertex(1);
/// graph.add_vertex(2);
/// graph.add_edge(1, 2).unwrap();
///
/// assert_eq!(graph.degree(1).unwrap(), 1);
/// assert!(graph.add_edge(1, 1).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    order: Vec<VertexId>,
    entries: HashMap<VertexId, VertexEntry>,
    edge_count: usize,
    revision: u64,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with room for `vertices` vertices.
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            order: Vec::with_capacity(vertices),
            entries: HashMap::with_capacity(vertices),
            edge_count: 0,
            revision: 0,
        }
    }

    /// Adds a vertex. Returns false if it already existed.
    pub fn add_vertex(&mut self, id: impl Into<VertexId>) -> bool {
        let id = id.into();
        if self.entries.contains_key(&id) {
            return false;
        }
        self.entries.insert(id, VertexEntry::default());
        self.order.push(id);
        self.revision += 1;
        true
    }

    /// Removes a vertex together with its incident edges.
    ///
    /// Constraint entries for the vertex are not touched here; the solver
    /// layer clears them.
    pub fn remove_vertex(&mut self, id: impl Into<VertexId>) -> Result<()> {
        let id = id.into();
        let entry = self
            .entries
            .remove(&id)
            .ok_or(ColoringError::VertexNotFound(id))?;

        for neighbor in &entry.neighbors {
            if let Some(n) = self.entries.get_mut(neighbor) {
                n.neighbors.remove(&id);
            }
        }
        self.edge_count -= entry.neighbors.len();
        self.order.retain(|&v| v != id);
        self.revision += 1;
        Ok(())
    }

    /// Adds an undirected edge. Returns false if it already existed.
    pub fn add_edge(&mut self, u: impl Into<VertexId>, v: impl Into<VertexId>) -> Result<bool> {
        let (u, v) = (u.into(), v.into());
        self.require_vertex(u)?;
        self.require_vertex(v)?;
        if u == v {
            return Err(ColoringError::SelfLoopRejected(u));
        }

        let inserted = self.entry_mut(u)?.neighbors.insert(v);
        if !inserted {
            return Ok(false);
        }
        self.entry_mut(v)?.neighbors.insert(u);
        self.edge_count += 1;
        self.revision += 1;
        Ok(true)
    }

    /// Removes an undirected edge.
    pub fn remove_edge(&mut self, u: impl Into<VertexId>, v: impl Into<VertexId>) -> Result<()> {
        let (u, v) = (u.into(), v.into());
        self.require_vertex(u)?;
        self.require_vertex(v)?;
        if !self.entry_mut(u)?.neighbors.remove(&v) {
            return Err(ColoringError::EdgeNotFound(u, v));
        }
        self.entry_mut(v)?.neighbors.remove(&u);
        self.edge_count -= 1;
        self.revision += 1;
        Ok(())
    }

    /// Returns the neighbors of a vertex, sorted by identifier.
    pub fn neighbors(&self, id: impl Into<VertexId>) -> Result<&BTreeSet<VertexId>> {
        let id = id.into();
        self.entries
            .get(&id)
            .map(|e| &e.neighbors)
            .ok_or(ColoringError::VertexNotFound(id))
    }

    pub fn degree(&self, id: impl Into<VertexId>) -> Result<usize> {
        self.neighbors(id).map(BTreeSet::len)
    }

    /// Sets or clears the stored color of a vertex.
    pub fn set_color(&mut self, id: impl Into<VertexId>, color: Option<Color>) -> Result<()> {
        let id = id.into();
        if let Some(c) = color {
            validate_color(c)?;
        }
        self.entry_mut(id)?.color = color;
        Ok(())
    }

    /// Returns the stored color, or `None` for uncolored or unknown vertices.
    pub fn color(&self, id: impl Into<VertexId>) -> Option<Color> {
        self.entries.get(&id.into()).and_then(|e| e.color)
    }

    /// Clears every stored color.
    pub fn clear_colors(&mut self) {
        for entry in self.entries.values_mut() {
            entry.color = None;
        }
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.order
    }

    /// Stored assignment in insertion order.
    pub fn assignment(&self) -> impl Iterator<Item = (VertexId, Option<Color>)> + '_ {
        self.order
            .iter()
            .map(move |v| (*v, self.entries.get(v).and_then(|e| e.color)))
    }

    /// Edges as `(u, v)` pairs with `u < v`, grouped by `u` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.order.iter().flat_map(move |&u| {
            self.entries
                .get(&u)
                .into_iter()
                .flat_map(|e| e.neighbors.iter())
                .filter(move |&&v| u < v)
                .map(move |&v| (u, v))
        })
    }

    pub fn contains_vertex(&self, id: impl Into<VertexId>) -> bool {
        self.entries.contains_key(&id.into())
    }

    pub fn contains_edge(&self, u: impl Into<VertexId>, v: impl Into<VertexId>) -> bool {
        let (u, v) = (u.into(), v.into());
        self.entries
            .get(&u)
            .is_some_and(|e| e.neighbors.contains(&v))
    }

    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Largest vertex degree, 0 for an empty graph.
    pub fn max_degree(&self) -> usize {
        self.entries
            .values()
            .map(|e| e.neighbors.len())
            .max()
            .unwrap_or(0)
    }

    /// Topology revision, bumped by every structural change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies a batch of changes atomically and returns the ones that
    /// changed the topology, in order.
    ///
    /// Either every change is applied or, on the first failure, the graph is
    /// left exactly as it was. Duplicate adds succeed but are not returned.
    pub fn apply_changes(&mut self, changes: &[GraphChange]) -> Result<Vec<GraphChange>> {
        let mut staged = self.clone();
        let mut applied = Vec::with_capacity(changes.len());
        for change in changes {
            if staged.apply_change(change)? {
                applied.push(*change);
            }
        }
        *self = staged;
        Ok(applied)
    }

    /// Applies a single change. Returns whether the topology changed.
    pub fn apply_change(&mut self, change: &GraphChange) -> Result<bool> {
        match *change {
            GraphChange::AddVertex(v) => Ok(self.add_vertex(v)),
            GraphChange::RemoveVertex(v) => self.remove_vertex(v).map(|_| true),
            GraphChange::AddEdge(u, v) => self.add_edge(u, v),
            GraphChange::RemoveEdge(u, v) => self.remove_edge(u, v).map(|_| true),
        }
    }

    fn require_vertex(&self, id: VertexId) -> Result<()> {
        if self.entries.contains_key(&id) {
            Ok(())
        } else {
            Err(ColoringError::VertexNotFound(id))
        }
    }

    fn entry_mut(&mut self, id: VertexId) -> Result<&mut VertexEntry> {
        self.entries
            .get_mut(&id)
            .ok_or(ColoringError::VertexNotFound(id))
    }
}
