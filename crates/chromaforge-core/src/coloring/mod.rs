//! Materialized coloring results and their verification.

#[cfg(test)]
mod tests;

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::color::{validate_color, Color};
use crate::constraint::ConstraintManager;
use crate::error::Result;
use crate::graph::{Graph, VertexId};

/// A single broken invariant found by [`Coloring::violations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A graph vertex has no color.
    Uncolored(VertexId),
    /// The coloring mentions a vertex that is not in the graph.
    UnknownVertex(VertexId),
    /// Two adjacent vertices share a color.
    AdjacentConflict {
        u: VertexId,
        v: VertexId,
        color: Color,
    },
    /// A fixed vertex carries a different color.
    FixedMismatch {
        vertex: VertexId,
        expected: Color,
        actual: Color,
    },
    /// A vertex carries one of its excluded colors.
    ExcludedColor { vertex: VertexId, color: Color },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Uncolored(v) => write!(f, "vertex {v} is uncolored"),
            Violation::UnknownVertex(v) => write!(f, "vertex {v} is not in the graph"),
            Violation::AdjacentConflict { u, v, color } => {
                write!(f, "adjacent vertices {u} and {v} share color {color}")
            }
            Violation::FixedMismatch {
                vertex,
                expected,
                actual,
            } => write!(f, "vertex {vertex} is fixed to {expected} but has {actual}"),
            Violation::ExcludedColor { vertex, color } => {
                write!(f, "vertex {vertex} has excluded color {color}")
            }
        }
    }
}

/// A vertex-to-color mapping produced by a solve.
///
/// Records the graph and constraint revisions it was computed against so
/// callers can tell when a later mutation made it stale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coloring {
    colors: HashMap<VertexId, Color>,
    graph_revision: u64,
    constraint_revision: u64,
}

impl Coloring {
    /// Creates an empty coloring bound to the given revisions.
    pub fn new(graph_revision: u64, constraint_revision: u64) -> Self {
        Self {
            colors: HashMap::new(),
            graph_revision,
            constraint_revision,
        }
    }

    /// Creates an empty coloring bound to the current state of a session.
    pub fn for_state(graph: &Graph, constraints: &ConstraintManager) -> Self {
        Self::new(graph.revision(), constraints.revision())
    }

    /// Builds a coloring from explicit assignments, bound to the current
    /// revisions of `graph` and `constraints`.
    pub fn from_assignments(
        graph: &Graph,
        constraints: &ConstraintManager,
        assignments: impl IntoIterator<Item = (VertexId, Color)>,
    ) -> Self {
        let mut coloring = Self::for_state(graph, constraints);
        coloring.colors.extend(assignments);
        coloring
    }

    /// Reads the graph's stored assignment. Uncolored vertices are omitted.
    pub fn from_graph(graph: &Graph, constraints: &ConstraintManager) -> Self {
        let mut coloring = Self::for_state(graph, constraints);
        for (vertex, color) in graph.assignment() {
            if let Some(color) = color {
                coloring.insert(vertex, color);
            }
        }
        coloring
    }

    pub fn insert(&mut self, vertex: VertexId, color: Color) -> Option<Color> {
        self.colors.insert(vertex, color)
    }

    pub fn get(&self, vertex: impl Into<VertexId>) -> Option<Color> {
        self.colors.get(&vertex.into()).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, Color)> + '_ {
        self.colors.iter().map(|(v, c)| (*v, *c))
    }

    /// Distinct colors used.
    pub fn used_colors(&self) -> BTreeSet<Color> {
        self.colors.values().copied().collect()
    }

    /// Number of distinct colors used.
    pub fn color_count(&self) -> usize {
        self.used_colors().len()
    }

    /// Highest color used, 0 when empty.
    pub fn max_color(&self) -> Color {
        self.colors.values().copied().max().unwrap_or(0)
    }

    pub fn graph_revision(&self) -> u64 {
        self.graph_revision
    }

    pub fn constraint_revision(&self) -> u64 {
        self.constraint_revision
    }

    /// Returns true if the graph or constraints changed since this coloring
    /// was computed.
    pub fn is_stale(&self, graph: &Graph, constraints: &ConstraintManager) -> bool {
        self.graph_revision != graph.revision()
            || self.constraint_revision != constraints.revision()
    }

    /// Lists every broken invariant against the given graph and constraints.
    ///
    /// Adjacency conflicts are reported once per edge.
    pub fn violations(&self, graph: &Graph, constraints: &ConstraintManager) -> Vec<Violation> {
        let mut violations = Vec::new();

        let mut unknown: Vec<VertexId> = self
            .colors
            .keys()
            .filter(|v| !graph.contains_vertex(**v))
            .copied()
            .collect();
        unknown.sort();
        violations.extend(unknown.into_iter().map(Violation::UnknownVertex));

        for &vertex in graph.vertices() {
            let Some(color) = self.get(vertex) else {
                violations.push(Violation::Uncolored(vertex));
                continue;
            };
            if let Some(expected) = constraints.fixed_color(vertex) {
                if expected != color {
                    violations.push(Violation::FixedMismatch {
                        vertex,
                        expected,
                        actual: color,
                    });
                }
            } else if constraints.is_excluded(vertex, color) {
                violations.push(Violation::ExcludedColor { vertex, color });
            }
        }

        for (u, v) in graph.edges() {
            if let (Some(cu), Some(cv)) = (self.get(u), self.get(v)) {
                if cu == cv {
                    violations.push(Violation::AdjacentConflict { u, v, color: cu });
                }
            }
        }

        violations
    }

    /// Returns true if this is a complete valid coloring of the graph.
    pub fn is_valid_for(&self, graph: &Graph, constraints: &ConstraintManager) -> bool {
        self.violations(graph, constraints).is_empty()
    }

    /// Writes this coloring onto the graph's stored assignment.
    ///
    /// Vertices missing from the coloring end up uncolored.
    pub fn apply_to(&self, graph: &mut Graph) -> Result<()> {
        for color in self.colors.values() {
            validate_color(*color)?;
        }
        let vertices = graph.vertices().to_vec();
        for vertex in vertices {
            graph.set_color(vertex, self.get(vertex))?;
        }
        Ok(())
    }
}

/// Collects assignments into a coloring bound to revision 0.
///
/// Such a coloring is stale against any graph that has seen a mutation, so
/// [`Coloring::is_stale`] reports it and optimizer entry points reject it.
/// Use [`Coloring::from_assignments`] to bind it to the current state.
impl FromIterator<(VertexId, Color)> for Coloring {
    fn from_iter<I: IntoIterator<Item = (VertexId, Color)>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().collect(),
            graph_revision: 0,
            constraint_revision: 0,
        }
    }
}
