//! Session owning a graph, its constraints and a solver.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chromaforge_config::{ColoringConfig, SolveOptions, StrategyKind};
use chromaforge_core::{
    Color, Coloring, ColoringError, ConstraintManager, ConstraintSet, Graph, GraphChange,
    GraphSnapshot, Result, VertexId,
};
use chromaforge_solver::{ColoringSolver, SolveStatistics};
use tracing::debug;

/// Serializable copy of a session's graph and constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    pub graph: GraphSnapshot,
    pub constraints: ConstraintSet,
}

/// A graph, its constraints and a solver kept in sync.
///
/// Every mutation goes through the session, which notifies the solver so a
/// stored coloring is never reported valid after the graph or constraints
/// changed. Re-solving is always explicit.
///
/// # Example
///
/// ```
/// use chromaforge::prelude::*;
///
/// let mut session = ColoringSession::new();
/// for v in 1..=4 {
///     session.add_vertex(v);
/// }
/// session.add_edge(1, 2).unwrap();
/// session.add_edge(2, 3).unwrap();
/// session.add_edge(3, 4).unwrap();
/// session.fix_color(1, 1).unwrap();
/// session.exclude_color(4, 1).unwrap();
///
/// session.solve(StrategyKind::Greedy, &SolveOptions::default()).unwrap();
/// assert_eq!(session.color(1), Some(1));
/// assert_ne!(session.color(4), Some(1));
/// assert!(session.is_valid_coloring());
///
/// session.add_edge(1, 3).unwrap();
/// assert!(!session.is_valid_coloring());
/// ```
#[derive(Debug, Default)]
pub struct ColoringSession {
    graph: Graph,
    constraints: ConstraintManager,
    solver: ColoringSolver,
    config: ColoringConfig,
}

impl ColoringSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session whose `*_default` operations follow the config.
    pub fn with_config(config: ColoringConfig) -> Self {
        Self {
            solver: ColoringSolver::new().with_optimizer(config.optimizer.clone()),
            config,
            ..Self::default()
        }
    }

    /// Wraps an existing graph and constraint set.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if a constraint names a vertex missing from the graph.
    pub fn from_parts(graph: Graph, constraints: ConstraintManager) -> Result<Self> {
        check_constrained_vertices(&graph, &constraints)?;
        Ok(Self {
            graph,
            constraints,
            ..Self::default()
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn constraints(&self) -> &ConstraintManager {
        &self.constraints
    }

    pub fn solver(&self) -> &ColoringSolver {
        &self.solver
    }

    pub fn config(&self) -> &ColoringConfig {
        &self.config
    }

    pub fn set_terminate_flag(&mut self, flag: Option<Arc<AtomicBool>>) {
        self.solver.set_terminate_flag(flag);
    }

    /// Adds a vertex. Returns false if it already existed.
    pub fn add_vertex(&mut self, vertex: impl Into<VertexId>) -> bool {
        let vertex = vertex.into();
        let added = self.graph.add_vertex(vertex);
        if added {
            self.solver.on_vertex_added(vertex);
        }
        added
    }

    /// Removes a vertex, its incident edges and its constraints.
    pub fn remove_vertex(&mut self, vertex: impl Into<VertexId>) -> Result<()> {
        let vertex = vertex.into();
        self.graph.remove_vertex(vertex)?;
        self.solver.on_vertex_removed(&mut self.constraints, vertex);
        Ok(())
    }

    /// Adds an edge. Returns false if it already existed.
    pub fn add_edge(&mut self, u: impl Into<VertexId>, v: impl Into<VertexId>) -> Result<bool> {
        let (u, v) = (u.into(), v.into());
        let added = self.graph.add_edge(u, v)?;
        if added {
            self.solver.on_edge_added(u, v);
        }
        Ok(added)
    }

    pub fn remove_edge(&mut self, u: impl Into<VertexId>, v: impl Into<VertexId>) -> Result<()> {
        let (u, v) = (u.into(), v.into());
        self.graph.remove_edge(u, v)?;
        self.solver.on_edge_removed(u, v);
        Ok(())
    }

    /// Applies a batch of changes atomically and notifies the solver of
    /// each change that took effect.
    ///
    /// On failure nothing changes, including constraints.
    pub fn apply_changes(&mut self, changes: &[GraphChange]) -> Result<()> {
        let applied = self.graph.apply_changes(changes)?;
        debug!(
            event = "changes_applied",
            count = changes.len(),
            effective = applied.len()
        );
        for change in applied {
            match change {
                GraphChange::AddVertex(v) => self.solver.on_vertex_added(v),
                GraphChange::RemoveVertex(v) => {
                    self.solver.on_vertex_removed(&mut self.constraints, v)
                }
                GraphChange::AddEdge(u, v) => self.solver.on_edge_added(u, v),
                GraphChange::RemoveEdge(u, v) => self.solver.on_edge_removed(u, v),
            }
        }
        Ok(())
    }

    /// Fixes a vertex to a color.
    ///
    /// # Errors
    ///
    /// - `VertexNotFound` if the vertex is not in the graph
    /// - `InvalidColor` / `ConflictingConstraint` from the constraint manager
    pub fn fix_color(&mut self, vertex: impl Into<VertexId>, color: Color) -> Result<()> {
        let vertex = self.require_vertex(vertex)?;
        self.constraints.fix_color(vertex, color)?;
        self.solver.on_constraint_changed(vertex);
        Ok(())
    }

    /// Removes the fixed color of a vertex, returning it.
    pub fn unfix_color(&mut self, vertex: impl Into<VertexId>) -> Result<Option<Color>> {
        let vertex = self.require_vertex(vertex)?;
        let previous = self.constraints.unfix_color(vertex);
        if previous.is_some() {
            self.solver.on_constraint_changed(vertex);
        }
        Ok(previous)
    }

    /// Forbids a color for a vertex.
    pub fn exclude_color(&mut self, vertex: impl Into<VertexId>, color: Color) -> Result<()> {
        let vertex = self.require_vertex(vertex)?;
        self.constraints.exclude_color(vertex, color)?;
        self.solver.on_constraint_changed(vertex);
        Ok(())
    }

    /// Drops every constraint of a vertex. Returns whether any existed.
    pub fn clear_constraints(&mut self, vertex: impl Into<VertexId>) -> Result<bool> {
        let vertex = self.require_vertex(vertex)?;
        let cleared = self.constraints.clear_constraints(vertex);
        if cleared {
            self.solver.on_constraint_changed(vertex);
        }
        Ok(cleared)
    }

    pub fn solve(&mut self, kind: StrategyKind, options: &SolveOptions) -> Result<Coloring> {
        self.solver
            .solve(&mut self.graph, &self.constraints, kind, options)
    }

    pub fn solve_named(&mut self, name: &str, options: &SolveOptions) -> Result<Coloring> {
        self.solver
            .solve_named(&mut self.graph, &self.constraints, name, options)
    }

    pub fn optimize(&mut self, kind: StrategyKind, options: &SolveOptions) -> Result<Coloring> {
        self.solver
            .optimize(&mut self.graph, &self.constraints, kind, options)
    }

    /// Solves with the configured strategy and options.
    pub fn solve_default(&mut self) -> Result<Coloring> {
        let (kind, options) = (self.config.strategy, self.config.options.clone());
        self.solve(kind, &options)
    }

    /// Optimizes with the configured strategy and options.
    pub fn optimize_default(&mut self) -> Result<Coloring> {
        let (kind, options) = (self.config.strategy, self.config.options.clone());
        self.optimize(kind, &options)
    }

    /// Stored color of a vertex, `None` if uncolored or unknown.
    pub fn color(&self, vertex: impl Into<VertexId>) -> Option<Color> {
        self.graph.color(vertex)
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> &[VertexId] {
        self.graph.vertices()
    }

    /// Returns true if the stored assignment is current and valid.
    pub fn is_valid_coloring(&self) -> bool {
        self.solver
            .is_valid_coloring(&self.graph, &self.constraints)
    }

    /// The last successful coloring.
    ///
    /// # Errors
    ///
    /// `StaleColoringUsed` if the session changed since it was computed.
    pub fn last_coloring(&self) -> Result<Option<&Coloring>> {
        self.solver.last_coloring(&self.graph, &self.constraints)
    }

    pub fn statistics(&self) -> Option<&SolveStatistics> {
        self.solver.statistics()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            graph: self.graph.snapshot(),
            constraints: self.constraints.constraint_set().clone(),
        }
    }

    /// Replaces the graph and constraints with a snapshot.
    ///
    /// The snapshot is fully validated first; on error the session is
    /// unchanged. On success the stored coloring is invalidated.
    pub fn restore(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        let graph = Graph::from_snapshot(&snapshot.graph)?;
        let mut constraints = self.constraints.clone();
        constraints.restore(snapshot.constraints.clone())?;
        check_constrained_vertices(&graph, &constraints)?;

        self.graph = graph;
        self.constraints = constraints;
        self.solver.invalidate();
        debug!(
            event = "session_restored",
            vertex_count = self.graph.vertex_count(),
            edge_count = self.graph.edge_count(),
        );
        Ok(())
    }

    fn require_vertex(&self, vertex: impl Into<VertexId>) -> Result<VertexId> {
        let vertex = vertex.into();
        if self.graph.contains_vertex(vertex) {
            Ok(vertex)
        } else {
            Err(ColoringError::VertexNotFound(vertex))
        }
    }
}

fn check_constrained_vertices(graph: &Graph, constraints: &ConstraintManager) -> Result<()> {
    match constraints
        .constrained_vertices()
        .into_iter()
        .find(|v| !graph.contains_vertex(*v))
    {
        Some(missing) => Err(ColoringError::VertexNotFound(missing)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> ColoringSession {
        let mut session = ColoringSession::new();
        for v in 1..=4 {
            session.add_vertex(v);
        }
        for (u, v) in [(1, 2), (2, 3), (3, 4), (4, 1)] {
            session.add_edge(u, v).unwrap();
        }
        session
    }

    #[test]
    fn test_constraint_on_missing_vertex() {
        let mut session = square();
        assert_eq!(
            session.fix_color(9, 1),
            Err(ColoringError::VertexNotFound(VertexId(9)))
        );
        assert_eq!(
            session.exclude_color(9, 1),
            Err(ColoringError::VertexNotFound(VertexId(9)))
        );
        assert!(session.constraints().is_empty());
    }

    #[test]
    fn test_remove_vertex_clears_constraints() {
        let mut session = square();
        session.fix_color(2, 2).unwrap();
        session.remove_vertex(2).unwrap();
        assert_eq!(session.constraints().fixed_color(2), None);
        assert!(!session.graph().contains_edge(1, 2));
    }

    #[test]
    fn test_duplicate_add_does_not_invalidate() {
        let mut session = square();
        session
            .solve(StrategyKind::Greedy, &SolveOptions::default())
            .unwrap();
        assert!(!session.add_vertex(1));
        assert!(!session.add_edge(2, 1).unwrap());
        assert!(session.is_valid_coloring());
    }

    #[test]
    fn test_failed_batch_keeps_session() {
        let mut session = square();
        session
            .solve(StrategyKind::Greedy, &SolveOptions::default())
            .unwrap();
        let result = session.apply_changes(&[
            GraphChange::add_vertex(5),
            GraphChange::add_edge(5, 1),
            GraphChange::add_edge(5, 5),
        ]);
        assert_eq!(result, Err(ColoringError::SelfLoopRejected(VertexId(5))));
        assert!(!session.graph().contains_vertex(5));
        assert!(session.is_valid_coloring());
    }

    #[test]
    fn test_duplicate_batch_does_not_invalidate() {
        let mut session = square();
        session
            .solve(StrategyKind::Greedy, &SolveOptions::default())
            .unwrap();
        session
            .apply_changes(&[GraphChange::add_vertex(1), GraphChange::add_edge(2, 1)])
            .unwrap();
        assert!(session.is_valid_coloring());
        assert!(session.last_coloring().is_ok());
    }

    #[test]
    fn test_batch_invalidates() {
        let mut session = square();
        session
            .solve(StrategyKind::Greedy, &SolveOptions::default())
            .unwrap();
        session
            .apply_changes(&[GraphChange::add_edge(1, 3)])
            .unwrap();
        assert!(!session.is_valid_coloring());
        assert_eq!(session.last_coloring(), Err(ColoringError::StaleColoringUsed));
    }

    #[test]
    fn test_snapshot_restore() {
        let mut session = square();
        session.exclude_color(3, 1).unwrap();
        session
            .solve(StrategyKind::Greedy, &SolveOptions::default())
            .unwrap();
        let snapshot = session.snapshot();

        session.remove_vertex(3).unwrap();
        session.add_vertex(7);
        session.restore(&snapshot).unwrap();

        assert_eq!(session.snapshot(), snapshot);
        assert!(session.constraints().is_excluded(3, 1));
        assert!(!session.graph().contains_vertex(7));
        assert!(!session.is_valid_coloring());

        session
            .solve(StrategyKind::Greedy, &SolveOptions::default())
            .unwrap();
        assert!(session.is_valid_coloring());
    }

    #[test]
    fn test_config_defaults_drive_session() {
        let config = ColoringConfig::new()
            .with_strategy(StrategyKind::Backtracking)
            .with_options(SolveOptions::new().with_max_colors(2));
        let mut session = ColoringSession::with_config(config);
        for v in 1..=3 {
            session.add_vertex(v);
        }
        session.add_edge(1, 2).unwrap();
        session.add_edge(2, 3).unwrap();
        session.add_edge(1, 3).unwrap();

        assert_eq!(
            session.solve_default(),
            Err(ColoringError::NoSolutionWithinBudget { budget: 2 })
        );
        assert_eq!(
            session.statistics().and_then(|s| s.strategy),
            Some(StrategyKind::Backtracking)
        );
    }
}
