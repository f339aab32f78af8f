//! Solver orchestration and dynamic-update entry points.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chromaforge_config::{OptimizerConfig, SolveOptions, StrategyKind};
use chromaforge_core::{
    validate_color, Coloring, ColoringError, ConstraintManager, Graph, Result, VertexId,
};
use tracing::{debug, info};

use crate::optimizer::HeuristicOptimizer;
use crate::problem::ColoringProblem;
use crate::scope::SolveScope;
use crate::statistics::SolveStatistics;
use crate::strategy::{create_strategy, ColoringStrategy};

/// Drives strategies and keeps the last successful coloring.
///
/// The solver borrows the graph and constraints for one call at a time and
/// never re-solves on its own. Any topology or constraint change reported
/// through the `on_*` hooks, or detected through a revision mismatch, marks
/// the stored coloring stale until the next successful solve.
///
/// # Example
///
/// ```
/// use chromaforge_config::{SolveOptions, StrategyKind};
/// use chromaforge_core::{ConstraintManager, Graph};
/// use chromaforge_solver::ColoringSolver;
///
/// let mut graph = Graph::new();
/// for v in 1..=3 {
///     graph.add_vertex(v);
/// }
/// graph.add_edge(1, 2).unwrap();
/// graph.add_edge(2, 3).unwrap();
/// graph.add_edge(1, 3).unwrap();
/// let constraints = ConstraintManager::new();
///
/// let mut solver = ColoringSolver::new();
/// let coloring = solver
///     .solve(&mut graph, &constraints, StrategyKind::Greedy, &SolveOptions::default())
///     .unwrap();
/// assert_eq!(coloring.color_count(), 3);
/// assert!(solver.is_valid_coloring(&graph, &constraints));
///
/// graph.add_vertex(4);
/// solver.on_vertex_added(4);
/// assert!(!solver.is_valid_coloring(&graph, &constraints));
/// ```
#[derive(Debug, Default)]
pub struct ColoringSolver {
    optimizer: HeuristicOptimizer,
    last: Option<Coloring>,
    stale: bool,
    terminate_flag: Option<Arc<AtomicBool>>,
    statistics: Option<SolveStatistics>,
}

impl ColoringSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_optimizer(mut self, config: OptimizerConfig) -> Self {
        self.optimizer = HeuristicOptimizer::new(config);
        self
    }

    /// Stops any running solve once the flag is set.
    pub fn with_terminate_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_flag = Some(flag);
        self
    }

    pub fn set_terminate_flag(&mut self, flag: Option<Arc<AtomicBool>>) {
        self.terminate_flag = flag;
    }

    pub fn optimizer(&self) -> &HeuristicOptimizer {
        &self.optimizer
    }

    /// Runs one strategy and writes the result onto the graph.
    ///
    /// # Errors
    ///
    /// - `InvalidColor` if `options.max_colors` is `Some(0)`
    /// - any failure of the strategy; the stored coloring and the graph's
    ///   assignment are left untouched
    pub fn solve(
        &mut self,
        graph: &mut Graph,
        constraints: &ConstraintManager,
        kind: StrategyKind,
        options: &SolveOptions,
    ) -> Result<Coloring> {
        self.run(graph, constraints, kind, options, false)
    }

    /// Like [`solve`](Self::solve) with the strategy selected by name.
    ///
    /// # Errors
    ///
    /// `UnknownStrategy` if no strategy has that name.
    pub fn solve_named(
        &mut self,
        graph: &mut Graph,
        constraints: &ConstraintManager,
        name: &str,
        options: &SolveOptions,
    ) -> Result<Coloring> {
        let kind: StrategyKind = name.parse()?;
        self.solve(graph, constraints, kind, options)
    }

    /// Runs the heuristic optimizer on top of a strategy.
    pub fn optimize(
        &mut self,
        graph: &mut Graph,
        constraints: &ConstraintManager,
        kind: StrategyKind,
        options: &SolveOptions,
    ) -> Result<Coloring> {
        self.run(graph, constraints, kind, options, true)
    }

    fn run(
        &mut self,
        graph: &mut Graph,
        constraints: &ConstraintManager,
        kind: StrategyKind,
        options: &SolveOptions,
        optimize: bool,
    ) -> Result<Coloring> {
        if let Some(budget) = options.max_colors {
            validate_color(budget)?;
        }

        let mut scope = SolveScope::from_options(kind, options, self.terminate_flag.clone());
        info!(
            event = "solve_start",
            strategy = %kind,
            optimize,
            vertex_count = graph.vertex_count(),
            edge_count = graph.edge_count(),
            constraint_count = constraints.constrained_vertices().len(),
        );

        let result = if optimize {
            self.optimizer
                .optimize_in_scope(graph, constraints, kind, options, &mut scope)
        } else {
            let problem = ColoringProblem::new(graph, constraints, options.order_for(kind));
            create_strategy(kind).attempt_coloring(&problem, options, &mut scope)
        };

        let statistics = scope.finish(result.as_ref().ok().map(Coloring::color_count));
        match &result {
            Ok(coloring) => info!(
                event = "solve_end",
                strategy = %kind,
                colors = coloring.color_count(),
                steps = statistics.step_count,
                backtracks = statistics.backtrack_count,
                duration_ms = statistics.duration.as_millis() as u64,
                speed = statistics.steps_per_second(),
            ),
            Err(err) => info!(
                event = "solve_end",
                strategy = %kind,
                error = %err,
                steps = statistics.step_count,
                duration_ms = statistics.duration.as_millis() as u64,
            ),
        }
        self.statistics = Some(statistics);

        let coloring = result?;
        coloring.apply_to(graph)?;
        self.last = Some(coloring.clone());
        self.stale = false;
        Ok(coloring)
    }

    pub fn on_vertex_added(&mut self, vertex: impl Into<VertexId>) {
        let vertex = vertex.into();
        debug!(event = "vertex_added", vertex = %vertex);
        self.invalidate();
    }

    /// Clears the removed vertex's constraints and invalidates the coloring.
    pub fn on_vertex_removed(
        &mut self,
        constraints: &mut ConstraintManager,
        vertex: impl Into<VertexId>,
    ) {
        let vertex = vertex.into();
        let had_constraints = constraints.clear_constraints(vertex);
        debug!(event = "vertex_removed", vertex = %vertex, had_constraints);
        self.invalidate();
    }

    pub fn on_edge_added(&mut self, u: impl Into<VertexId>, v: impl Into<VertexId>) {
        let (u, v) = (u.into(), v.into());
        debug!(event = "edge_added", u = %u, v = %v);
        self.invalidate();
    }

    pub fn on_edge_removed(&mut self, u: impl Into<VertexId>, v: impl Into<VertexId>) {
        let (u, v) = (u.into(), v.into());
        debug!(event = "edge_removed", u = %u, v = %v);
        self.invalidate();
    }

    pub fn on_constraint_changed(&mut self, vertex: impl Into<VertexId>) {
        let vertex = vertex.into();
        debug!(event = "constraint_changed", vertex = %vertex);
        self.invalidate();
    }

    /// Marks the stored coloring stale without naming a change.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Returns the last successful coloring, if any.
    ///
    /// # Errors
    ///
    /// `StaleColoringUsed` if the graph or constraints changed since.
    pub fn last_coloring(
        &self,
        graph: &Graph,
        constraints: &ConstraintManager,
    ) -> Result<Option<&Coloring>> {
        if self.is_stale(graph, constraints) {
            return Err(ColoringError::StaleColoringUsed);
        }
        Ok(self.last.as_ref())
    }

    /// Returns true if a change happened since the last successful solve.
    pub fn is_stale(&self, graph: &Graph, constraints: &ConstraintManager) -> bool {
        self.stale
            || self
                .last
                .as_ref()
                .is_some_and(|c| c.is_stale(graph, constraints))
    }

    /// Returns true if the graph's stored assignment is current and valid.
    pub fn is_valid_coloring(&self, graph: &Graph, constraints: &ConstraintManager) -> bool {
        !self.is_stale(graph, constraints)
            && Coloring::from_graph(graph, constraints).is_valid_for(graph, constraints)
    }

    /// Statistics of the most recent solve, successful or not.
    pub fn statistics(&self) -> Option<&SolveStatistics> {
        self.statistics.as_ref()
    }
}
