//! Heuristic color reduction.
//!
//! [`HeuristicOptimizer`] runs a base strategy and then polishes the result
//! with local recoloring passes. Optional restarts repeat the whole attempt
//! with randomized tie-breaking and keep the coloring with the fewest
//! colors.

use std::collections::HashMap;

use chromaforge_config::{OptimizerConfig, SolveOptions, StrategyKind, VertexOrder};
use chromaforge_core::{
    Color, Coloring, ColoringError, ConstraintManager, Graph, Result, FIRST_COLOR,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::problem::ColoringProblem;
use crate::scope::SolveScope;
use crate::strategy::{create_strategy, ColoringStrategy};

/// Base strategy followed by local recoloring.
///
/// The distinct color count never grows: the result uses at most as many
/// colors as the base strategy's output.
///
/// # Example
///
/// ```
/// use chromaforge_config::{SolveOptions, StrategyKind};
/// use chromaforge_core::{ConstraintManager, Graph};
/// use chromaforge_solver::HeuristicOptimizer;
///
/// // crown graph: greedy in insertion order needs 3 colors, 2 suffice
/// let mut graph = Graph::new();
/// for v in 1..=6 {
///     graph.add_vertex(v);
/// }
/// for (u, v) in [(1, 4), (1, 6), (2, 3), (2, 5), (3, 6), (4, 5)] {
///     graph.add_edge(u, v).unwrap();
/// }
/// let constraints = ConstraintManager::new();
///
/// let optimizer = HeuristicOptimizer::default();
/// let coloring = optimizer
///     .optimize(&graph, &constraints, StrategyKind::Greedy, &SolveOptions::default())
///     .unwrap();
/// assert!(coloring.is_valid_for(&graph, &constraints));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeuristicOptimizer {
    config: OptimizerConfig,
}

impl HeuristicOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Runs the base strategy, polishes the result and applies restarts.
    ///
    /// The base run visits vertices by descending degree unless
    /// `options.order` says otherwise.
    ///
    /// # Errors
    ///
    /// Same failures as the base strategy. With restarts configured, a
    /// `NoSolutionWithinBudget` from the base attempt is only returned if
    /// every restart fails as well.
    pub fn optimize(
        &self,
        graph: &Graph,
        constraints: &ConstraintManager,
        kind: StrategyKind,
        options: &SolveOptions,
    ) -> Result<Coloring> {
        let mut scope = SolveScope::from_options(kind, options, None);
        self.optimize_in_scope(graph, constraints, kind, options, &mut scope)
    }

    /// Like [`optimize`](Self::optimize) but records into a caller scope.
    pub fn optimize_in_scope(
        &self,
        graph: &Graph,
        constraints: &ConstraintManager,
        kind: StrategyKind,
        options: &SolveOptions,
        scope: &mut SolveScope,
    ) -> Result<Coloring> {
        let strategy = create_strategy(kind);
        let order = options.order.unwrap_or(VertexOrder::DegreeDescending);
        let problem = ColoringProblem::new(graph, constraints, order);
        let polish_order = problem.degree_descending_order();

        info!(
            event = "phase_start",
            phase = "Heuristic Optimizer",
            strategy = %kind,
            restarts = self.config.restarts,
        );

        let mut first_failure = None;
        let mut best = match strategy.attempt_coloring(&problem, options, scope) {
            Ok(coloring) => Some(self.polish_coloring(
                &problem,
                &coloring,
                &polish_order,
                options,
                scope,
            )),
            Err(err @ ColoringError::NoSolutionWithinBudget { .. }) if self.config.restarts > 0 => {
                debug!(event = "base_failed", error = %err);
                first_failure = Some(err);
                None
            }
            Err(err) => return Err(err),
        };

        if self.config.restarts > 0 {
            let seed = self.config.random_seed.unwrap_or_else(rand::random::<u64>);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            for restart in 0..self.config.restarts {
                scope.statistics_mut().restarts += 1;
                let shuffled = problem.with_order(problem.shuffled_degree_order(&mut rng));

                let attempt = match strategy.attempt_coloring(&shuffled, options, scope) {
                    Ok(coloring) => coloring,
                    Err(err @ ColoringError::NoSolutionWithinBudget { .. }) => {
                        debug!(event = "restart_failed", restart, error = %err);
                        first_failure.get_or_insert(err);
                        continue;
                    }
                    Err(err @ ColoringError::DeadlineExceeded { .. }) if best.is_some() => {
                        debug!(event = "restart_interrupted", restart, error = %err);
                        break;
                    }
                    Err(err) => return Err(err),
                };

                let colors = self.polish_coloring(&problem, &attempt, &polish_order, options, scope);
                let count = colors.color_count();
                debug!(event = "restart_end", restart, colors = count);
                let improved = match &best {
                    Some(current) => count < current.color_count(),
                    None => true,
                };
                if improved {
                    best = Some(colors);
                }
            }
        }

        let result = match best {
            Some(coloring) => Ok(coloring),
            None => Err(first_failure.unwrap_or_else(|| {
                ColoringError::ConstraintUnsatisfiable("no attempt produced a coloring".to_string())
            })),
        };

        info!(
            event = "phase_end",
            phase = "Heuristic Optimizer",
            steps = scope.step_count(),
            colors = result.as_ref().map(Coloring::color_count).unwrap_or(0),
            recolored = scope.statistics().recolored_vertices,
        );
        result
    }

    /// Polishes an existing coloring without running a strategy.
    ///
    /// # Errors
    ///
    /// - `StaleColoringUsed` if the graph or constraints changed since the
    ///   coloring was computed
    /// - `ConstraintUnsatisfiable` if the coloring violates the graph or the
    ///   constraints
    pub fn improve(
        &self,
        graph: &Graph,
        constraints: &ConstraintManager,
        coloring: &Coloring,
        iteration_cap: u32,
    ) -> Result<Coloring> {
        if coloring.is_stale(graph, constraints) {
            return Err(ColoringError::StaleColoringUsed);
        }
        if let Some(violation) = coloring.violations(graph, constraints).first() {
            return Err(ColoringError::ConstraintUnsatisfiable(format!(
                "cannot improve an invalid coloring: {violation}"
            )));
        }

        let problem = ColoringProblem::new(graph, constraints, VertexOrder::InsertionOrder);
        let order = problem.degree_descending_order();
        let options = SolveOptions::new().with_iteration_cap(iteration_cap);
        let mut scope = SolveScope::new(StrategyKind::default());
        Ok(self.polish_coloring(&problem, coloring, &order, &options, &mut scope))
    }

    fn polish_coloring(
        &self,
        problem: &ColoringProblem<'_>,
        coloring: &Coloring,
        order: &[usize],
        options: &SolveOptions,
        scope: &mut SolveScope,
    ) -> Coloring {
        let mut colors = problem.dense_colors(coloring);
        polish(problem, &mut colors, order, options.iteration_cap, scope);
        problem.to_coloring(&colors)
    }
}

/// Local recoloring until a fixpoint or `iteration_cap` passes.
///
/// Each pass visits free vertices in `order` and moves a vertex to the
/// lowest allowed, conflict-free color below its current one. A move is
/// taken only if the target color is already in use or the vertex is the
/// last holder of its current color, so the distinct count never grows.
fn polish(
    problem: &ColoringProblem<'_>,
    colors: &mut [Color],
    order: &[usize],
    iteration_cap: u32,
    scope: &mut SolveScope,
) {
    let mut usage: HashMap<Color, usize> = HashMap::new();
    for &color in colors.iter() {
        *usage.entry(color).or_insert(0) += 1;
    }

    for pass in 0..iteration_cap {
        if scope.should_terminate() {
            break;
        }
        scope.statistics_mut().recoloring_passes += 1;

        let mut moved = 0u64;
        for &index in order {
            if problem.fixed(index).is_some() {
                continue;
            }
            let current = colors[index];
            let sole_holder = usage.get(&current) == Some(&1);
            let target = (FIRST_COLOR..current).find(|&c| {
                (sole_holder || usage.get(&c).is_some_and(|&n| n > 0))
                    && problem.can_take(index, c, colors)
            });
            let Some(target) = target else {
                continue;
            };

            colors[index] = target;
            if let Some(n) = usage.get_mut(&current) {
                *n -= 1;
                if *n == 0 {
                    usage.remove(&current);
                }
            }
            *usage.entry(target).or_insert(0) += 1;
            moved += 1;
        }

        scope.statistics_mut().recolored_vertices += moved;
        debug!(event = "recoloring_pass", pass, moved, colors = usage.len());
        if moved == 0 {
            break;
        }
    }
}
