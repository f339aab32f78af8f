//! Greedy coloring.

use chromaforge_config::{SolveOptions, StrategyKind};
use chromaforge_core::{Color, Coloring, ColoringError, Result, FIRST_COLOR};
use smallvec::SmallVec;
use tracing::trace;

use super::ColoringStrategy;
use crate::problem::{ColoringProblem, UNASSIGNED};
use crate::scope::SolveScope;

/// Colors vertices one at a time in the problem's order.
///
/// Fixed vertices are placed first. Every other vertex takes the lowest
/// color that no colored neighbor holds and that its constraints allow.
/// A vertex's color is final once assigned.
///
/// # Example
///
/// ```
/// use chromaforge_config::{SolveOptions, StrategyKind, VertexOrder};
/// use chromaforge_core::{ConstraintManager, Graph};
/// use chromaforge_solver::{ColoringProblem, ColoringStrategy, GreedyStrategy, SolveScope};
///
/// let mut graph = Graph::new();
/// for v in 1..=3 {
///     graph.add_vertex(v);
/// }
/// graph.add_edge(1, 2).unwrap();
/// graph.add_edge(2, 3).unwrap();
/// let constraints = ConstraintManager::new();
///
/// let problem = ColoringProblem::new(&graph, &constraints, VertexOrder::InsertionOrder);
/// let mut scope = SolveScope::new(StrategyKind::Greedy);
/// let coloring = GreedyStrategy::new()
///     .attempt_coloring(&problem, &SolveOptions::default(), &mut scope)
///     .unwrap();
///
/// assert_eq!(coloring.get(1), Some(1));
/// assert_eq!(coloring.get(2), Some(2));
/// assert_eq!(coloring.get(3), Some(1));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyStrategy;

impl GreedyStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Lowest color that is neither taken nor excluded.
    ///
    /// Exclusion sets are finite, so the scan always ends; when every used
    /// color is blocked this allocates a fresh one above them.
    fn lowest_free_color(problem: &ColoringProblem<'_>, index: usize, taken: &[Color]) -> Color {
        let mut color = FIRST_COLOR;
        loop {
            if taken.binary_search(&color).is_err() && problem.is_allowed(index, color) {
                return color;
            }
            color += 1;
        }
    }
}

impl ColoringStrategy for GreedyStrategy {
    fn attempt_coloring(
        &self,
        problem: &ColoringProblem<'_>,
        options: &SolveOptions,
        scope: &mut SolveScope,
    ) -> Result<Coloring> {
        problem.check_fixed_conflicts()?;
        if let (Some(budget), Some(fixed)) = (options.max_colors, problem.max_fixed_color()) {
            if fixed > budget {
                return Err(ColoringError::NoSolutionWithinBudget { budget });
            }
        }

        let mut colors = problem.initial_colors();
        let mut taken: SmallVec<[Color; 16]> = SmallVec::new();

        for &index in problem.order() {
            if colors[index] != UNASSIGNED {
                continue;
            }
            scope.check_termination()?;
            scope.increment_step_count();

            taken.clear();
            taken.extend(
                problem
                    .neighbors(index)
                    .iter()
                    .map(|&n| colors[n])
                    .filter(|&c| c != UNASSIGNED),
            );
            taken.sort_unstable();
            taken.dedup();

            let color = Self::lowest_free_color(problem, index, &taken);
            if let Some(budget) = options.max_colors {
                if color > budget {
                    return Err(ColoringError::NoSolutionWithinBudget { budget });
                }
            }

            trace!(
                event = "assign",
                vertex = %problem.vertex(index),
                color = color,
            );
            colors[index] = color;
        }

        Ok(problem.to_coloring(&colors))
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Greedy
    }
}
