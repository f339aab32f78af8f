//! Exhaustive depth-first coloring.
//!
//! The search walks free vertices in the problem's order and keeps one
//! frame per assigned vertex on an explicit stack. Each frame remembers
//! the next color to try, so retreating to a frame resumes exactly where it
//! left off. Nothing is ever recursive, so deep graphs cannot overflow.
//!
//! Without a budget the strategy deepens iteratively: it searches budget
//! `k`, then `k + 1`, starting from a lower bound. The first budget that
//! succeeds is the minimum number of colors reachable under the
//! constraints, as every smaller budget was exhausted first.

use std::fmt;

use chromaforge_config::{SolveOptions, StrategyKind};
use chromaforge_core::{Color, Coloring, ColoringError, Result, FIRST_COLOR};
use tracing::{debug, trace};

use super::ColoringStrategy;
use crate::problem::{ColoringProblem, UNASSIGNED};
use crate::scope::SolveScope;

/// Progress of a single-budget search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// A vertex received a color and the search moved deeper.
    Searching,
    /// A vertex ran out of colors and the search retreated.
    Backtracked,
    /// Every free vertex holds a color.
    Solved,
    /// The root ran out of colors; the budget has no solution.
    Exhausted,
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchState::Searching => write!(f, "Searching"),
            SearchState::Backtracked => write!(f, "Backtracked"),
            SearchState::Solved => write!(f, "Solved"),
            SearchState::Exhausted => write!(f, "Exhausted"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: usize,
    next_color: Color,
    // Highest color used by the frames below this one.
    ceiling: Color,
}

impl Frame {
    fn new(vertex: usize, ceiling: Color) -> Self {
        Self {
            vertex,
            next_color: FIRST_COLOR,
            ceiling,
        }
    }
}

/// Finds a coloring within a budget, or proves there is none.
///
/// With `max_colors` set the strategy searches exactly that budget. Without
/// it the budget grows from the problem's lower bound until a coloring
/// appears, which yields a minimum coloring for the given constraints.
///
/// On an unconstrained problem colors are interchangeable, so a vertex never
/// opens more than one new color beyond those already in use.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktrackingStrategy;

impl BacktrackingStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Searches a single budget.
    ///
    /// Returns the dense colors on success and `None` if the budget was
    /// exhausted.
    fn search(
        &self,
        problem: &ColoringProblem<'_>,
        budget: Color,
        scope: &mut SolveScope,
    ) -> Result<Option<Vec<Color>>> {
        if problem.max_fixed_color().is_some_and(|fixed| fixed > budget) {
            return Ok(None);
        }

        let mut colors = problem.initial_colors();
        let free: Vec<usize> = problem
            .order()
            .iter()
            .copied()
            .filter(|&i| problem.fixed(i).is_none())
            .collect();
        if free.is_empty() {
            return Ok(Some(colors));
        }

        let symmetric = problem.is_unconstrained();
        let mut stack: Vec<Frame> = Vec::with_capacity(free.len());
        stack.push(Frame::new(free[0], 0));

        loop {
            let Some(frame) = stack.last_mut() else {
                trace!(event = "search_state", budget, state = %SearchState::Exhausted);
                return Ok(None);
            };
            scope.check_termination()?;
            let vertex = frame.vertex;
            colors[vertex] = UNASSIGNED;

            let limit = if symmetric {
                budget.min(frame.ceiling + 1)
            } else {
                budget
            };
            let chosen = (frame.next_color..=limit).find(|&c| problem.can_take(vertex, c, &colors));

            let state = match chosen {
                Some(color) => {
                    scope.increment_step_count();

                    frame.next_color = color + 1;
                    let ceiling = frame.ceiling.max(color);
                    colors[vertex] = color;

                    let depth = stack.len();
                    if depth == free.len() {
                        SearchState::Solved
                    } else {
                        stack.push(Frame::new(free[depth], ceiling));
                        SearchState::Searching
                    }
                }
                None => {
                    stack.pop();
                    scope.statistics_mut().backtrack_count += 1;
                    SearchState::Backtracked
                }
            };

            trace!(
                event = "search_state",
                vertex = %problem.vertex(vertex),
                depth = stack.len(),
                state = %state,
            );
            if state == SearchState::Solved {
                return Ok(Some(colors));
            }
        }
    }
}

impl ColoringStrategy for BacktrackingStrategy {
    fn attempt_coloring(
        &self,
        problem: &ColoringProblem<'_>,
        options: &SolveOptions,
        scope: &mut SolveScope,
    ) -> Result<Coloring> {
        problem.check_fixed_conflicts()?;

        if let Some(budget) = options.max_colors {
            scope.statistics_mut().budgets_tried += 1;
            return match self.search(problem, budget, scope)? {
                Some(colors) => Ok(problem.to_coloring(&colors)),
                None => Err(ColoringError::NoSolutionWithinBudget { budget }),
            };
        }

        let lower = problem.color_lower_bound();
        let upper = problem.color_upper_bound();
        for budget in lower..=upper {
            scope.statistics_mut().budgets_tried += 1;
            debug!(event = "budget_start", budget, upper);
            if let Some(colors) = self.search(problem, budget, scope)? {
                return Ok(problem.to_coloring(&colors));
            }
        }

        // Unreachable while the upper bound holds.
        Err(ColoringError::ConstraintUnsatisfiable(format!(
            "no coloring found with up to {upper} colors"
        )))
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Backtracking
    }
}
