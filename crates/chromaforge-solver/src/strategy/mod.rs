//! Coloring strategies.
//!
//! A strategy turns a [`ColoringProblem`] into a complete valid coloring or
//! fails. Two variants exist:
//! - [`GreedyStrategy`]: one pass, lowest available color, never backtracks
//! - [`BacktrackingStrategy`]: exhaustive depth-first search over a budget
//!
//! [`create_strategy`] maps a [`StrategyKind`] to a [`Strategy`] value.

mod backtracking;
mod greedy;

use std::fmt::Debug;

use chromaforge_config::{SolveOptions, StrategyKind};
use chromaforge_core::{Coloring, Result};

use crate::problem::ColoringProblem;
use crate::scope::SolveScope;

pub use backtracking::{BacktrackingStrategy, SearchState};
pub use greedy::GreedyStrategy;

/// Capability shared by every strategy variant.
pub trait ColoringStrategy: Send + Debug {
    /// Produces a complete coloring of the problem.
    ///
    /// # Errors
    ///
    /// - `ConstraintUnsatisfiable` if the constraints admit no coloring
    /// - `NoSolutionWithinBudget` if `options.max_colors` is too small
    /// - `DeadlineExceeded` if a termination of the scope triggered
    fn attempt_coloring(
        &self,
        problem: &ColoringProblem<'_>,
        options: &SolveOptions,
        scope: &mut SolveScope,
    ) -> Result<Coloring>;

    /// Returns the kind of this strategy.
    fn kind(&self) -> StrategyKind;
}

/// Tagged strategy value produced by the factory.
#[derive(Debug, Clone)]
pub enum Strategy {
    Greedy(GreedyStrategy),
    Backtracking(BacktrackingStrategy),
}

impl ColoringStrategy for Strategy {
    fn attempt_coloring(
        &self,
        problem: &ColoringProblem<'_>,
        options: &SolveOptions,
        scope: &mut SolveScope,
    ) -> Result<Coloring> {
        match self {
            Strategy::Greedy(s) => s.attempt_coloring(problem, options, scope),
            Strategy::Backtracking(s) => s.attempt_coloring(problem, options, scope),
        }
    }

    fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Greedy(s) => s.kind(),
            Strategy::Backtracking(s) => s.kind(),
        }
    }
}

/// Constructs the strategy for a kind.
pub fn create_strategy(kind: StrategyKind) -> Strategy {
    match kind {
        StrategyKind::Greedy => Strategy::Greedy(GreedyStrategy::new()),
        StrategyKind::Backtracking => Strategy::Backtracking(BacktrackingStrategy::new()),
    }
}

/// Constructs the strategy registered under a name.
///
/// # Errors
///
/// `UnknownStrategy` if no strategy has that name.
pub fn create_strategy_by_name(name: &str) -> Result<Strategy> {
    let kind: StrategyKind = name.parse()?;
    Ok(create_strategy(kind))
}

#[cfg(test)]
mod tests;
