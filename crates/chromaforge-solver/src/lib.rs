//! ChromaForge Solver Engine
//!
//! This crate provides the coloring engine on top of `chromaforge-core`:
//! - Strategies (greedy, backtracking) and the strategy factory
//! - Heuristic optimizer (local recoloring, randomized restarts)
//! - ColoringSolver with dynamic-update hooks
//! - Termination conditions and solve statistics

pub mod optimizer;
pub mod problem;
pub mod scope;
pub mod solver;
pub mod statistics;
pub mod strategy;
pub mod termination;

pub use optimizer::HeuristicOptimizer;
pub use problem::{ColoringProblem, UNASSIGNED};
pub use scope::SolveScope;
pub use solver::ColoringSolver;
pub use statistics::SolveStatistics;
pub use strategy::{
    create_strategy, create_strategy_by_name, BacktrackingStrategy, ColoringStrategy,
    GreedyStrategy, SearchState, Strategy,
};
pub use termination::{
    ExternalTermination, OrTermination, StepCountTermination, Termination, TimeTermination,
};
