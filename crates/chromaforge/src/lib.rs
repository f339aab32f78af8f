//! ChromaForge - constrained graph coloring in Rust
//!
//! Build a graph, register fixed colors and exclusions, pick a strategy and
//! solve. Mutations made through a [`ColoringSession`] invalidate the stored
//! coloring until the next solve.
//!
//! # Example
//!
//! ```rust
//! use chromaforge::prelude::*;
//!
//! let mut session = ColoringSession::new();
//! for v in 1..=3 {
//!     session.add_vertex(v);
//! }
//! session.add_edge(1, 2).unwrap();
//! session.add_edge(2, 3).unwrap();
//! session.add_edge(3, 1).unwrap();
//!
//! let coloring = session
//!     .solve(StrategyKind::Backtracking, &SolveOptions::default())
//!     .unwrap();
//! assert_eq!(coloring.color_count(), 3);
//!
//! let err = session
//!     .solve(StrategyKind::Backtracking, &SolveOptions::new().with_max_colors(2))
//!     .unwrap_err();
//! assert!(err.is_search_failure());
//! ```

// Data model
pub use chromaforge_core::{
    palette, validate_color, Color, Coloring, ColoringError, ConstraintManager, ConstraintSet,
    Graph, GraphChange, GraphSnapshot, Result, VertexId, Violation, FIRST_COLOR,
};

// Configuration
pub use chromaforge_config::{
    ColoringConfig, ConfigError, OptimizerConfig, SolveOptions, StrategyKind, VertexOrder,
    DEFAULT_ITERATION_CAP,
};

// Engine
pub use chromaforge_solver::{
    create_strategy, create_strategy_by_name, BacktrackingStrategy, ColoringSolver,
    ColoringStrategy, GreedyStrategy, HeuristicOptimizer, SolveStatistics, Strategy,
};

mod session;
pub use session::{ColoringSession, SessionSnapshot};

pub mod prelude {
    pub use super::{
        Color, Coloring, ColoringError, ColoringSession, ConstraintManager, Graph, GraphChange,
        Result, VertexId,
    };
    pub use super::{ColoringConfig, OptimizerConfig, SolveOptions, StrategyKind, VertexOrder};
    pub use super::{ColoringSolver, HeuristicOptimizer};
}
