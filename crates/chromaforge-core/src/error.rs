//! Error types for ChromaForge

use thiserror::Error;

use crate::color::Color;
use crate::graph::VertexId;

/// Main error type for coloring operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColoringError {
    /// A referenced vertex does not exist in the graph
    #[error("vertex {0} not found")]
    VertexNotFound(VertexId),

    /// A referenced edge does not exist in the graph
    #[error("edge {0}-{1} not found")]
    EdgeNotFound(VertexId, VertexId),

    /// An edge from a vertex to itself was requested
    #[error("self loop on vertex {0} rejected")]
    SelfLoopRejected(VertexId),

    /// Colors are numbered from 1
    #[error("invalid color {0}: colors start at 1")]
    InvalidColor(Color),

    /// A constraint contradicts a constraint already registered for the vertex
    #[error("conflicting constraint on vertex {vertex}: {reason}")]
    ConflictingConstraint { vertex: VertexId, reason: String },

    /// The registered constraints admit no valid coloring
    #[error("constraints unsatisfiable: {0}")]
    ConstraintUnsatisfiable(String),

    /// No strategy is registered under the requested name
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    /// The search exhausted every branch for the given color budget
    #[error("no solution within a budget of {budget} colors")]
    NoSolutionWithinBudget { budget: Color },

    /// The search was stopped by its step limit, time limit or an external flag
    #[error("search terminated after {steps} steps without a solution")]
    DeadlineExceeded { steps: u64 },

    /// A stored coloring was read after a mutation invalidated it
    #[error("stored coloring is stale: the graph or its constraints changed since the last solve")]
    StaleColoringUsed,
}

impl ColoringError {
    /// Returns true for errors raised synchronously while validating input.
    ///
    /// Validation errors never leave a partial mutation behind.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ColoringError::VertexNotFound(_)
                | ColoringError::EdgeNotFound(..)
                | ColoringError::SelfLoopRejected(_)
                | ColoringError::InvalidColor(_)
                | ColoringError::ConflictingConstraint { .. }
                | ColoringError::UnknownStrategy(_)
        )
    }

    /// Returns true for errors produced by an exhausted or interrupted search.
    pub fn is_search_failure(&self) -> bool {
        matches!(
            self,
            ColoringError::ConstraintUnsatisfiable(_)
                | ColoringError::NoSolutionWithinBudget { .. }
                | ColoringError::DeadlineExceeded { .. }
        )
    }
}

/// Result type alias for coloring operations
pub type Result<T> = std::result::Result<T, ColoringError>;
