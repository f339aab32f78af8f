//! ChromaForge Core - graph, constraint and coloring types
//!
//! This crate provides the data model the coloring engine works on:
//! - [`Graph`]: undirected graph with a stored color assignment
//! - [`ConstraintManager`]: fixed colors and per-vertex exclusions
//! - [`Coloring`]: a materialized result and its verification
//! - [`ColoringError`]: the error type shared by every ChromaForge crate

pub mod color;
pub mod coloring;
pub mod constraint;
pub mod error;
pub mod graph;

pub use color::{palette, validate_color, Color, FIRST_COLOR};
pub use coloring::{Coloring, Violation};
pub use constraint::{ConstraintManager, ConstraintSet};
pub use error::{ColoringError, Result};
pub use graph::{Graph, GraphChange, GraphSnapshot, VertexId};
