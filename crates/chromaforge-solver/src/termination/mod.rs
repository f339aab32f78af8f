//! Termination conditions for long-running searches.
//!
//! The search polls its [`SolveScope`](crate::scope::SolveScope) before every
//! vertex assignment attempt; a triggered termination stops the search with
//! `ColoringError::DeadlineExceeded`.

mod composite;
mod external;
mod step_count;
mod time;

use std::fmt::Debug;

use crate::scope::SolveScope;

pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop searching.
pub trait Termination: Send + Debug {
    /// Returns true if the search should stop.
    fn is_terminated(&self, scope: &SolveScope) -> bool;
}

#[cfg(test)]
mod tests;
