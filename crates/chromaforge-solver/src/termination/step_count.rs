//! Step count termination.

use super::Termination;
use crate::scope::SolveScope;

/// Terminates after a number of vertex assignment attempts.
///
/// # Example
///
/// ```
/// use chromaforge_solver::termination::StepCountTermination;
///
/// // Terminate after 1000 steps
/// let term = StepCountTermination::new(1000);
/// ```
#[derive(Debug, Clone)]
pub struct StepCountTermination {
    limit: u64,
}

impl StepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for StepCountTermination {
    fn is_terminated(&self, scope: &SolveScope) -> bool {
        scope.step_count() >= self.limit
    }
}
