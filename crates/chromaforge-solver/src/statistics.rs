//! Solve statistics.
//!
//! Counters collected while a strategy or the optimizer runs. The solver
//! keeps the statistics of the most recent solve for inspection.

use std::time::Duration;

use chromaforge_config::StrategyKind;

/// Statistics for a single solve or optimize call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveStatistics {
    /// Strategy that drove the search.
    pub strategy: Option<StrategyKind>,
    /// Time spent in the call.
    pub duration: Duration,
    /// Vertex assignment attempts.
    pub step_count: u64,
    /// Times the backtracking search retreated to a previous vertex.
    pub backtrack_count: u64,
    /// Color budgets searched by the backtracking strategy.
    pub budgets_tried: u32,
    /// Local recoloring passes run by the optimizer.
    pub recoloring_passes: u32,
    /// Vertices moved to a lower color by the optimizer.
    pub recolored_vertices: u64,
    /// Randomized retries run by the optimizer.
    pub restarts: u32,
    /// Distinct colors of the returned coloring, if any.
    pub colors_used: Option<usize>,
}

impl SolveStatistics {
    pub fn new(strategy: StrategyKind) -> Self {
        Self {
            strategy: Some(strategy),
            ..Self::default()
        }
    }

    /// Steps per second, 0 when no time was measured.
    pub fn steps_per_second(&self) -> u64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            (self.step_count as f64 / secs) as u64
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_statistics() {
        let stats = SolveStatistics::new(StrategyKind::Greedy);
        assert_eq!(stats.strategy, Some(StrategyKind::Greedy));
        assert_eq!(stats.step_count, 0);
        assert_eq!(stats.colors_used, None);
    }

    #[test]
    fn test_steps_per_second() {
        let mut stats = SolveStatistics::default();
        assert_eq!(stats.steps_per_second(), 0);

        stats.step_count = 500;
        stats.duration = Duration::from_millis(250);
        assert_eq!(stats.steps_per_second(), 2000);
    }
}
