//! Solve-level scope.
//!
//! A [`SolveScope`] lives for exactly one `solve` or `optimize` call. It
//! counts steps, owns the termination conditions and collects statistics.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chromaforge_config::{SolveOptions, StrategyKind};
use chromaforge_core::{ColoringError, Result};

use crate::statistics::SolveStatistics;
use crate::termination::{
    ExternalTermination, OrTermination, StepCountTermination, Termination, TimeTermination,
};

pub struct SolveScope {
    start_time: Instant,
    step_count: u64,
    termination: OrTermination,
    statistics: SolveStatistics,
}

impl std::fmt::Debug for SolveScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolveScope")
            .field("step_count", &self.step_count)
            .field("termination", &self.termination)
            .finish()
    }
}

impl SolveScope {
    pub fn new(strategy: StrategyKind) -> Self {
        Self {
            start_time: Instant::now(),
            step_count: 0,
            termination: OrTermination::default(),
            statistics: SolveStatistics::new(strategy),
        }
    }

    /// Builds a scope whose terminations follow the options and the
    /// optional external flag.
    pub fn from_options(
        strategy: StrategyKind,
        options: &SolveOptions,
        terminate_flag: Option<Arc<AtomicBool>>,
    ) -> Self {
        let mut children: Vec<Box<dyn Termination>> = Vec::new();
        if let Some(steps) = options.deadline_steps {
            children.push(Box::new(StepCountTermination::new(steps)));
        }
        if let Some(limit) = options.time_limit() {
            children.push(Box::new(TimeTermination::new(limit)));
        }
        if let Some(flag) = terminate_flag {
            children.push(Box::new(ExternalTermination::new(flag)));
        }
        Self {
            termination: OrTermination::new(children),
            ..Self::new(strategy)
        }
    }

    pub fn with_termination(mut self, termination: impl Termination + 'static) -> Self {
        self.termination.push(termination);
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.step_count += 1;
        self.step_count
    }

    pub fn should_terminate(&self) -> bool {
        self.termination.is_terminated(self)
    }

    /// Polls the terminations before a vertex assignment attempt.
    ///
    /// # Errors
    ///
    /// `DeadlineExceeded` once any termination has triggered.
    pub fn check_termination(&self) -> Result<()> {
        if self.should_terminate() {
            Err(ColoringError::DeadlineExceeded {
                steps: self.step_count,
            })
        } else {
            Ok(())
        }
    }

    pub fn statistics(&self) -> &SolveStatistics {
        &self.statistics
    }

    pub fn statistics_mut(&mut self) -> &mut SolveStatistics {
        &mut self.statistics
    }

    /// Closes the scope and returns its statistics.
    pub fn finish(mut self, colors_used: Option<usize>) -> SolveStatistics {
        self.statistics.duration = self.elapsed();
        self.statistics.step_count = self.step_count;
        self.statistics.colors_used = colors_used;
        self.statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_scope_without_terminations_never_stops() {
        let mut scope = SolveScope::new(StrategyKind::Greedy);
        for _ in 0..1000 {
            scope.increment_step_count();
        }
        assert!(!scope.should_terminate());
        assert!(scope.check_termination().is_ok());
    }

    #[test]
    fn test_deadline_steps_from_options() {
        let options = SolveOptions::new().with_deadline_steps(2);
        let mut scope = SolveScope::from_options(StrategyKind::Backtracking, &options, None);

        scope.increment_step_count();
        assert!(scope.check_termination().is_ok());
        scope.increment_step_count();
        assert_eq!(
            scope.check_termination(),
            Err(ColoringError::DeadlineExceeded { steps: 2 })
        );
    }

    #[test]
    fn test_external_flag_from_options() {
        let flag = Arc::new(AtomicBool::new(false));
        let scope = SolveScope::from_options(
            StrategyKind::Greedy,
            &SolveOptions::default(),
            Some(flag.clone()),
        );
        assert!(!scope.should_terminate());

        flag.store(true, Ordering::SeqCst);
        assert!(scope.should_terminate());
    }

    #[test]
    fn test_from_options_collects_terminations() {
        let unbounded =
            SolveScope::from_options(StrategyKind::Greedy, &SolveOptions::default(), None);
        assert!(unbounded.termination.is_empty());

        let options = SolveOptions::new()
            .with_deadline_steps(10)
            .with_time_limit(Duration::from_secs(1));
        let flag = Arc::new(AtomicBool::new(false));
        let bounded = SolveScope::from_options(StrategyKind::Greedy, &options, Some(flag));
        assert_eq!(bounded.termination.len(), 3);
    }

    #[test]
    fn test_finish_records_counters() {
        let mut scope = SolveScope::new(StrategyKind::Greedy);
        scope.increment_step_count();
        scope.statistics_mut().restarts = 2;

        let stats = scope.finish(Some(3));
        assert_eq!(stats.step_count, 1);
        assert_eq!(stats.restarts, 2);
        assert_eq!(stats.colors_used, Some(3));
        assert_eq!(stats.strategy, Some(StrategyKind::Greedy));
    }
}
