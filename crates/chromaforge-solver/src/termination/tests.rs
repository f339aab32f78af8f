//! Integration tests for termination conditions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chromaforge_config::StrategyKind;

use super::*;
use crate::scope::SolveScope;

fn create_test_scope() -> SolveScope {
    SolveScope::new(StrategyKind::Backtracking)
}

#[test]
fn test_step_count_termination() {
    let mut scope = create_test_scope();
    let term = StepCountTermination::new(3);

    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    scope.increment_step_count();
    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_time_termination() {
    let scope = create_test_scope();
    let term = TimeTermination::millis(5);
    thread::sleep(Duration::from_millis(10));
    assert!(term.is_terminated(&scope));

    let term = TimeTermination::seconds(3600);
    assert!(!term.is_terminated(&scope));
}

#[test]
fn test_external_termination() {
    let scope = create_test_scope();
    let flag = Arc::new(AtomicBool::new(false));
    let term = ExternalTermination::new(flag.clone());

    assert!(!term.is_terminated(&scope));
    flag.store(true, Ordering::SeqCst);
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_or_termination() {
    let mut scope = create_test_scope();
    let mut term = OrTermination::default();
    assert!(term.is_empty());
    assert!(!term.is_terminated(&scope));

    term.push(StepCountTermination::new(10));
    term.push(StepCountTermination::new(1));
    assert_eq!(term.len(), 2);

    scope.increment_step_count();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_scope_with_termination() {
    let mut scope = create_test_scope().with_termination(StepCountTermination::new(1));
    assert!(!scope.should_terminate());
    scope.increment_step_count();
    assert!(scope.should_terminate());
}
