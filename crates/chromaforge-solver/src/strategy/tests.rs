//! Tests for the strategy factory.

use chromaforge_config::{SolveOptions, StrategyKind, VertexOrder};
use chromaforge_core::{ColoringError, ConstraintManager};
use chromaforge_test::graphs;

use super::*;

#[test]
fn test_create_strategy_by_kind() {
    for kind in StrategyKind::ALL {
        assert_eq!(create_strategy(kind).kind(), kind);
    }
}

#[test]
fn test_create_strategy_by_name() {
    let strategy = create_strategy_by_name("greedy").unwrap();
    assert!(matches!(strategy, Strategy::Greedy(_)));

    let strategy = create_strategy_by_name(" Backtracking ").unwrap();
    assert!(matches!(strategy, Strategy::Backtracking(_)));
}

#[test]
fn test_unknown_strategy_name() {
    assert_eq!(
        create_strategy_by_name("simulated-annealing").unwrap_err(),
        ColoringError::UnknownStrategy("simulated-annealing".to_string())
    );
}

#[test]
fn test_strategies_agree_on_validity() {
    let graph = graphs::random(16, 40, 7);
    let constraints = ConstraintManager::new();

    for kind in StrategyKind::ALL {
        let strategy = create_strategy(kind);
        let options = SolveOptions::default();
        let problem = ColoringProblem::new(&graph, &constraints, options.order_for(kind));
        let mut scope = SolveScope::new(kind);
        let coloring = strategy
            .attempt_coloring(&problem, &options, &mut scope)
            .unwrap();
        assert!(coloring.is_valid_for(&graph, &constraints), "{kind}");
    }
}

#[test]
fn test_backtracking_never_worse_than_greedy() {
    let constraints = ConstraintManager::new();
    for seed in 0..4 {
        let graph = graphs::random(14, 30, seed);
        let options = SolveOptions::default();
        let problem = ColoringProblem::new(&graph, &constraints, VertexOrder::DegreeDescending);

        let greedy = create_strategy(StrategyKind::Greedy)
            .attempt_coloring(&problem, &options, &mut SolveScope::new(StrategyKind::Greedy))
            .unwrap();
        let exact = create_strategy(StrategyKind::Backtracking)
            .attempt_coloring(
                &problem,
                &options,
                &mut SolveScope::new(StrategyKind::Backtracking),
            )
            .unwrap();
        assert!(exact.color_count() <= greedy.color_count());
    }
}
