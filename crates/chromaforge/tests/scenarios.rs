//! End-to-end coloring scenarios through the session API.

use std::sync::Once;

use chromaforge::prelude::*;
use chromaforge_test::{graphs, scenario, Scenario};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::from_default_env().add_directive(
            "chromaforge_solver=info"
                .parse()
                .expect("static directive parses"),
        );
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}

fn session_from(scenario: Scenario) -> ColoringSession {
    ColoringSession::from_parts(scenario.graph, scenario.constraints).unwrap()
}

#[test]
fn triangle_greedy_uses_three_colors() {
    init_tracing();
    let mut session = session_from(Scenario::unconstrained(graphs::triangle()));

    let coloring = session
        .solve(StrategyKind::Greedy, &SolveOptions::default())
        .unwrap();
    assert_eq!(coloring.color_count(), 3);
    assert!(session.is_valid_coloring());
}

#[test]
fn triangle_backtracking_respects_budget() {
    init_tracing();
    let mut session = session_from(Scenario::unconstrained(graphs::triangle()));

    let err = session
        .solve(
            StrategyKind::Backtracking,
            &SolveOptions::new().with_max_colors(2),
        )
        .unwrap_err();
    assert_eq!(err, ColoringError::NoSolutionWithinBudget { budget: 2 });
    assert!(session.vertices().iter().all(|&v| session.color(v).is_none()));

    let coloring = session
        .solve(
            StrategyKind::Backtracking,
            &SolveOptions::new().with_max_colors(3),
        )
        .unwrap();
    assert!(coloring.max_color() <= 3);
    assert!(session.is_valid_coloring());
}

#[test]
fn path_with_fixed_and_excluded_colors() {
    init_tracing();
    for kind in StrategyKind::ALL {
        let scenario = scenario::fixed_and_excluded_path();
        let mut session = session_from(scenario);
        session.solve(kind, &SolveOptions::default()).unwrap();

        let (a, b, c, d) = (
            session.color(1).unwrap(),
            session.color(2).unwrap(),
            session.color(3).unwrap(),
            session.color(4).unwrap(),
        );
        assert_eq!(a, 1, "{kind}");
        assert_ne!(d, 1, "{kind}");
        assert_ne!(b, 1, "{kind}");
        assert_ne!(c, b, "{kind}");
        assert_ne!(d, c, "{kind}");
        assert!(session.is_valid_coloring());
    }
}

#[test]
fn empty_graph_yields_empty_coloring() {
    init_tracing();
    let mut session = ColoringSession::new();
    for kind in StrategyKind::ALL {
        let coloring = session.solve(kind, &SolveOptions::default()).unwrap();
        assert!(coloring.is_empty());
    }
    let coloring = session
        .optimize(StrategyKind::Greedy, &SolveOptions::default())
        .unwrap();
    assert!(coloring.is_empty());
    assert!(session.is_valid_coloring());
}

#[test]
fn mutations_invalidate_until_next_solve() {
    init_tracing();
    let mut session = session_from(Scenario::unconstrained(graphs::path(5)));
    let options = SolveOptions::default();

    session.solve(StrategyKind::Greedy, &options).unwrap();
    assert!(session.is_valid_coloring());

    session.add_edge(0, 2).unwrap();
    assert!(!session.is_valid_coloring());
    assert_eq!(session.last_coloring(), Err(ColoringError::StaleColoringUsed));

    session.solve(StrategyKind::Greedy, &options).unwrap();
    assert!(session.is_valid_coloring());

    session.remove_vertex(4).unwrap();
    assert!(!session.is_valid_coloring());

    session.solve(StrategyKind::Backtracking, &options).unwrap();
    assert!(session.is_valid_coloring());
    assert_eq!(session.last_coloring().unwrap().map(Coloring::len), Some(4));

    session.exclude_color(1, 1).unwrap();
    assert!(!session.is_valid_coloring());
}

#[test]
fn unknown_strategy_name_is_rejected() {
    let mut session = session_from(Scenario::unconstrained(graphs::path(2)));
    assert_eq!(
        session.solve_named("tabu", &SolveOptions::default()),
        Err(ColoringError::UnknownStrategy("tabu".to_string()))
    );
    assert!(session.statistics().is_none());
}

#[test]
fn restricted_triangle_forces_third_color() {
    let scenario = scenario::restricted_triangle();
    let mut session = session_from(scenario);

    let coloring = session
        .solve(StrategyKind::Backtracking, &SolveOptions::default())
        .unwrap();
    assert_eq!(coloring.get(2), Some(3));
}

#[test]
fn optimizer_never_uses_more_colors_than_its_base() {
    init_tracing();
    let scenario = scenario::random_constrained(200, 800, 17);
    let mut session = session_from(scenario);
    let options = SolveOptions::new().with_order(VertexOrder::DegreeDescending);

    let greedy = session.solve(StrategyKind::Greedy, &options).unwrap();
    let optimized = session.optimize(StrategyKind::Greedy, &options).unwrap();

    assert!(optimized.color_count() <= greedy.color_count());
    assert!(session.is_valid_coloring());
    let stats = session.statistics().unwrap();
    assert!(stats.recoloring_passes >= 1);
}

#[test]
fn crown_graph_recovered_by_restarts() {
    let config = ColoringConfig::new().with_optimizer(
        OptimizerConfig::new()
            .with_restarts(16)
            .with_random_seed(2024),
    );
    let mut session = ColoringSession::with_config(config);
    let crown = graphs::crown(4);
    session
        .apply_changes(
            &crown
                .vertices()
                .iter()
                .map(|&v| GraphChange::AddVertex(v))
                .chain(crown.edges().map(|(u, v)| GraphChange::AddEdge(u, v)))
                .collect::<Vec<_>>(),
        )
        .unwrap();

    let greedy = session
        .solve(StrategyKind::Greedy, &SolveOptions::default())
        .unwrap();
    assert_eq!(greedy.color_count(), 4);

    let two_colors = SolveOptions::new().with_max_colors(2);
    assert_eq!(
        session.solve(StrategyKind::Greedy, &two_colors),
        Err(ColoringError::NoSolutionWithinBudget { budget: 2 })
    );

    let optimized = session.optimize(StrategyKind::Greedy, &two_colors).unwrap();
    assert_eq!(optimized.color_count(), 2);
    assert!(session.is_valid_coloring());
    assert_eq!(session.statistics().unwrap().restarts, 16);
}

#[test]
fn config_file_drives_default_solve() {
    let config = ColoringConfig::from_toml_str(
        r#"
        strategy = "backtracking"

        [options]
        deadline_steps = 1000000
        "#,
    )
    .unwrap();
    let mut session = ColoringSession::with_config(config);
    let petersen = graphs::petersen();
    for &v in petersen.vertices() {
        session.add_vertex(v);
    }
    for (u, v) in petersen.edges() {
        session.add_edge(u, v).unwrap();
    }

    let coloring = session.solve_default().unwrap();
    assert_eq!(coloring.color_count(), 3);
    assert_eq!(
        session.statistics().and_then(|s| s.strategy),
        Some(StrategyKind::Backtracking)
    );
}
