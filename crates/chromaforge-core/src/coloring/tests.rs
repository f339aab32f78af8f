use super::*;
use crate::error::ColoringError;

fn triangle() -> Graph {
    let mut graph = Graph::new();
    for v in 1..=3 {
        graph.add_vertex(v);
    }
    graph.add_edge(1, 2).unwrap();
    graph.add_edge(2, 3).unwrap();
    graph.add_edge(1, 3).unwrap();
    graph
}

fn coloring(pairs: &[(u64, Color)]) -> Coloring {
    pairs.iter().map(|&(v, c)| (VertexId(v), c)).collect()
}

#[test]
fn test_valid_triangle_coloring() {
    let graph = triangle();
    let constraints = ConstraintManager::new();
    let c = coloring(&[(1, 1), (2, 2), (3, 3)]);

    assert!(c.is_valid_for(&graph, &constraints));
    assert_eq!(c.color_count(), 3);
    assert_eq!(c.max_color(), 3);
}

#[test]
fn test_adjacent_conflict_reported_once() {
    let graph = triangle();
    let constraints = ConstraintManager::new();
    let c = coloring(&[(1, 1), (2, 1), (3, 2)]);

    assert_eq!(
        c.violations(&graph, &constraints),
        vec![Violation::AdjacentConflict {
            u: VertexId(1),
            v: VertexId(2),
            color: 1
        }]
    );
}

#[test]
fn test_partial_coloring_is_invalid() {
    let graph = triangle();
    let constraints = ConstraintManager::new();
    let c = coloring(&[(1, 1), (2, 2)]);

    assert_eq!(
        c.violations(&graph, &constraints),
        vec![Violation::Uncolored(VertexId(3))]
    );
}

#[test]
fn test_constraint_violations() {
    let graph = triangle();
    let mut constraints = ConstraintManager::new();
    constraints.fix_color(1, 3).unwrap();
    constraints.exclude_color(2, 2).unwrap();
    let c = coloring(&[(1, 1), (2, 2), (3, 3)]);

    let violations = c.violations(&graph, &constraints);
    assert!(violations.contains(&Violation::FixedMismatch {
        vertex: VertexId(1),
        expected: 3,
        actual: 1
    }));
    assert!(violations.contains(&Violation::ExcludedColor {
        vertex: VertexId(2),
        color: 2
    }));
}

#[test]
fn test_unknown_vertex_reported() {
    let graph = triangle();
    let constraints = ConstraintManager::new();
    let c = coloring(&[(1, 1), (2, 2), (3, 3), (9, 1)]);

    assert_eq!(
        c.violations(&graph, &constraints),
        vec![Violation::UnknownVertex(VertexId(9))]
    );
}

#[test]
fn test_staleness_follows_revisions() {
    let mut graph = triangle();
    let mut constraints = ConstraintManager::new();
    let c = Coloring::for_state(&graph, &constraints);
    assert!(!c.is_stale(&graph, &constraints));

    constraints.exclude_color(1, 5).unwrap();
    assert!(c.is_stale(&graph, &constraints));

    let c = Coloring::for_state(&graph, &constraints);
    graph.remove_edge(1, 2).unwrap();
    assert!(c.is_stale(&graph, &constraints));
}

#[test]
fn test_apply_to_and_read_back() {
    let mut graph = triangle();
    let constraints = ConstraintManager::new();
    coloring(&[(1, 1), (2, 2), (3, 3)]).apply_to(&mut graph).unwrap();

    assert_eq!(graph.color(2), Some(2));
    let stored = Coloring::from_graph(&graph, &constraints);
    assert!(stored.is_valid_for(&graph, &constraints));
}

#[test]
fn test_apply_to_rejects_color_zero_without_writing() {
    let mut graph = triangle();
    let result = coloring(&[(1, 1), (2, 0), (3, 3)]).apply_to(&mut graph);

    assert_eq!(result, Err(ColoringError::InvalidColor(0)));
    assert_eq!(graph.color(1), None);
}

#[test]
fn test_empty_coloring_of_empty_graph_is_valid() {
    let graph = Graph::new();
    let constraints = ConstraintManager::new();
    let c = Coloring::for_state(&graph, &constraints);

    assert!(c.is_empty());
    assert_eq!(c.color_count(), 0);
    assert!(c.is_valid_for(&graph, &constraints));
}

#[test]
fn test_collected_coloring_is_unbound() {
    let graph = triangle();
    let constraints = ConstraintManager::new();
    let c = coloring(&[(1, 1), (2, 2), (3, 3)]);

    assert!(c.is_stale(&graph, &constraints));
    assert!(c.is_valid_for(&graph, &constraints));
}

#[test]
fn test_from_assignments_binds_current_state() {
    let graph = triangle();
    let constraints = ConstraintManager::new();
    let c = Coloring::from_assignments(
        &graph,
        &constraints,
        [(VertexId(1), 1), (VertexId(2), 2), (VertexId(3), 3)],
    );

    assert!(!c.is_stale(&graph, &constraints));
    assert_eq!(c.graph_revision(), graph.revision());
    assert_eq!(c.used_colors(), BTreeSet::from([1, 2, 3]));
}
