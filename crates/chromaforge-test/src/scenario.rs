//! Graphs paired with constraints.

use chromaforge_core::{ConstraintManager, Graph};

use crate::graphs;

/// A graph together with the constraints registered on it.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub graph: Graph,
    pub constraints: ConstraintManager,
}

impl Scenario {
    pub fn unconstrained(graph: Graph) -> Self {
        Self {
            graph,
            constraints: ConstraintManager::new(),
        }
    }
}

/// Path A - B - C - D as vertices 1..=4, with A fixed to color 1 and D
/// excluded from color 1.
pub fn fixed_and_excluded_path() -> Scenario {
    let mut graph = Graph::new();
    for v in 1..=4u64 {
        graph.add_vertex(v);
    }
    for (u, v) in [(1u64, 2u64), (2, 3), (3, 4)] {
        graph.add_edge(u, v).expect("path vertices exist");
    }

    let mut constraints = ConstraintManager::new();
    constraints.fix_color(1u64, 1).expect("no exclusion on A");
    constraints.exclude_color(4u64, 1).expect("D is not fixed");
    Scenario { graph, constraints }
}

/// Triangle whose vertices 0 and 1 may only use colors 1 and 2.
pub fn restricted_triangle() -> Scenario {
    let mut constraints = ConstraintManager::new();
    for v in [0u64, 1] {
        constraints.exclude_color(v, 3).expect("vertex is not fixed");
    }
    Scenario {
        graph: graphs::triangle(),
        constraints,
    }
}

/// Random graph where every tenth vertex is fixed to a color that no
/// fixed neighbor shares, and every seventh excludes color 1.
pub fn random_constrained(n: u64, m: u64, seed: u64) -> Scenario {
    let graph = graphs::random(n, m, seed);
    let mut constraints = ConstraintManager::new();

    for v in (0..n).step_by(10) {
        let taken: Vec<_> = graph
            .neighbors(v)
            .expect("vertex exists")
            .iter()
            .filter_map(|&u| constraints.fixed_color(u))
            .collect();
        let color = (1..).find(|c| !taken.contains(c)).unwrap_or(1);
        constraints.fix_color(v, color).expect("vertex has no exclusions yet");
    }
    for v in (0..n).step_by(7) {
        if constraints.fixed_color(v) != Some(1) {
            constraints.exclude_color(v, 1).expect("color 1 is not fixed here");
        }
    }
    Scenario { graph, constraints }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_constrained_has_no_fixed_conflicts() {
        let scenario = random_constrained(80, 300, 4);
        for (u, v) in scenario.graph.edges() {
            let (cu, cv) = (
                scenario.constraints.fixed_color(u),
                scenario.constraints.fixed_color(v),
            );
            if cu.is_some() {
                assert_ne!(cu, cv);
            }
        }
    }
}
