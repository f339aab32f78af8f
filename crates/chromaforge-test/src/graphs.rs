//! Graph families.
//!
//! Every builder numbers vertices `0..n` in insertion order.

use chromaforge_core::Graph;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn with_vertices(n: u64) -> Graph {
    let mut graph = Graph::with_capacity(n as usize);
    for v in 0..n {
        graph.add_vertex(v);
    }
    graph
}

fn connect(graph: &mut Graph, u: u64, v: u64) {
    graph
        .add_edge(u, v)
        .expect("fixture edges join existing, distinct vertices");
}

/// Path `0 - 1 - ... - (n-1)`.
pub fn path(n: u64) -> Graph {
    let mut graph = with_vertices(n);
    for v in 1..n {
        connect(&mut graph, v - 1, v);
    }
    graph
}

/// Cycle on `n >= 3` vertices.
pub fn cycle(n: u64) -> Graph {
    assert!(n >= 3, "a cycle needs at least 3 vertices");
    let mut graph = path(n);
    connect(&mut graph, n - 1, 0);
    graph
}

/// Complete graph `K_n`.
pub fn complete(n: u64) -> Graph {
    let mut graph = with_vertices(n);
    for u in 0..n {
        for v in u + 1..n {
            connect(&mut graph, u, v);
        }
    }
    graph
}

/// `K_3` on vertices 0, 1, 2.
pub fn triangle() -> Graph {
    complete(3)
}

/// Complete bipartite graph `K_{a,b}`: vertices `0..a` on one side and
/// `a..a+b` on the other.
pub fn complete_bipartite(a: u64, b: u64) -> Graph {
    let mut graph = with_vertices(a + b);
    for u in 0..a {
        for v in a..a + b {
            connect(&mut graph, u, v);
        }
    }
    graph
}

/// Star with center 0 and `leaves` leaves.
pub fn star(leaves: u64) -> Graph {
    let mut graph = with_vertices(leaves + 1);
    for v in 1..=leaves {
        connect(&mut graph, 0, v);
    }
    graph
}

/// Crown graph on `2n` vertices, interleaved so that greedy coloring in
/// insertion order uses `n` colors although the graph is bipartite.
///
/// Vertex `2i` is `u_i` and `2i + 1` is `v_i`; `u_i` and `v_j` are adjacent
/// iff `i != j`.
pub fn crown(n: u64) -> Graph {
    let mut graph = with_vertices(2 * n);
    for i in 0..n {
        for j in 0..n {
            if i != j {
                connect(&mut graph, 2 * i, 2 * j + 1);
            }
        }
    }
    graph
}

/// The Petersen graph: outer cycle 0..5, inner pentagram 5..10, spokes.
pub fn petersen() -> Graph {
    let mut graph = with_vertices(10);
    for i in 0..5 {
        connect(&mut graph, i, (i + 1) % 5);
        connect(&mut graph, 5 + i, 5 + (i + 2) % 5);
        connect(&mut graph, i, 5 + i);
    }
    graph
}

/// Random simple graph with `n` vertices and `m` distinct edges.
///
/// `m` is capped at `n * (n - 1) / 2`. The same seed always yields the same
/// graph.
pub fn random(n: u64, m: u64, seed: u64) -> Graph {
    let mut graph = with_vertices(n);
    let max_edges = n * n.saturating_sub(1) / 2;
    let target = m.min(max_edges) as usize;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    while graph.edge_count() < target {
        let u = rng.random_range(0..n);
        let v = rng.random_range(0..n);
        if u != v {
            connect(&mut graph, u, v);
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_sizes() {
        assert_eq!(path(5).edge_count(), 4);
        assert_eq!(cycle(5).edge_count(), 5);
        assert_eq!(complete(5).edge_count(), 10);
        assert_eq!(complete_bipartite(2, 3).edge_count(), 6);
        assert_eq!(star(4).max_degree(), 4);
        assert_eq!(crown(3).edge_count(), 6);

        let petersen = petersen();
        assert_eq!(petersen.vertex_count(), 10);
        assert_eq!(petersen.edge_count(), 15);
        assert_eq!(petersen.max_degree(), 3);
    }

    #[test]
    fn test_random_is_seeded() {
        let a = random(30, 60, 9);
        let b = random(30, 60, 9);
        assert_eq!(a.edge_count(), 60);
        assert_eq!(a.edges().collect::<Vec<_>>(), b.edges().collect::<Vec<_>>());
    }

    #[test]
    fn test_random_caps_edges() {
        assert_eq!(random(4, 100, 1).edge_count(), 6);
        assert_eq!(random(0, 10, 1).edge_count(), 0);
    }
}
