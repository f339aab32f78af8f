//! Dense working view of a graph and its constraints.
//!
//! Strategies never touch the [`Graph`] directly while searching. They walk a
//! [`ColoringProblem`], which indexes vertices densely and borrows the graph
//! and the [`ConstraintManager`] for the duration of one solve.

use std::cmp::Reverse;
use std::collections::HashMap;

use chromaforge_config::VertexOrder;
use chromaforge_core::{
    Color, Coloring, ColoringError, ConstraintManager, Graph, Result, VertexId, FIRST_COLOR,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// Marker for an unassigned slot in a dense color vector.
pub const UNASSIGNED: Color = 0;

/// A graph and its constraints, indexed `0..len()` in graph insertion order.
#[derive(Debug, Clone)]
pub struct ColoringProblem<'a> {
    graph: &'a Graph,
    constraints: &'a ConstraintManager,
    vertices: Vec<VertexId>,
    adjacency: Vec<Vec<usize>>,
    fixed: Vec<Option<Color>>,
    order: Vec<usize>,
}

impl<'a> ColoringProblem<'a> {
    /// Builds the view and resolves the visiting order.
    pub fn new(graph: &'a Graph, constraints: &'a ConstraintManager, order: VertexOrder) -> Self {
        let vertices = graph.vertices().to_vec();
        let index: HashMap<VertexId, usize> =
            vertices.iter().enumerate().map(|(i, v)| (*v, i)).collect();

        let adjacency: Vec<Vec<usize>> = vertices
            .iter()
            .map(|v| {
                graph
                    .neighbors(*v)
                    .map(|ns| {
                        ns.iter()
                            .filter_map(|n| index.get(n).copied())
                            .collect::<Vec<usize>>()
                    })
                    .unwrap_or_default()
            })
            .collect();
        let fixed: Vec<Option<Color>> = vertices
            .iter()
            .map(|v| constraints.fixed_color(*v))
            .collect();

        let mut problem = Self {
            graph,
            constraints,
            vertices,
            adjacency,
            fixed,
            order: Vec::new(),
        };
        problem.order = match order {
            VertexOrder::InsertionOrder => (0..problem.len()).collect(),
            VertexOrder::DegreeDescending => problem.degree_descending_order(),
        };
        problem
    }

    /// Returns a copy visiting vertices in the given order.
    pub fn with_order(&self, order: Vec<usize>) -> Self {
        debug_assert_eq!(order.len(), self.len());
        Self {
            order,
            ..self.clone()
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    pub fn constraints(&self) -> &'a ConstraintManager {
        self.constraints
    }

    pub fn vertex(&self, index: usize) -> VertexId {
        self.vertices[index]
    }

    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.adjacency[index]
    }

    pub fn degree(&self, index: usize) -> usize {
        self.adjacency[index].len()
    }

    pub fn fixed(&self, index: usize) -> Option<Color> {
        self.fixed[index]
    }

    /// Visiting order of the strategies.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Returns true if the constraints allow the color for this vertex.
    pub fn is_allowed(&self, index: usize, color: Color) -> bool {
        self.constraints.is_allowed(self.vertices[index], color)
    }

    /// Returns true if no neighbor currently holds the color.
    pub fn is_conflict_free(&self, index: usize, color: Color, colors: &[Color]) -> bool {
        self.adjacency[index].iter().all(|&n| colors[n] != color)
    }

    /// Returns true if the vertex may take the color given the current
    /// assignment of its neighbors.
    pub fn can_take(&self, index: usize, color: Color, colors: &[Color]) -> bool {
        self.is_allowed(index, color) && self.is_conflict_free(index, color, colors)
    }

    /// Returns true if no vertex of the problem carries a constraint.
    pub fn is_unconstrained(&self) -> bool {
        self.vertices.iter().all(|v| {
            self.constraints.fixed_color(*v).is_none() && self.constraints.exclusion_count(*v) == 0
        })
    }

    pub fn max_fixed_color(&self) -> Option<Color> {
        self.fixed.iter().flatten().copied().max()
    }

    /// Smallest budget worth searching.
    pub fn color_lower_bound(&self) -> Color {
        let edges = if self.adjacency.iter().any(|ns| !ns.is_empty()) {
            2
        } else {
            FIRST_COLOR
        };
        self.max_fixed_color().unwrap_or(FIRST_COLOR).max(edges)
    }

    /// A budget under which a coloring is guaranteed to exist.
    ///
    /// A free vertex with degree `d` and `e` exclusions always finds a color
    /// in `1..=d + e + 1`.
    pub fn color_upper_bound(&self) -> Color {
        let free = (0..self.len())
            .filter(|&i| self.fixed[i].is_none())
            .map(|i| {
                let exclusions = self.constraints.exclusion_count(self.vertices[i]);
                (self.degree(i) + exclusions + 1) as Color
            })
            .max()
            .unwrap_or(FIRST_COLOR);
        free.max(self.max_fixed_color().unwrap_or(FIRST_COLOR))
    }

    /// Fails if two adjacent vertices are fixed to the same color.
    pub fn check_fixed_conflicts(&self) -> Result<()> {
        for (i, neighbors) in self.adjacency.iter().enumerate() {
            let Some(color) = self.fixed[i] else {
                continue;
            };
            if let Some(&n) = neighbors
                .iter()
                .find(|&&n| n > i && self.fixed[n] == Some(color))
            {
                return Err(ColoringError::ConstraintUnsatisfiable(format!(
                    "adjacent vertices {} and {} are both fixed to color {color}",
                    self.vertices[i], self.vertices[n]
                )));
            }
        }
        Ok(())
    }

    /// Dense color vector with only the fixed vertices assigned.
    pub fn initial_colors(&self) -> Vec<Color> {
        self.fixed.iter().map(|c| c.unwrap_or(UNASSIGNED)).collect()
    }

    /// Highest degree first, ties broken by identifier.
    pub fn degree_descending_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by_key(|&i| (Reverse(self.degree(i)), self.vertices[i]));
        order
    }

    /// Highest degree first, ties broken randomly.
    pub fn shuffled_degree_order<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(rng);
        order.sort_by_key(|&i| Reverse(self.degree(i)));
        order
    }

    /// Reads a coloring into a dense color vector.
    pub fn dense_colors(&self, coloring: &Coloring) -> Vec<Color> {
        self.vertices
            .iter()
            .map(|v| coloring.get(*v).unwrap_or(UNASSIGNED))
            .collect()
    }

    /// Materializes a dense color vector. Unassigned slots are omitted.
    pub fn to_coloring(&self, colors: &[Color]) -> Coloring {
        let mut coloring = Coloring::for_state(self.graph, self.constraints);
        for (i, &color) in colors.iter().enumerate() {
            if color != UNASSIGNED {
                coloring.insert(self.vertices[i], color);
            }
        }
        coloring
    }
}
