//! Fixed-color and exclusion constraints.
//!
//! The [`ConstraintManager`] validates every registration against the
//! constraints already present for the vertex and exposes the effective
//! allowed-color domain that strategies search over.


use std::collections::{BTreeMap, BTreeSet};

use crate::color::{validate_color, Color};
use crate::error::{ColoringError, Result};
use crate::graph::VertexId;

/// Plain-data constraint state.
///
/// Invariant: a vertex's fixed color never appears in its own exclusion set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintSet {
    pub fixed: BTreeMap<VertexId, Color>,
    pub excluded: BTreeMap<VertexId, BTreeSet<Color>>,
}

impl ConstraintSet {
    pub fn is_empty(&self) -> bool {
        self.fixed.is_empty() && self.excluded.is_empty()
    }

    fn check_invariant(&self) -> Result<()> {
        for (&vertex, &color) in &self.fixed {
            validate_color(color)?;
            if self
                .excluded
                .get(&vertex)
                .is_some_and(|set| set.contains(&color))
            {
                return Err(conflict(vertex, format!("fixed color {color} is excluded")));
            }
        }
        for set in self.excluded.values() {
            for &color in set {
                validate_color(color)?;
            }
        }
        Ok(())
    }
}

/// Owns and validates per-vertex constraints.
///
/// # Example
///
/// ```
/// use chromaforge_core::ConstraintManager;
///
/// let mut constraints = ConstraintManager::new();
/// constraints.fix_color(1, 2).unwrap();
/// constraints.exclude_color(3, 1).unwrap();
///
/// assert_eq!(constraints.allowed_colors(1, 1..=4).into_iter().collect::<Vec<_>>(), vec![2]);
/// assert_eq!(constraints.allowed_colors(3, 1..=3).into_iter().collect::<Vec<_>>(), vec![2, 3]);
/// assert!(constraints.exclude_color(1, 2).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConstraintManager {
    set: ConstraintSet,
    revision: u64,
}

impl ConstraintManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins a vertex to a color, replacing any previous fixed color.
    ///
    /// # Errors
    ///
    /// `ConflictingConstraint` if the color is excluded for the vertex.
    pub fn fix_color(&mut self, vertex: impl Into<VertexId>, color: Color) -> Result<()> {
        let vertex = vertex.into();
        validate_color(color)?;
        if self.is_excluded(vertex, color) {
            return Err(conflict(
                vertex,
                format!("color {color} is excluded and cannot be fixed"),
            ));
        }
        if self.set.fixed.insert(vertex, color) != Some(color) {
            self.revision += 1;
        }
        Ok(())
    }

    /// Removes a fixed color. Returns the previous one, if any.
    pub fn unfix_color(&mut self, vertex: impl Into<VertexId>) -> Option<Color> {
        let previous = self.set.fixed.remove(&vertex.into());
        if previous.is_some() {
            self.revision += 1;
        }
        previous
    }

    /// Forbids a color for a vertex.
    ///
    /// # Errors
    ///
    /// `ConflictingConstraint` if the color is the vertex's fixed color.
    pub fn exclude_color(&mut self, vertex: impl Into<VertexId>, color: Color) -> Result<()> {
        let vertex = vertex.into();
        validate_color(color)?;
        if self.fixed_color(vertex) == Some(color) {
            return Err(conflict(
                vertex,
                format!("color {color} is the fixed color and cannot be excluded"),
            ));
        }
        if self.set.excluded.entry(vertex).or_default().insert(color) {
            self.revision += 1;
        }
        Ok(())
    }

    /// Drops every constraint registered for a vertex.
    ///
    /// Returns true if anything was removed.
    pub fn clear_constraints(&mut self, vertex: impl Into<VertexId>) -> bool {
        let vertex = vertex.into();
        let had_fixed = self.set.fixed.remove(&vertex).is_some();
        let had_excluded = self.set.excluded.remove(&vertex).is_some();
        let changed = had_fixed || had_excluded;
        if changed {
            self.revision += 1;
        }
        changed
    }

    /// Effective domain of a vertex.
    ///
    /// A fixed vertex yields exactly `{fixed}` regardless of the candidates.
    /// Otherwise the candidates minus the vertex's exclusions.
    pub fn allowed_colors(
        &self,
        vertex: impl Into<VertexId>,
        candidates: impl IntoIterator<Item = Color>,
    ) -> BTreeSet<Color> {
        let vertex = vertex.into();
        if let Some(fixed) = self.fixed_color(vertex) {
            return BTreeSet::from([fixed]);
        }
        candidates
            .into_iter()
            .filter(|&c| !self.is_excluded(vertex, c))
            .collect()
    }

    /// Returns true if the vertex may take the color.
    pub fn is_allowed(&self, vertex: impl Into<VertexId>, color: Color) -> bool {
        let vertex = vertex.into();
        match self.fixed_color(vertex) {
            Some(fixed) => fixed == color,
            None => !self.is_excluded(vertex, color),
        }
    }

    pub fn fixed_color(&self, vertex: impl Into<VertexId>) -> Option<Color> {
        self.set.fixed.get(&vertex.into()).copied()
    }

    pub fn is_excluded(&self, vertex: impl Into<VertexId>, color: Color) -> bool {
        self.set
            .excluded
            .get(&vertex.into())
            .is_some_and(|set| set.contains(&color))
    }

    pub fn excluded_colors(&self, vertex: impl Into<VertexId>) -> Option<&BTreeSet<Color>> {
        self.set.excluded.get(&vertex.into())
    }

    pub fn exclusion_count(&self, vertex: impl Into<VertexId>) -> usize {
        self.excluded_colors(vertex).map_or(0, BTreeSet::len)
    }

    /// Largest fixed color, if any vertex is fixed.
    pub fn max_fixed_color(&self) -> Option<Color> {
        self.set.fixed.values().copied().max()
    }

    /// Vertices carrying at least one constraint, sorted by identifier.
    pub fn constrained_vertices(&self) -> BTreeSet<VertexId> {
        self.set
            .fixed
            .keys()
            .chain(self.set.excluded.keys())
            .copied()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn constraint_set(&self) -> &ConstraintSet {
        &self.set
    }

    /// Replaces every constraint with a validated set.
    pub fn restore(&mut self, set: ConstraintSet) -> Result<()> {
        set.check_invariant()?;
        self.set = set;
        self.revision += 1;
        Ok(())
    }

    /// Constraint revision, bumped by every change.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

fn conflict(vertex: VertexId, reason: String) -> ColoringError {
    ColoringError::ConflictingConstraint { vertex, reason }
}
