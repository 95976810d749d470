//! Input adapters for the chord layout engine.
//!
//! A diagram is described either by a dense [`WeightMatrix`] or by a sparse
//! list of [`Relationship`]s. [`Input`] holds whichever of the two is active;
//! both constructors validate their weights so that the layout algorithms
//! only ever see finite, non-negative values.

use serde::{Deserialize, Serialize};

use crate::error::ChordError;

/// The largest group index a [`Relationship`] may reference.
///
/// Keeps `index + 1` representable on every target.
pub const MAX_GROUP_INDEX: usize = (u32::MAX - 1) as usize;

/// A directed, weighted relationship between two groups.
///
/// Self-relationships (`source == target`) are legal and are laid out as a
/// single slice on the group's arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    source: usize,
    target: usize,
    value: f64,
}

impl Relationship {
    /// Creates a relationship carrying `value` from `source` to `target`.
    pub fn new(source: usize, target: usize, value: f64) -> Self {
        Self {
            source,
            target,
            value,
        }
    }

    /// Returns the index of the group the relationship flows from.
    pub fn source(&self) -> usize {
        self.source
    }

    /// Returns the index of the group the relationship flows into.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Returns the relationship weight.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns `true` if the relationship starts and ends at the same group.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Number of groups needed to hold both endpoints of this relationship.
    pub(crate) fn required_groups(&self) -> usize {
        self.source.max(self.target).saturating_add(1)
    }

    pub(crate) fn validate(&self) -> Result<(), ChordError> {
        let index = self.source.max(self.target);
        if index > MAX_GROUP_INDEX {
            return Err(ChordError::InvalidGroupIndex {
                from: self.source,
                to: self.target,
                index,
                max: MAX_GROUP_INDEX,
            });
        }
        if !is_valid_weight(self.value) {
            return Err(ChordError::InvalidRelationshipWeight {
                from: self.source,
                to: self.target,
                value: self.value,
            });
        }
        Ok(())
    }
}

/// A validated `n×n` matrix of non-negative weights, stored row-major.
///
/// `get(i, j)` is the flow from group `i` to group `j`; the matrix does not
/// need to be symmetric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct WeightMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl WeightMatrix {
    /// Builds a matrix from its rows.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::NonSquareMatrix`] if any row length differs from
    /// the number of rows, and [`ChordError::InvalidMatrixWeight`] for
    /// negative or non-finite cells.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, ChordError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(ChordError::NonSquareMatrix {
                    row,
                    expected: size,
                    found: values.len(),
                });
            }
            if let Some((column, &value)) = values
                .iter()
                .enumerate()
                .find(|(_, value)| !is_valid_weight(**value))
            {
                return Err(ChordError::InvalidMatrixWeight { row, column, value });
            }
            cells.extend(values);
        }

        Ok(Self { size, cells })
    }

    /// Returns the number of groups (rows) in the matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the weight flowing from `row` to `column`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, row: usize, column: usize) -> f64 {
        assert!(column < self.size, "column {column} out of bounds");
        self.cells[row * self.size + column]
    }

    /// Returns one row of the matrix.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.size;
        &self.cells[start..start + self.size]
    }

    /// Iterates over the rows of the matrix.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // `chunks` rejects a zero chunk size.
        self.cells.chunks(self.size.max(1))
    }
}

impl TryFrom<Vec<Vec<f64>>> for WeightMatrix {
    type Error = ChordError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<WeightMatrix> for Vec<Vec<f64>> {
    fn from(matrix: WeightMatrix) -> Self {
        matrix.rows().map(<[f64]>::to_vec).collect()
    }
}

/// The active input of a chord layout.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Dense `n×n` weight matrix.
    Matrix(WeightMatrix),
    /// Sparse list of directed relationships.
    Relationships(Vec<Relationship>),
}

impl Input {
    /// Builds a validated sparse input.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::InvalidGroupIndex`] for the first relationship
    /// referencing a group past [`MAX_GROUP_INDEX`], and
    /// [`ChordError::InvalidRelationshipWeight`] for the first one with a
    /// negative or non-finite value.
    pub fn relationships(list: Vec<Relationship>) -> Result<Self, ChordError> {
        list.iter().try_for_each(Relationship::validate)?;
        Ok(Self::Relationships(list))
    }

    /// Returns the number of groups the input itself implies.
    ///
    /// For a relationship list this is `max(source, target) + 1` over all
    /// entries, or zero for an empty list.
    pub fn group_count(&self) -> usize {
        match self {
            Self::Matrix(matrix) => matrix.size(),
            Self::Relationships(list) => list
                .iter()
                .map(Relationship::required_groups)
                .max()
                .unwrap_or(0),
        }
    }
}

fn is_valid_weight(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
