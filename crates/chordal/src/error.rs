//! Error types for chord layout operations.
//!
//! Every fallible operation of the crate returns [`ChordError`]. Setters
//! validate their arguments eagerly so that malformed input never reaches
//! the layout algorithms as `NaN` or infinite angles.

use thiserror::Error;

/// The main error type for chord layout operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChordError {
    #[error("matrix is not square: row {row} has {found} columns, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid weight {value} at matrix cell ({row}, {column}): weights must be finite and non-negative")]
    InvalidMatrixWeight {
        row: usize,
        column: usize,
        value: f64,
    },

    #[error("invalid weight {value} for relationship {from} -> {to}: weights must be finite and non-negative")]
    InvalidRelationshipWeight {
        from: usize,
        to: usize,
        value: f64,
    },

    #[error("group index {index} in relationship {from} -> {to} exceeds the maximum of {max}")]
    InvalidGroupIndex {
        from: usize,
        to: usize,
        index: usize,
        max: usize,
    },

    #[error("invalid padding {0}: padding must be finite and non-negative")]
    InvalidPadding(f64),

    #[error("padding of {padding} rad for {groups} groups leaves no room on the circle")]
    PaddingExceedsCircle { padding: f64, groups: usize },

    #[error("total weight {total} cannot be scaled onto the circle")]
    WeightOutOfRange { total: f64 },
}

impl ChordError {
    /// Returns `true` for errors raised while validating setter arguments.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(
            self,
            Self::PaddingExceedsCircle { .. } | Self::WeightOutOfRange { .. }
        )
    }
}
