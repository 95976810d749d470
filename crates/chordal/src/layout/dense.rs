//! Chord layout for a dense weight matrix.
//!
//! Row `i` of the matrix is laid out as group `i`: its arc is split into one
//! slice per cell, proportional to the cell value. Every unordered pair of
//! groups with any weight between them gets one chord joining the slice for
//! `(i, j)` with the slice for `(j, i)`. The heavier direction becomes the
//! chord's source.

use log::{debug, trace};

use crate::{
    error::ChordError,
    input::WeightMatrix,
    layout::{Chord, GroupArc, Layout, LayoutParams, Subgroup, scale_factor},
    order::sorted_indices,
};

/// Lays out `matrix`.
///
/// Every group receives an arc and a trailing padding gap, including groups
/// whose row sums to zero. A matrix of all zeros yields an empty layout.
///
/// # Errors
///
/// Returns [`ChordError::PaddingExceedsCircle`] if the padding for `n`
/// groups does not fit in a full turn, and [`ChordError::WeightOutOfRange`]
/// if the matrix total overflows.
pub(crate) fn layout(
    matrix: &WeightMatrix,
    params: &LayoutParams<'_>,
) -> Result<Layout, ChordError> {
    let n = matrix.size();
    let group_sums: Vec<f64> = matrix.rows().map(|row| row.iter().sum()).collect();
    let total: f64 = group_sums.iter().sum();

    let Some(k) = scale_factor(params.padding, n, total)? else {
        debug!(groups = n; "Matrix carries no weight, producing empty layout");
        return Ok(Layout::default());
    };

    let group_order = sorted_indices(n, params.sort_groups, |i| group_sums[i]);

    // Indexed by `row * n + column`; every cell is written exactly once below.
    let mut subgroups = vec![Subgroup::default(); n * n];
    let mut groups = Vec::with_capacity(n);
    let mut angle = 0.0;

    for &row_index in &group_order {
        let row = matrix.row(row_index);
        let group_start = angle;

        for column in sorted_indices(n, params.sort_subgroups, |j| row[j]) {
            let value = row[column];
            let start = angle;
            angle += value * k;
            subgroups[row_index * n + column] =
                Subgroup::new(row_index, column, start, angle, value);
        }

        groups.push(GroupArc::new(
            row_index,
            group_start,
            angle,
            (angle - group_start) / k,
        ));
        angle += params.padding;
    }

    let mut chords = Vec::new();
    for i in 0..n {
        for j in i..n {
            let forward = subgroups[i * n + j];
            let backward = subgroups[j * n + i];
            if forward.value() != 0.0 || backward.value() != 0.0 {
                chords.push(pair_chord(forward, backward));
            }
        }
    }

    debug!(
        groups = groups.len(),
        chords = chords.len(),
        scale = k;
        "Matrix layout computed"
    );
    trace!(groups:?; "Matrix group arcs");

    Ok(Layout::new(groups, chords))
}

/// Joins the slices for `(i, j)` and `(j, i)`, heavier side first.
///
/// Ties keep `forward`, the slice on the lower row, as the source.
fn pair_chord(forward: Subgroup, backward: Subgroup) -> Chord {
    if forward.index() == backward.index() {
        Chord::SelfLoop(forward)
    } else if forward.value() < backward.value() {
        Chord::Simple {
            source: backward,
            target: forward,
        }
    } else {
        Chord::Simple {
            source: forward,
            target: backward,
        }
    }
}
