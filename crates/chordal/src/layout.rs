//! Computed chord layouts.
//!
//! A [`Layout`] is the result of running one of the two layout algorithms:
//!
//! - [`dense`]: lays out an `n×n` [`WeightMatrix`](crate::input::WeightMatrix).
//! - [`sparse`]: lays out a list of [`Relationship`](crate::input::Relationship)s.
//!
//! All angles are in radians, measured from the start of the layout (0) and
//! growing towards `2π`. Radii and coordinates are left to the renderer.

pub(crate) mod dense;
pub(crate) mod sparse;

use std::f64::consts::TAU;

use serde::Serialize;

use crate::{error::ChordError, order::ValueOrder};

/// The arc a group occupies on the circle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GroupArc {
    index: usize,
    start_angle: f64,
    end_angle: f64,
    value: f64,
}

impl GroupArc {
    pub(crate) fn new(index: usize, start_angle: f64, end_angle: f64, value: f64) -> Self {
        Self {
            index,
            start_angle,
            end_angle,
            value,
        }
    }

    /// Returns the group index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the angle at which the arc starts.
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Returns the angle at which the arc ends.
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Returns the total weight attributed to the group.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the angular extent of the arc.
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Returns the angle halfway along the arc, useful for label placement.
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// One side of a chord: the slice of a group's arc given to one relationship.
///
/// `subindex` is the opposite group for matrix input and the slot ordinal
/// within the group's arc for relationship input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Subgroup {
    index: usize,
    subindex: usize,
    start_angle: f64,
    end_angle: f64,
    value: f64,
}

impl Subgroup {
    pub(crate) fn new(
        index: usize,
        subindex: usize,
        start_angle: f64,
        end_angle: f64,
        value: f64,
    ) -> Self {
        Self {
            index,
            subindex,
            start_angle,
            end_angle,
            value,
        }
    }

    /// Returns the index of the group this slice belongs to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the subindex of the slice.
    pub fn subindex(&self) -> usize {
        self.subindex
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Returns the raw weight the slice stands for.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// A link between two subgroups.
///
/// A self-relationship has a single slice that serves as both ends, which
/// is what [`Chord::SelfLoop`] models: `source()` and `target()` return the
/// same endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chord {
    Simple { source: Subgroup, target: Subgroup },
    SelfLoop(Subgroup),
}

impl Chord {
    /// Returns the endpoint the chord is drawn from.
    pub fn source(&self) -> &Subgroup {
        match self {
            Self::Simple { source, .. } => source,
            Self::SelfLoop(endpoint) => endpoint,
        }
    }

    /// Returns the endpoint the chord is drawn to.
    pub fn target(&self) -> &Subgroup {
        match self {
            Self::Simple { target, .. } => target,
            Self::SelfLoop(endpoint) => endpoint,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        matches!(self, Self::SelfLoop(_))
    }

    /// Returns the mean of the two endpoint values, the magnitude chords are
    /// sorted by.
    pub fn mean_value(&self) -> f64 {
        (self.source().value + self.target().value) / 2.0
    }
}

/// Group arcs and chords produced by one layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    groups: Vec<GroupArc>,
    chords: Vec<Chord>,
}

impl Layout {
    pub(crate) fn new(groups: Vec<GroupArc>, chords: Vec<Chord>) -> Self {
        Self { groups, chords }
    }

    /// Returns the group arcs in the order they appear around the circle.
    pub fn groups(&self) -> &[GroupArc] {
        &self.groups
    }

    /// Returns the chords.
    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }

    /// Looks up the arc of the group with the given index.
    ///
    /// Returns `None` for groups without an arc, such as empty groups in
    /// relationship layouts.
    pub fn group(&self, index: usize) -> Option<&GroupArc> {
        self.groups.iter().find(|group| group.index == index)
    }

    /// Returns `true` if the layout has neither groups nor chords.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.chords.is_empty()
    }

    /// Returns the sum of all group spans, excluding padding.
    pub fn total_span(&self) -> f64 {
        self.groups.iter().map(GroupArc::span).sum()
    }

    /// Stably sorts the chords by their mean value.
    pub(crate) fn sort_chords(&mut self, order: &ValueOrder) {
        self.chords
            .sort_by(|a, b| order.compare(a.mean_value(), b.mean_value()));
    }
}

/// Padding and ordering shared by both algorithms.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LayoutParams<'a> {
    pub padding: f64,
    pub sort_groups: Option<&'a ValueOrder>,
    pub sort_subgroups: Option<&'a ValueOrder>,
}

/// Converts weights into radians.
///
/// Returns `Ok(None)` when there is no weight to lay out, which callers turn
/// into an empty layout. A total that overflows, or is so small that the
/// factor itself overflows, is an error rather than infinite angles.
pub(crate) fn scale_factor(
    padding: f64,
    padded_groups: usize,
    total_weight: f64,
) -> Result<Option<f64>, ChordError> {
    if total_weight <= 0.0 {
        return Ok(None);
    }
    if !total_weight.is_finite() {
        return Err(ChordError::WeightOutOfRange {
            total: total_weight,
        });
    }

    let available = TAU - padding * padded_groups as f64;
    if available <= 0.0 {
        return Err(ChordError::PaddingExceedsCircle {
            padding,
            groups: padded_groups,
        });
    }

    let k = available / total_weight;
    if !k.is_finite() || k <= 0.0 {
        return Err(ChordError::WeightOutOfRange {
            total: total_weight,
        });
    }

    Ok(Some(k))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_scale_factor_spreads_weight_over_circle() {
        let k = scale_factor(0.0, 3, 4.0).unwrap().unwrap();
        assert_approx_eq!(f64, k, TAU / 4.0);
    }

    #[test]
    fn test_scale_factor_subtracts_padding() {
        let k = scale_factor(0.5, 2, 2.0).unwrap().unwrap();
        assert_approx_eq!(f64, k, (TAU - 1.0) / 2.0);
    }

    #[test]
    fn test_scale_factor_zero_weight_is_empty() {
        assert_eq!(scale_factor(0.1, 0, 0.0), Ok(None));
    }

    #[test]
    fn test_scale_factor_rejects_padding_beyond_circle() {
        let err = scale_factor(4.0, 2, 1.0).unwrap_err();
        assert_eq!(
            err,
            ChordError::PaddingExceedsCircle {
                padding: 4.0,
                groups: 2
            }
        );
    }

    #[test]
    fn test_scale_factor_rejects_overflowing_total() {
        let err = scale_factor(0.0, 2, f64::INFINITY).unwrap_err();
        assert!(matches!(err, ChordError::WeightOutOfRange { .. }));
    }

    #[test]
    fn test_scale_factor_rejects_subnormal_total() {
        let err = scale_factor(0.0, 2, 1e-320).unwrap_err();
        assert_eq!(err, ChordError::WeightOutOfRange { total: 1e-320 });

        // Small but normal totals still scale.
        let k = scale_factor(0.0, 2, 1e-300).unwrap().unwrap();
        assert!(k.is_finite());
    }

    #[test]
    fn test_self_loop_chord_shares_endpoint() {
        let endpoint = Subgroup::new(1, 1, 0.5, 1.5, 3.0);
        let chord = Chord::SelfLoop(endpoint);

        assert!(chord.is_self_loop());
        assert!(std::ptr::eq(chord.source(), chord.target()));
        assert_approx_eq!(f64, chord.mean_value(), 3.0);
    }

    #[test]
    fn test_mean_value_of_simple_chord() {
        let chord = Chord::Simple {
            source: Subgroup::new(0, 1, 0.0, 2.0, 2.0),
            target: Subgroup::new(1, 0, 3.0, 4.0, 1.0),
        };

        assert!(!chord.is_self_loop());
        assert_approx_eq!(f64, chord.mean_value(), 1.5);
    }

    #[test]
    fn test_sort_chords_is_stable() {
        let chord = |index: usize, value: f64| {
            Chord::SelfLoop(Subgroup::new(index, index, 0.0, value, value))
        };
        let mut layout = Layout::new(
            Vec::new(),
            vec![chord(0, 2.0), chord(1, 1.0), chord(2, 2.0), chord(3, 0.5)],
        );

        layout.sort_chords(&ValueOrder::descending());

        let order: Vec<usize> = layout.chords().iter().map(|c| c.source().index()).collect();
        assert_eq!(order, vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_group_lookup_and_spans() {
        let layout = Layout::new(
            vec![GroupArc::new(2, 0.0, 1.0, 4.0), GroupArc::new(0, 1.5, 2.0, 2.0)],
            Vec::new(),
        );

        assert_approx_eq!(f64, layout.total_span(), 1.5);
        assert_approx_eq!(f64, layout.group(0).unwrap().mid_angle(), 1.75);
        assert!(layout.group(1).is_none());
        assert!(!layout.is_empty());
        assert!(Layout::default().is_empty());
    }
}
