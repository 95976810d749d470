//! Chord layout for a sparse list of relationships.
//!
//! Each group's arc holds one slice per relationship touching it: first the
//! relationships it is the source of, then those it is the target of. A
//! relationship's two slices become one chord, always directed from the
//! relationship's source. Groups without weight get no arc and no padding.

use std::collections::BTreeMap;

use log::{debug, trace};

use crate::{
    error::ChordError,
    input::Relationship,
    layout::{Chord, GroupArc, Layout, LayoutParams, Subgroup, scale_factor},
    order::sorted_indices,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Source,
    Target,
}

/// The slices assigned so far to one relationship.
#[derive(Debug, Clone, Copy, Default)]
struct ChordSides {
    source: Option<Subgroup>,
    target: Option<Subgroup>,
}

/// Lays out `relationships`.
///
/// Only groups some relationship touches are considered; any further groups
/// in the index space carry no weight and would be skipped anyway.
///
/// # Errors
///
/// Returns [`ChordError::PaddingExceedsCircle`] if the padding for the
/// non-empty groups does not fit in a full turn, and
/// [`ChordError::WeightOutOfRange`] if the total weight cannot be scaled.
pub(crate) fn layout(
    relationships: &[Relationship],
    params: &LayoutParams<'_>,
) -> Result<Layout, ChordError> {
    let mut sums: BTreeMap<usize, f64> = BTreeMap::new();
    let mut total = 0.0;
    for relationship in relationships {
        let value = relationship.value();
        *sums.entry(relationship.source()).or_default() += value;
        total += value;
        if !relationship.is_self_loop() {
            *sums.entry(relationship.target()).or_default() += value;
            total += value;
        }
    }
    // Ascending by group index, the natural order.
    let group_sums: Vec<(usize, f64)> = sums.into_iter().collect();

    let padded_groups = group_sums.iter().filter(|(_, sum)| *sum != 0.0).count();
    let Some(k) = scale_factor(params.padding, padded_groups, total)? else {
        debug!(
            relationships = relationships.len();
            "Relationships carry no weight, producing empty layout"
        );
        return Ok(Layout::default());
    };

    let group_order = sorted_indices(group_sums.len(), params.sort_groups, |i| group_sums[i].1);

    let mut sides = vec![ChordSides::default(); relationships.len()];
    let mut groups = Vec::with_capacity(padded_groups);
    let mut angle = 0.0;

    for group in group_order.into_iter().map(|i| group_sums[i].0) {
        let mut slots = group_slots(relationships, group);
        if let Some(order) = params.sort_subgroups {
            slots.sort_by(|&(a, _), &(b, _)| {
                order.compare(relationships[a].value(), relationships[b].value())
            });
        }

        let group_start = angle;
        let mut group_value = 0.0;

        for (subindex, (position, side)) in slots.into_iter().enumerate() {
            let relationship = &relationships[position];
            let value = relationship.value();
            let start = angle;
            angle += value * k;
            group_value += value;

            let endpoint = Subgroup::new(group, subindex, start, angle, value);
            let entry = &mut sides[position];
            match side {
                Side::Source => {
                    entry.source = Some(endpoint);
                    if relationship.is_self_loop() {
                        entry.target = Some(endpoint);
                    }
                }
                Side::Target => entry.target = Some(endpoint),
            }
        }

        if group_value == 0.0 {
            continue;
        }
        groups.push(GroupArc::new(group, group_start, angle, group_value));
        angle += params.padding;
    }

    let mut keyed: Vec<((usize, usize), Chord)> = relationships
        .iter()
        .zip(sides)
        .filter_map(|(relationship, sides)| {
            let chord = match (sides.source, sides.target) {
                (Some(endpoint), Some(_)) if relationship.is_self_loop() => {
                    Chord::SelfLoop(endpoint)
                }
                (Some(source), Some(target)) => Chord::Simple { source, target },
                _ => return None,
            };
            Some(((relationship.source(), relationship.target()), chord))
        })
        .collect();
    // Stable, so relationships sharing a key keep their list order.
    keyed.sort_by_key(|(key, _)| *key);
    let chords: Vec<Chord> = keyed.into_iter().map(|(_, chord)| chord).collect();

    debug!(
        groups = groups.len(),
        chords = chords.len(),
        scale = k;
        "Relationship layout computed"
    );
    trace!(groups:?; "Relationship group arcs");

    Ok(Layout::new(groups, chords))
}

/// Returns the slices `group` holds, in natural order: outgoing
/// relationships (self ones included) first, then incoming ones.
/// Zero-weight relationships take no slice.
fn group_slots(relationships: &[Relationship], group: usize) -> Vec<(usize, Side)> {
    let outgoing = relationships
        .iter()
        .enumerate()
        .filter(|(_, rel)| rel.source() == group && rel.value() != 0.0)
        .map(|(position, _)| (position, Side::Source));
    let incoming = relationships
        .iter()
        .enumerate()
        .filter(|(_, rel)| rel.target() == group && !rel.is_self_loop() && rel.value() != 0.0)
        .map(|(position, _)| (position, Side::Target));

    outgoing.chain(incoming).collect()
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::order::ValueOrder;

    fn rel(source: usize, target: usize, value: f64) -> Relationship {
        Relationship::new(source, target, value)
    }

    fn run(relationships: &[Relationship], padding: f64) -> Layout {
        let params = LayoutParams {
            padding,
            ..LayoutParams::default()
        };
        layout(relationships, &params).unwrap()
    }

    #[test]
    fn test_single_self_relationship_fills_circle() {
        let layout = run(&[rel(0, 0, 5.0)], 0.0);

        assert_eq!(layout.groups().len(), 1);
        let group = layout.groups()[0];
        assert_eq!(group.index(), 0);
        assert_approx_eq!(f64, group.span(), TAU);
        assert_approx_eq!(f64, group.value(), 5.0);

        assert_eq!(layout.chords().len(), 1);
        let chord = &layout.chords()[0];
        assert!(chord.is_self_loop());
        assert!(std::ptr::eq(chord.source(), chord.target()));
        assert_approx_eq!(f64, chord.source().value(), 5.0);
    }

    #[test]
    fn test_self_relationship_leaves_room_for_padding() {
        let padding = 0.25;
        let layout = run(&[rel(0, 0, 5.0)], padding);

        assert_approx_eq!(f64, layout.groups()[0].span(), TAU - padding);
    }

    #[test]
    fn test_zero_weight_relationship_is_empty() {
        let layout = run(&[rel(0, 1, 0.0)], 0.1);
        assert!(layout.is_empty());
    }

    #[test]
    fn test_pair_lays_out_source_then_target() {
        let layout = run(&[rel(0, 1, 1.0)], 0.0);

        let groups = layout.groups();
        assert_eq!(groups.len(), 2);
        assert_approx_eq!(f64, groups[0].span(), TAU / 2.0);
        assert_approx_eq!(f64, groups[1].start_angle(), TAU / 2.0);

        let chord = &layout.chords()[0];
        assert_eq!(chord.source().index(), 0);
        assert_eq!(chord.target().index(), 1);
        assert_approx_eq!(f64, chord.target().start_angle(), TAU / 2.0);
    }

    #[test]
    fn test_outgoing_slices_precede_incoming() {
        // Group 1 receives from 0 and sends to 2.
        let layout = run(&[rel(0, 1, 1.0), rel(1, 2, 1.0)], 0.0);

        let incoming = layout.chords()[0].target();
        let outgoing = layout.chords()[1].source();
        assert_eq!(incoming.index(), 1);
        assert_eq!(outgoing.index(), 1);
        assert_eq!(outgoing.subindex(), 0);
        assert_eq!(incoming.subindex(), 1);
        assert!(outgoing.end_angle() <= incoming.start_angle());
    }

    #[test]
    fn test_source_is_not_reoriented_by_weight() {
        let layout = run(&[rel(1, 0, 1.0), rel(0, 1, 3.0)], 0.0);

        let pairs: Vec<(usize, usize)> = layout
            .chords()
            .iter()
            .map(|chord| (chord.source().index(), chord.target().index()))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_empty_groups_take_no_padding() {
        let padding = 0.5;
        let layout = run(&[rel(0, 3, 2.0)], padding);

        let indices: Vec<usize> = layout.groups().iter().map(GroupArc::index).collect();
        assert_eq!(indices, vec![0, 3]);
        assert_approx_eq!(
            f64,
            layout.groups()[1].start_angle(),
            layout.groups()[0].end_angle() + padding
        );
        assert_approx_eq!(
            f64,
            layout.total_span() + 2.0 * padding,
            TAU,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_subnormal_total_is_an_error() {
        let err = layout(&[rel(0, 1, 1e-320)], &LayoutParams::default()).unwrap_err();
        assert!(matches!(err, ChordError::WeightOutOfRange { .. }));
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let relationships = [rel(0, 1, f64::MAX), rel(1, 2, f64::MAX)];
        let err = layout(&relationships, &LayoutParams::default()).unwrap_err();
        assert_eq!(err, ChordError::WeightOutOfRange { total: f64::INFINITY });
    }

    #[test]
    fn test_duplicate_pairs_are_kept_apart() {
        let layout = run(&[rel(0, 1, 1.0), rel(0, 1, 2.0)], 0.0);

        assert_eq!(layout.chords().len(), 2);
        assert_approx_eq!(f64, layout.chords()[0].source().value(), 1.0);
        assert_approx_eq!(f64, layout.chords()[1].source().value(), 2.0);
        assert_approx_eq!(f64, layout.groups()[0].value(), 3.0);
    }

    #[test]
    fn test_zero_weight_relationship_among_others_is_skipped() {
        let layout = run(&[rel(0, 1, 0.0), rel(1, 2, 4.0)], 0.0);

        let indices: Vec<usize> = layout.groups().iter().map(GroupArc::index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert_eq!(layout.chords().len(), 1);
    }

    #[test]
    fn test_distant_group_indices_are_laid_out_compactly() {
        let far = crate::input::MAX_GROUP_INDEX;
        let layout = run(&[rel(0, far, 1.0), rel(far, far, 2.0)], 0.0);

        let indices: Vec<usize> = layout.groups().iter().map(GroupArc::index).collect();
        assert_eq!(indices, vec![0, far]);
        assert_approx_eq!(f64, layout.groups()[0].span(), TAU / 4.0);
        assert_approx_eq!(f64, layout.groups()[1].span(), TAU * 3.0 / 4.0);
        assert!(layout.chords()[1].is_self_loop());
    }

    #[test]
    fn test_sort_groups_orders_arcs_by_sum() {
        let order = ValueOrder::descending();
        let params = LayoutParams {
            sort_groups: Some(&order),
            ..LayoutParams::default()
        };
        let relationships = [rel(0, 1, 1.0), rel(2, 2, 5.0)];
        let layout = layout(&relationships, &params).unwrap();

        let indices: Vec<usize> = layout.groups().iter().map(GroupArc::index).collect();
        assert_eq!(indices, vec![2, 0, 1]);
        // The chord list keeps its key order.
        assert_eq!(layout.chords()[0].source().index(), 0);
        assert!(layout.chords()[1].is_self_loop());
    }

    #[test]
    fn test_sort_subgroups_orders_slices_by_value() {
        let order = ValueOrder::descending();
        let params = LayoutParams {
            sort_subgroups: Some(&order),
            ..LayoutParams::default()
        };
        let relationships = [rel(0, 1, 1.0), rel(0, 2, 3.0)];
        let layout = layout(&relationships, &params).unwrap();

        let heavy = layout.chords()[1].source();
        let light = layout.chords()[0].source();
        assert_eq!(heavy.subindex(), 0);
        assert_approx_eq!(f64, heavy.start_angle(), 0.0);
        assert_eq!(light.subindex(), 1);
        assert_approx_eq!(f64, light.start_angle(), heavy.end_angle());
    }

    fn relationships_strategy() -> impl Strategy<Value = Vec<Relationship>> {
        prop::collection::vec(
            (0usize..6, 0usize..6, 0.0f64..50.0).prop_map(|(s, t, v)| rel(s, t, v)),
            1..12,
        )
    }

    fn check_spans_fill_circle(
        relationships: Vec<Relationship>,
        padding: f64,
    ) -> Result<(), TestCaseError> {
        let params = LayoutParams {
            padding,
            ..LayoutParams::default()
        };
        let layout = layout(&relationships, &params).unwrap();
        if layout.is_empty() {
            return Ok(());
        }

        let covered = layout.total_span() + padding * layout.groups().len() as f64;
        prop_assert!((covered - TAU).abs() < 1e-9, "covered {covered} rad");
        Ok(())
    }

    fn check_chord_per_weighted_relationship(
        relationships: Vec<Relationship>,
    ) -> Result<(), TestCaseError> {
        let layout = layout(&relationships, &LayoutParams::default()).unwrap();
        let weighted = relationships.iter().filter(|rel| rel.value() != 0.0).count();
        prop_assert_eq!(layout.chords().len(), weighted);

        let keys: Vec<(usize, usize)> = layout
            .chords()
            .iter()
            .map(|chord| (chord.source().index(), chord.target().index()))
            .collect();
        prop_assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
        Ok(())
    }

    fn check_endpoint_spans_scale_with_value(
        relationships: Vec<Relationship>,
    ) -> Result<(), TestCaseError> {
        let layout = layout(&relationships, &LayoutParams::default()).unwrap();
        let total: f64 = relationships
            .iter()
            .map(|rel| if rel.is_self_loop() { rel.value() } else { 2.0 * rel.value() })
            .sum();
        if total == 0.0 {
            return Ok(());
        }
        let k = TAU / total;

        for chord in layout.chords() {
            for endpoint in [chord.source(), chord.target()] {
                prop_assert!(endpoint.span() >= 0.0);
                prop_assert!((endpoint.span() - endpoint.value() * k).abs() < 1e-9);
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn spans_fill_circle(relationships in relationships_strategy(), padding in 0.0f64..0.5) {
            check_spans_fill_circle(relationships, padding)?;
        }

        #[test]
        fn chord_per_weighted_relationship(relationships in relationships_strategy()) {
            check_chord_per_weighted_relationship(relationships)?;
        }

        #[test]
        fn endpoint_spans_scale_with_value(relationships in relationships_strategy()) {
            check_endpoint_spans_scale_with_value(relationships)?;
        }
    }
}
