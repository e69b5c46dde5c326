// Copyright (c) 2018-2021 Thomas Kramer.
// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The total order of active segments in the status structure.
//!
//! Two active segments are ordered by the height at which they cross the
//! sweep line. The order is stable across the joint lifetime of two segments
//! between intersections; splitting preserves it for the shortened piece
//! relative to its neighbours.

use crate::flp::{are_points_equal, compare_points, flp_compare, flp_eq, flp_lt};
use crate::segment::Segment;
use iron_shapes::point::Point;
use iron_shapes::CoordinateType;
use num_traits::Float;
use std::cmp::Ordering;
use std::rc::Rc;

/// Compare two segments by their vertical position at the sweep line.
///
/// Except for segments whose x-ranges have already separated (which sort out
/// of the way), both segments must overlap in x — otherwise they could not
/// be active at the same time.
pub fn compare_segments<F>(a: &Rc<Segment<F>>, b: &Rc<Segment<F>>) -> Ordering
where
    F: CoordinateType + Float,
{
    if Rc::ptr_eq(a, b) {
        return Ordering::Equal;
    }

    let (al, ar) = (a.left_point(), a.right_point());
    let (bl, br) = (b.left_point(), b.right_point());

    // Segments that have separated in x sort out of the way.
    if flp_lt(ar.x, bl.x) {
        return Ordering::Greater;
    }
    if flp_lt(br.x, al.x) {
        return Ordering::Less;
    }

    if a.is_colinear_with(b) {
        // Colinear segments cross the sweep line at the same height.
        // Deterministic tie-break; length is not used since it changes on
        // split.
        return compare_points(al, bl)
            .then_with(|| a.ring_in().cmp(&b.ring_in()))
            .then_with(|| a.id().cmp(&b.id()));
    }

    if are_points_equal(al, bl) {
        // Shared left endpoint: the segment angling further downward is
        // earlier. Not colinear, so b's right endpoint is strictly off a.
        return if a.is_point_below(br) {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }

    if flp_eq(al.x, bl.x) {
        // Left endpoints on one vertical: the lower one is earlier.
        return flp_compare(al.y, bl.y);
    }

    // General position: compare at the rightmore of the two left x's.
    if flp_lt(al.x, bl.x) {
        compare_with_later_start(a, bl, br)
    } else {
        compare_with_later_start(b, al, ar).reverse()
    }
}

/// `earlier` became active before the segment starting at `later_left`.
/// Order by the side of `earlier` on which the later segment starts, falling
/// back to its right endpoint when it starts exactly on `earlier`.
fn compare_with_later_start<F>(
    earlier: &Rc<Segment<F>>,
    later_left: Point<F>,
    later_right: Point<F>,
) -> Ordering
where
    F: CoordinateType + Float,
{
    if earlier.is_point_above(later_left) {
        Ordering::Less
    } else if earlier.is_point_below(later_left) {
        Ordering::Greater
    } else if earlier.is_point_above(later_right) {
        Ordering::Less
    } else if earlier.is_point_below(later_right) {
        Ordering::Greater
    } else {
        // Both endpoints on `earlier` would mean the segments are colinear,
        // which was handled before.
        panic!("internal ordering failure: segments cannot be ordered");
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::segment::SegmentStore;

    fn seg(store: &mut SegmentStore<f64>, left: (f64, f64), right: (f64, f64)) -> Rc<Segment<f64>> {
        store.alloc(left.into(), right.into(), 0)
    }

    fn seg_of_ring(
        store: &mut SegmentStore<f64>,
        left: (f64, f64),
        right: (f64, f64),
        ring: usize,
    ) -> Rc<Segment<f64>> {
        store.alloc(left.into(), right.into(), ring)
    }

    #[test]
    fn identical_segment_is_equal() {
        let mut store = SegmentStore::new();
        let s = seg(&mut store, (0.0, 0.0), (1.0, 1.0));
        assert_eq!(compare_segments(&s, &s), Ordering::Equal);
    }

    #[test]
    fn shared_left_endpoint_orders_by_angle() {
        let mut store = SegmentStore::new();
        let lower = seg(&mut store, (0.0, 0.0), (1.0, 1.0));
        let upper = seg(&mut store, (0.0, 0.0), (2.0, 2.1));

        assert_eq!(compare_segments(&lower, &upper), Ordering::Less);
        assert_eq!(compare_segments(&upper, &lower), Ordering::Greater);
    }

    #[test]
    fn left_endpoints_on_one_vertical_order_by_y() {
        let mut store = SegmentStore::new();
        let lower = seg(&mut store, (0.0, 1.0), (1.0, 1.0));
        let upper = seg(&mut store, (0.0, 2.0), (2.0, 3.0));

        assert_eq!(compare_segments(&lower, &upper), Ordering::Less);
        assert_eq!(compare_segments(&upper, &lower), Ordering::Greater);
    }

    #[test]
    fn general_position_orders_by_height_at_later_start() {
        let mut store = SegmentStore::new();
        let horizontal = seg(&mut store, (0.0, 1.0), (2.0, 1.0));
        let rising = seg(&mut store, (-1.0, 0.0), (2.0, 3.0));

        // At x = 0 the rising segment passes below the horizontal one...
        assert_eq!(compare_segments(&rising, &horizontal), Ordering::Less);
        assert_eq!(compare_segments(&horizontal, &rising), Ordering::Greater);

        // ...but a segment rising from further below stays below.
        let steep = seg(&mut store, (0.0, 1.0), (3.0, 4.0));
        let shallow = seg(&mut store, (-1.0, 0.0), (3.0, 1.0));
        assert_eq!(compare_segments(&shallow, &steep), Ordering::Less);
        assert_eq!(compare_segments(&steep, &shallow), Ordering::Greater);
    }

    #[test]
    fn vertical_after_non_vertical_at_shared_lower_endpoint() {
        let mut store = SegmentStore::new();
        let vertical = seg(&mut store, (0.0, 0.0), (0.0, 1.0));
        let rising = seg(&mut store, (0.0, 0.0), (1.0, 1.0));

        assert_eq!(compare_segments(&vertical, &rising), Ordering::Greater);
        assert_eq!(compare_segments(&rising, &vertical), Ordering::Less);
    }

    #[test]
    fn colinear_orders_by_left_endpoint_then_ring() {
        let mut store = SegmentStore::new();
        let left = seg(&mut store, (0.0, 0.0), (2.0, 0.0));
        let right = seg(&mut store, (1.0, 0.0), (3.0, 0.0));

        assert_eq!(compare_segments(&left, &right), Ordering::Less);
        assert_eq!(compare_segments(&right, &left), Ordering::Greater);

        // Coincident segments of different rings order by ring id.
        let a = seg_of_ring(&mut store, (0.0, 0.0), (1.0, 0.0), 1);
        let b = seg_of_ring(&mut store, (0.0, 0.0), (1.0, 0.0), 2);
        assert_eq!(compare_segments(&a, &b), Ordering::Less);
        assert_eq!(compare_segments(&b, &a), Ordering::Greater);

        // Coincident segments of the same ring order by segment id.
        let c = seg_of_ring(&mut store, (0.0, 0.0), (1.0, 0.0), 1);
        assert_eq!(compare_segments(&a, &c), Ordering::Less);
        assert_eq!(compare_segments(&c, &a), Ordering::Greater);
    }

    #[test]
    fn separated_x_ranges_sort_out_of_the_way() {
        let mut store = SegmentStore::new();
        let early = seg(&mut store, (0.0, 0.0), (1.0, 0.0));
        let late = seg(&mut store, (2.0, 5.0), (3.0, 5.0));

        assert_eq!(compare_segments(&early, &late), Ordering::Greater);
        assert_eq!(compare_segments(&late, &early), Ordering::Less);
    }

    #[test]
    fn order_is_antisymmetric_and_transitive_on_a_fan() {
        // A fan of segments sharing the left endpoint, plus crossing and
        // colinear extras; every pair must order consistently.
        let mut store = SegmentStore::new();
        let segments = vec![
            seg(&mut store, (0.0, 0.0), (2.0, -1.0)),
            seg(&mut store, (0.0, 0.0), (2.0, 0.0)),
            seg(&mut store, (0.0, 0.0), (2.0, 1.0)),
            seg(&mut store, (0.0, 0.0), (0.0, 1.0)),
            seg(&mut store, (-1.0, -0.5), (2.0, 0.5)),
        ];

        for a in &segments {
            for b in &segments {
                let ab = compare_segments(a, b);
                let ba = compare_segments(b, a);
                if Rc::ptr_eq(a, b) {
                    assert_eq!(ab, Ordering::Equal);
                } else {
                    assert_ne!(ab, Ordering::Equal);
                    assert_eq!(ab, ba.reverse());
                }
            }
        }
    }
}
