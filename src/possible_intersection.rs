// Copyright (c) 2018-2021 Thomas Kramer.
// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Check two neighbouring active segments for intersections, split them at
//! newly found points and record coincidence.

use crate::classify::Coincidence;
use crate::flp::are_points_equal;
use crate::segment::{Segment, SegmentStore};
use crate::sweep_event::SweepEvent;
use iron_shapes::point::Point;
use iron_shapes::CoordinateType;
use num_traits::Float;
use std::collections::BinaryHeap;
use std::rc::Rc;

/// Handle a possible intersection of two segments that have become
/// neighbours in the status structure.
///
/// Intersection points that are not already endpoints of a segment split
/// that segment; the newly created events go into the queue. Segments found
/// to span the same two points are recorded as coincident.
pub fn possible_intersection<F>(
    a: &Rc<Segment<F>>,
    b: &Rc<Segment<F>>,
    store: &mut SegmentStore<F>,
    queue: &mut BinaryHeap<Rc<SweepEvent<F>>>,
    coincidence: &mut Coincidence,
) where
    F: CoordinateType + Float,
{
    if a.is_coincident_with(b) {
        // Identical geometry; nothing to split.
        coincidence.join(a.id(), b.id());
        return;
    }

    let intersections = a.get_intersections(b);
    if intersections.is_empty() {
        return;
    }

    for segment in [a, b].iter() {
        let split_points: Vec<Point<F>> = intersections
            .iter()
            .copied()
            .filter(|&p| {
                !are_points_equal(p, segment.left_point())
                    && !are_points_equal(p, segment.right_point())
            })
            .collect();

        if !split_points.is_empty() {
            for event in Segment::split(segment, &split_points, store) {
                queue.push(event);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn seg(store: &mut SegmentStore<f64>, a: (f64, f64), b: (f64, f64)) -> Rc<Segment<f64>> {
        store.alloc(a.into(), b.into(), 0)
    }

    #[test]
    fn crossing_neighbours_are_both_split() {
        let mut store = SegmentStore::new();
        let mut queue = BinaryHeap::new();
        let mut coincidence = Coincidence::with_capacity(2);

        let a = seg(&mut store, (0.0, 0.0), (4.0, 4.0));
        let b = seg(&mut store, (0.0, 4.0), (4.0, 0.0));

        possible_intersection(&a, &b, &mut store, &mut queue, &mut coincidence);

        // Two new segments and four new events.
        assert_eq!(store.len(), 4);
        assert_eq!(queue.len(), 4);
        assert_eq!(a.right_point(), Point::new(2.0, 2.0));
        assert_eq!(b.right_point(), Point::new(2.0, 2.0));
    }

    #[test]
    fn endpoint_touch_splits_only_the_crossed_segment() {
        let mut store = SegmentStore::new();
        let mut queue = BinaryHeap::new();
        let mut coincidence = Coincidence::with_capacity(2);

        let a = seg(&mut store, (0.0, 0.0), (4.0, 4.0));
        let b = seg(&mut store, (2.0, 2.0), (4.0, 0.0));

        possible_intersection(&a, &b, &mut store, &mut queue, &mut coincidence);

        // Only `a` is divided; the touch point is an endpoint of `b`.
        assert_eq!(store.len(), 3);
        assert_eq!(queue.len(), 2);
        assert_eq!(a.right_point(), Point::new(2.0, 2.0));
        assert_eq!(b.left_point(), Point::new(2.0, 2.0));
    }

    #[test]
    fn shared_endpoints_trigger_no_split() {
        let mut store = SegmentStore::new();
        let mut queue = BinaryHeap::new();
        let mut coincidence = Coincidence::with_capacity(2);

        let a = seg(&mut store, (0.0, 0.0), (2.0, 2.0));
        let b = seg(&mut store, (2.0, 2.0), (4.0, 0.0));

        possible_intersection(&a, &b, &mut store, &mut queue, &mut coincidence);

        assert_eq!(store.len(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn coincident_segments_are_joined() {
        let mut store = SegmentStore::new();
        let mut queue = BinaryHeap::new();
        let mut coincidence = Coincidence::with_capacity(2);

        let a = seg(&mut store, (0.0, 0.0), (2.0, 2.0));
        let b = seg(&mut store, (0.0, 0.0), (2.0, 2.0));

        possible_intersection(&a, &b, &mut store, &mut queue, &mut coincidence);

        assert_eq!(coincidence.find(a.id()), coincidence.find(b.id()));
        assert_eq!(store.len(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn partial_overlap_splits_both() {
        let mut store = SegmentStore::new();
        let mut queue = BinaryHeap::new();
        let mut coincidence = Coincidence::with_capacity(2);

        let a = seg(&mut store, (0.0, 0.0), (10.0, 0.0));
        let b = seg(&mut store, (5.0, 0.0), (15.0, 0.0));

        possible_intersection(&a, &b, &mut store, &mut queue, &mut coincidence);

        // `a` is split at (5, 0) and `b` at (10, 0); the two middle pieces
        // become coincident once the sweep reaches them.
        assert_eq!(store.len(), 4);
        assert_eq!(a.right_point(), Point::new(5.0, 0.0));
        assert_eq!(b.right_point(), Point::new(10.0, 0.0));
    }
}
