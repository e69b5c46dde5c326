// Copyright (c) 2018-2021 Thomas Kramer.
// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Sweep events: the endpoint markers driving the sweep.

use crate::flp::{compare_points, compare_vector_angles};
use crate::segment::Segment;
use iron_shapes::point::Point;
use iron_shapes::CoordinateType;
use num_traits::Float;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::{Rc, Weak};

/// A marker at one endpoint of a segment.
///
/// Each segment is referenced by exactly two events, one per endpoint; the
/// event at the lexicographically smaller endpoint is the left event. The
/// role of an event never changes, but a split re-targets the original right
/// event to the newly created segment.
#[derive(Debug)]
pub struct SweepEvent<F: CoordinateType> {
    /// The endpoint this event marks.
    pub point: Point<F>,
    is_left: bool,
    /// Back-reference to the owning segment. Borrow checking happens at
    /// runtime.
    segment: RefCell<Weak<Segment<F>>>,
}

impl<F: CoordinateType + Float> SweepEvent<F> {
    pub fn new_rc(point: Point<F>, is_left: bool) -> Rc<Self> {
        Rc::new(SweepEvent {
            point,
            is_left,
            segment: RefCell::new(Weak::new()),
        })
    }

    /// Is this the left endpoint of its segment?
    pub fn is_left(&self) -> bool {
        self.is_left
    }

    pub fn is_right(&self) -> bool {
        !self.is_left
    }

    /// The owning segment.
    pub fn segment(&self) -> Rc<Segment<F>> {
        self.segment
            .borrow()
            .upgrade()
            .expect("sweep event is not attached to a segment")
    }

    pub fn set_segment(&self, segment: &Rc<Segment<F>>) {
        *self.segment.borrow_mut() = Rc::downgrade(segment);
    }
}

/// Queue order of two events: lexicographic point order first; at the same
/// point right events precede left events, so that a closing segment leaves
/// the status structure before an opening one enters; two events of the same
/// role prefer the lower segment, so that a segment entering the status
/// structure finds its lower neighbours already present. Colinear segments
/// tie-break on the segment id.
pub fn compare_events<F>(a: &SweepEvent<F>, b: &SweepEvent<F>) -> Ordering
where
    F: CoordinateType + Float,
{
    compare_points(a.point, b.point)
        .then_with(|| a.is_left.cmp(&b.is_left))
        .then_with(|| compare_same_point_same_role(a, b))
}

/// Break the tie between two events of the same role at the same point by
/// the angle of their segments: the lower segment goes first.
fn compare_same_point_same_role<F>(a: &SweepEvent<F>, b: &SweepEvent<F>) -> Ordering
where
    F: CoordinateType + Float,
{
    let seg_a = a.segment();
    let seg_b = b.segment();

    // The other endpoint of b tells on which side of a's segment it runs.
    let reference = if b.is_left {
        seg_b.right_point()
    } else {
        seg_b.left_point()
    };

    match compare_vector_angles(reference, seg_a.left_point(), seg_a.right_point()) {
        // b runs above a.
        Ordering::Greater => Ordering::Less,
        // b runs below a.
        Ordering::Less => Ordering::Greater,
        // Colinear segments are indistinguishable by angle.
        Ordering::Equal => seg_a.id().cmp(&seg_b.id()),
    }
}

impl<F: CoordinateType + Float> PartialEq for SweepEvent<F> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<F: CoordinateType + Float> Eq for SweepEvent<F> {}

impl<F: CoordinateType + Float> PartialOrd for SweepEvent<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: CoordinateType + Float> Ord for SweepEvent<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Note that the order is reversed because the queue is a max-heap
        // and must pop the leftmost event first.
        compare_events(other, self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::segment::SegmentStore;

    fn event_pair(
        store: &mut SegmentStore<f64>,
        left: (f64, f64),
        right: (f64, f64),
    ) -> (Rc<SweepEvent<f64>>, Rc<SweepEvent<f64>>) {
        let segment = store.alloc(left.into(), right.into(), 0);
        (segment.left(), segment.right())
    }

    #[test]
    fn pops_leftmost_point_first() {
        let mut store = SegmentStore::new();
        let (left, right) = event_pair(&mut store, (0.0, 0.0), (1.0, 0.0));

        // Reversed ordering: the left event is the greater heap element.
        assert!(left > right);
    }

    #[test]
    fn on_equal_x_pops_lower_y_first() {
        let mut store = SegmentStore::new();
        let (lower, _) = event_pair(&mut store, (0.0, 0.0), (1.0, 0.0));
        let (upper, _) = event_pair(&mut store, (0.0, 1.0), (1.0, 1.0));

        assert!(lower > upper);
    }

    #[test]
    fn right_events_pop_before_left_events() {
        let mut store = SegmentStore::new();
        let (_, closing) = event_pair(&mut store, (0.0, 0.0), (1.0, 1.0));
        let (opening, _) = event_pair(&mut store, (1.0, 1.0), (2.0, 0.0));

        assert!(closing > opening);
    }

    #[test]
    fn same_point_left_events_pop_lower_segment_first() {
        let mut store = SegmentStore::new();
        let (horizontal, _) = event_pair(&mut store, (0.0, 0.0), (5.0, 0.0));
        let (rising, _) = event_pair(&mut store, (0.0, 0.0), (5.0, 5.0));
        let (vertical, _) = event_pair(&mut store, (0.0, 0.0), (0.0, 5.0));

        assert_eq!(compare_events(&horizontal, &rising), Ordering::Less);
        assert_eq!(compare_events(&rising, &horizontal), Ordering::Greater);
        assert_eq!(compare_events(&rising, &vertical), Ordering::Less);
        assert_eq!(compare_events(&horizontal, &vertical), Ordering::Less);
    }

    #[test]
    fn colinear_events_tie_break_on_segment_id() {
        let mut store = SegmentStore::new();
        let (first, _) = event_pair(&mut store, (0.0, 0.0), (1.0, 1.0));
        let (second, _) = event_pair(&mut store, (0.0, 0.0), (2.0, 2.0));

        assert_eq!(compare_events(&first, &second), Ordering::Less);
        assert_eq!(compare_events(&second, &first), Ordering::Greater);
    }
}
