// Copyright (c) 2018-2021 Thomas Kramer.
// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Segments: the undirected edges tracked through the sweep.
//!
//! Segments are created when the input rings are decomposed and by
//! splitting; none is destroyed before the computation tears down. A split
//! shortens the segment in place and allocates a new segment for the right
//! part, transferring the original right event object to it so that the
//! event's queue entry stays valid.

use crate::bbox::Bbox;
use crate::classify::Classification;
use crate::flp::{are_points_equal, compare_points, compare_vector_angles, cross, flp_eq, flp_lt};
use crate::operand::RingId;
use crate::sweep_event::SweepEvent;
use iron_shapes::edge::Edge;
use iron_shapes::point::Point;
use iron_shapes::vector::Vector;
use iron_shapes::CoordinateType;
use num_traits::Float;
use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::rc::{Rc, Weak};

/// An undirected edge of one input ring.
#[derive(Debug)]
pub struct Segment<F: CoordinateType> {
    id: usize,
    ring_in: RingId,
    left_se: RefCell<Rc<SweepEvent<F>>>,
    right_se: RefCell<Rc<SweepEvent<F>>>,
    /// The segment immediately below this one in the status structure at the
    /// moment this segment became active.
    prev: RefCell<Weak<Segment<F>>>,
    /// The result ring the stitcher assigned this segment to.
    ring_out: Cell<Option<usize>>,
    /// Derived boundary classification, filled after the sweep.
    pub(crate) classification: RefCell<Classification>,
    is_in_result: Cell<bool>,
}

impl<F: CoordinateType + Float> Segment<F> {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn ring_in(&self) -> RingId {
        self.ring_in
    }

    pub fn left(&self) -> Rc<SweepEvent<F>> {
        self.left_se.borrow().clone()
    }

    pub fn right(&self) -> Rc<SweepEvent<F>> {
        self.right_se.borrow().clone()
    }

    pub fn left_point(&self) -> Point<F> {
        self.left_se.borrow().point
    }

    pub fn right_point(&self) -> Point<F> {
        self.right_se.borrow().point
    }

    /// The geometric edge, directed from the left endpoint to the right.
    pub fn edge(&self) -> Edge<F> {
        Edge::new(self.left_point(), self.right_point())
    }

    /// The vector from the left endpoint to the right.
    pub fn vector(&self) -> Vector<F> {
        self.edge().vector()
    }

    pub fn bbox(&self) -> Bbox<F> {
        Bbox::of_points(self.left_point(), self.right_point())
    }

    pub fn is_vertical(&self) -> bool {
        flp_eq(self.left_point().x, self.right_point().x)
    }

    /// The event of this segment paired with `event`.
    /// Panics if `event` does not belong to this segment.
    pub fn other_se(&self, event: &Rc<SweepEvent<F>>) -> Rc<SweepEvent<F>> {
        if Rc::ptr_eq(event, &self.left_se.borrow()) {
            self.right()
        } else if Rc::ptr_eq(event, &self.right_se.borrow()) {
            self.left()
        } else {
            panic!("event does not belong to this segment")
        }
    }

    /// Does `p` lie on this segment (endpoints included)?
    pub fn is_point_on(&self, p: Point<F>) -> bool {
        self.bbox().contains(p)
            && compare_vector_angles(p, self.left_point(), self.right_point()) == Ordering::Equal
    }

    /// Are both endpoints of `other` colinear with this segment?
    pub fn is_colinear_with(&self, other: &Segment<F>) -> bool {
        let (l, r) = (self.left_point(), self.right_point());
        compare_vector_angles(other.left_point(), l, r) == Ordering::Equal
            && compare_vector_angles(other.right_point(), l, r) == Ordering::Equal
    }

    /// Do both segments span the same two points (within tolerance)?
    pub fn is_coincident_with(&self, other: &Segment<F>) -> bool {
        are_points_equal(self.left_point(), other.left_point())
            && are_points_equal(self.right_point(), other.right_point())
    }

    /// Is `p` strictly above this segment? An endpoint of the segment is
    /// neither above nor below.
    pub fn is_point_above(&self, p: Point<F>) -> bool {
        compare_vector_angles(p, self.left_point(), self.right_point()) == Ordering::Greater
    }

    /// Is `p` strictly below this segment?
    pub fn is_point_below(&self, p: Point<F>) -> bool {
        compare_vector_angles(p, self.left_point(), self.right_point()) == Ordering::Less
    }

    pub fn register_prev(&self, prev: &Rc<Segment<F>>) {
        *self.prev.borrow_mut() = Rc::downgrade(prev);
    }

    pub fn prev(&self) -> Option<Rc<Segment<F>>> {
        self.prev.borrow().upgrade()
    }

    /// Nearest segment below this one (via the `prev` chain) that belongs to
    /// the given ring.
    pub fn prev_of_ring(&self, ring: RingId) -> Option<Rc<Segment<F>>> {
        let mut below = self.prev();
        while let Some(p) = below {
            if p.ring_in() == ring {
                return Some(p);
            }
            below = p.prev();
        }
        None
    }

    pub fn register_ring_out(&self, ring: usize) {
        self.ring_out.set(Some(ring));
    }

    pub fn ring_out(&self) -> Option<usize> {
        self.ring_out.get()
    }

    pub fn mark_in_result(&self) {
        self.is_in_result.set(true);
    }

    pub fn is_in_result(&self) -> bool {
        self.is_in_result.get()
    }

    /// Intersection points with `other`: none, one, or — for colinear
    /// overlaps — two, in sweep order.
    ///
    /// Intersections at existing endpoints are reported as exactly those
    /// endpoints, without rounding: every corner of the bounding-box overlap
    /// that is an endpoint of one segment and lies on the other
    /// short-circuits the parameterised general case.
    pub fn get_intersections(&self, other: &Segment<F>) -> Vec<Point<F>> {
        // Disjoint boxes cannot intersect.
        let overlap = match self.bbox().overlap(&other.bbox()) {
            None => return Vec::new(),
            Some(overlap) => overlap,
        };

        let endpoints = [
            self.left_point(),
            self.right_point(),
            other.left_point(),
            other.right_point(),
        ];

        let mut touches: Vec<Point<F>> = Vec::new();
        for corner in overlap.corners() {
            // Snap the corner to the endpoint it stems from; the reported
            // intersection must be the exact endpoint.
            let endpoint = endpoints.iter().find(|&&e| are_points_equal(e, corner));
            if let Some(&endpoint) = endpoint {
                if self.is_point_on(endpoint) && other.is_point_on(endpoint) {
                    touches.push(endpoint);
                }
            }
        }
        if !touches.is_empty() {
            touches.sort_by(|&a, &b| compare_points(a, b));
            touches.dedup_by(|a, b| are_points_equal(*a, *b));
            return touches;
        }

        // General position: parameterise both segments and solve for the
        // crossing (Schneider & Eberly).
        let (al, ar) = (self.left_point(), self.right_point());
        let (bl, br) = (other.left_point(), other.right_point());
        let (ex, ey) = (ar.x - al.x, ar.y - al.y);
        let (fx, fy) = (br.x - bl.x, br.y - bl.y);

        let denom = cross(ex, ey, fx, fy);
        if flp_eq(denom, F::zero()) {
            // Parallel without an endpoint touch.
            return Vec::new();
        }

        let (gx, gy) = (bl.x - al.x, bl.y - al.y);
        let s = cross(gx, gy, fx, fy) / denom;
        let t = cross(gx, gy, ex, ey) / denom;

        let (zero, one) = (F::zero(), F::one());
        if flp_lt(s, zero) || flp_lt(one, s) || flp_lt(t, zero) || flp_lt(one, t) {
            return Vec::new();
        }

        // Both parameterisations give the same point up to rounding; their
        // midpoint is marginally more stable than either estimate.
        let half = F::from(0.5).unwrap();
        let p1 = Point::new(al.x + s * ex, al.y + s * ey);
        let p2 = Point::new(bl.x + t * fx, bl.y + t * fy);
        vec![Point::new((p1.x + p2.x) * half, (p1.y + p2.y) * half)]
    }

    /// Split the segment at the given interior points.
    ///
    /// The leftmost point shortens this segment in place; the rest of the
    /// geometry moves to newly allocated segments carrying over `ring_in`.
    /// Returns the newly created events — one right, one left per split
    /// point — which the caller must push into the queue.
    ///
    /// Panics if a split point coincides with an endpoint, which would
    /// create a zero-length piece.
    pub fn split(
        this: &Rc<Segment<F>>,
        points: &[Point<F>],
        store: &mut SegmentStore<F>,
    ) -> Vec<Rc<SweepEvent<F>>> {
        let mut points = points.to_vec();
        points.sort_by(|&a, &b| compare_points(a, b));
        points.dedup_by(|a, b| are_points_equal(*a, *b));

        let mut new_events = Vec::with_capacity(points.len() * 2);
        let mut target = this.clone();
        for p in points {
            assert!(
                !are_points_equal(p, target.left_point())
                    && !are_points_equal(p, target.right_point()),
                "split point coincides with a segment endpoint"
            );
            debug_assert!(target.is_point_on(p), "split point must lie on the segment");

            let old_right = target.right();
            let new_segment = store.alloc_split(p, old_right, target.ring_in);

            let new_right = SweepEvent::new_rc(p, false);
            new_right.set_segment(&target);
            *target.right_se.borrow_mut() = new_right.clone();

            new_events.push(new_right);
            new_events.push(new_segment.left());
            target = new_segment;
        }
        new_events
    }
}

/// Arena of all segments of one computation.
#[derive(Debug)]
pub struct SegmentStore<F: CoordinateType> {
    segments: Vec<Rc<Segment<F>>>,
}

impl<F: CoordinateType + Float> SegmentStore<F> {
    pub fn new() -> Self {
        SegmentStore { segments: Vec::new() }
    }

    /// Create a segment between two distinct points of `ring_in` and its two
    /// endpoint events.
    ///
    /// Panics if the points are tolerantly equal.
    pub fn alloc(&mut self, a: Point<F>, b: Point<F>, ring_in: RingId) -> Rc<Segment<F>> {
        assert!(
            !are_points_equal(a, b),
            "degenerate segment: endpoints are equal within tolerance"
        );
        let (left, right) = match compare_points(a, b) {
            Ordering::Greater => (b, a),
            _ => (a, b),
        };
        let left_se = SweepEvent::new_rc(left, true);
        let right_se = SweepEvent::new_rc(right, false);
        self.push_segment(left_se, right_se, ring_in)
    }

    /// Segment created by a split: spans from `left` to the point of the
    /// existing right event, which is re-targeted to the new segment.
    fn alloc_split(
        &mut self,
        left: Point<F>,
        right_se: Rc<SweepEvent<F>>,
        ring_in: RingId,
    ) -> Rc<Segment<F>> {
        let left_se = SweepEvent::new_rc(left, true);
        self.push_segment(left_se, right_se, ring_in)
    }

    fn push_segment(
        &mut self,
        left_se: Rc<SweepEvent<F>>,
        right_se: Rc<SweepEvent<F>>,
        ring_in: RingId,
    ) -> Rc<Segment<F>> {
        let segment = Rc::new(Segment {
            id: self.segments.len(),
            ring_in,
            left_se: RefCell::new(left_se.clone()),
            right_se: RefCell::new(right_se.clone()),
            prev: RefCell::new(Weak::new()),
            ring_out: Cell::new(None),
            classification: RefCell::new(Classification::default()),
            is_in_result: Cell::new(false),
        });
        left_se.set_segment(&segment);
        right_se.set_segment(&segment);
        self.segments.push(segment.clone());
        segment
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<Segment<F>>> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}
