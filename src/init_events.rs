// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Decompose the input multipolygons into segments and seed the event queue.

use crate::flp::are_points_equal;
use crate::operand::{OperandSet, RingId};
use crate::segment::SegmentStore;
use crate::sweep_event::SweepEvent;
use iron_shapes::multi_polygon::MultiPolygon;
use iron_shapes::point::Point;
use iron_shapes::polygon::SimplePolygon;
use iron_shapes::CoordinateType;
use num_traits::Float;
use std::collections::BinaryHeap;
use std::rc::Rc;

/// Register all operands, decompose their rings into segments and push both
/// endpoint events of every segment into the event queue.
///
/// `subject_index` tags one operand as the subject (used by difference).
pub fn fill_queue<F>(
    operands: &[&MultiPolygon<F>],
    subject_index: Option<usize>,
) -> (OperandSet, SegmentStore<F>, BinaryHeap<Rc<SweepEvent<F>>>)
where
    F: CoordinateType + Float,
{
    let mut registry = OperandSet::default();
    let mut store = SegmentStore::new();
    let mut queue = BinaryHeap::new();

    for (index, multi_polygon) in operands.iter().enumerate() {
        let multi_poly = registry.add_multi_poly(subject_index == Some(index));
        for polygon in &multi_polygon.polygons {
            let poly = registry.add_poly(multi_poly);

            let exterior = registry.add_ring(poly, true);
            process_ring(&polygon.exterior, exterior, &mut store, &mut queue);

            for interior in &polygon.interiors {
                let hole = registry.add_ring(poly, false);
                process_ring(interior, hole, &mut store, &mut queue);
            }
        }
    }

    (registry, store, queue)
}

/// Create the segments of one closed ring. Consecutive tolerantly-equal
/// vertices are merged, a repeated closing vertex is dropped, and degenerate
/// edges are skipped.
fn process_ring<F>(
    ring: &SimplePolygon<F>,
    ring_id: RingId,
    store: &mut SegmentStore<F>,
    queue: &mut BinaryHeap<Rc<SweepEvent<F>>>,
) where
    F: CoordinateType + Float,
{
    let mut points: Vec<Point<F>> = Vec::with_capacity(ring.points.len());
    for &p in &ring.points {
        if points.last().map_or(true, |&last| !are_points_equal(last, p)) {
            points.push(p);
        }
    }
    while points.len() > 1 && are_points_equal(points[0], *points.last().unwrap()) {
        points.pop();
    }
    if points.len() < 2 {
        // Nothing left that could bound area.
        return;
    }

    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        let segment = store.alloc(a, b, ring_id);
        queue.push(segment.left());
        queue.push(segment.right());
    }
}
