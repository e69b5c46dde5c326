// Copyright (c) 2018-2021 Thomas Kramer.
// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Connect the segments surviving the Boolean operation into polygons.

use crate::flp::{are_points_equal, flp_lt};
use crate::segment::Segment;
use crate::sweep_event::SweepEvent;
use iron_shapes::point::Point;
use iron_shapes::polygon::{Polygon, SimplePolygon};
use iron_shapes::CoordinateType;
use num_traits::Float;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
struct Event<F: CoordinateType> {
    /// Index of this event in the vector where it is stored.
    index: usize,
    /// Index of the other event of the same segment.
    other_index: usize,
    /// Index of the left event of the nearest in-result segment below.
    prev_index: Option<usize>,
    /// The endpoint represented by this event.
    p: Point<F>,
    is_left_event: bool,
    /// Is this part of a hole? Used to distinguish holes from hulls.
    is_hole: bool,
    /// Is this an upper boundary of its contour?
    is_upper_boundary: bool,
    contour_id: usize,
}

/// Nearest segment below that contributes to the result.
fn prev_in_result<F>(segment: &Rc<Segment<F>>) -> Option<Rc<Segment<F>>>
where
    F: CoordinateType + Float,
{
    let mut below = segment.prev();
    while let Some(p) = below {
        if p.is_in_result() {
            return Some(p);
        }
        below = p.prev();
    }
    None
}

/// Snapshot the events of all in-result segments into plain index-linked
/// records, keeping the sweep order.
fn order_events<F>(relevant: &[Rc<SweepEvent<F>>]) -> Vec<Event<F>>
where
    F: CoordinateType + Float,
{
    // Index of each segment's left and right event.
    let mut left_index: HashMap<usize, usize> = HashMap::new();
    let mut right_index: HashMap<usize, usize> = HashMap::new();
    for (index, event) in relevant.iter().enumerate() {
        let segment_id = event.segment().id();
        if event.is_left() {
            left_index.insert(segment_id, index);
        } else {
            right_index.insert(segment_id, index);
        }
    }

    relevant
        .iter()
        .enumerate()
        .map(|(index, event)| {
            let segment = event.segment();
            let other_index = if event.is_left() {
                right_index[&segment.id()]
            } else {
                left_index[&segment.id()]
            };
            let prev_index = prev_in_result(&segment).map(|p| left_index[&p.id()]);
            Event {
                index,
                other_index,
                prev_index,
                p: event.point,
                is_left_event: event.is_left(),
                is_hole: false,
                is_upper_boundary: false,
                contour_id: usize::MAX,
            }
        })
        .collect()
}

/// Find another not-yet-used event at the same point as `events[start_index]`
/// by searching the sorted list in both directions.
fn next_index<F: CoordinateType + Float>(
    events: &[Event<F>],
    start_index: usize,
    used: &[bool],
) -> Option<usize> {
    debug_assert!(start_index < events.len());
    debug_assert_eq!(events.len(), used.len());

    let point = events[start_index].p;

    let to_the_right = events[start_index + 1..]
        .iter()
        .take_while(|e| are_points_equal(e.p, point))
        .find(|e| !used[e.index])
        .map(|e| e.index);

    if to_the_right.is_some() {
        return to_the_right;
    }

    events[0..start_index]
        .iter()
        .rev()
        .take_while(|e| are_points_equal(e.p, point))
        .find(|e| !used[e.index])
        .map(|e| e.index)
}

/// Walk the surviving segments into closed contours and assemble polygons
/// with holes.
///
/// This relies on events at the same point being adjacent in the sorted
/// list: starting from a left event, go to its right event, and from there
/// pick up an unused event at the same location.
pub fn connect_edges<F>(sorted_events: &[Rc<SweepEvent<F>>]) -> Vec<Polygon<F>>
where
    F: CoordinateType + Float,
{
    let relevant: Vec<Rc<SweepEvent<F>>> = sorted_events
        .iter()
        .filter(|event| event.segment().is_in_result())
        .cloned()
        .collect();

    debug_assert!(relevant.len() % 2 == 0, "expect an even number of events");

    let mut events = order_events(&relevant);

    let mut polygons: Vec<Polygon<F>> = Vec::new();
    let mut processed: Vec<bool> = vec![false; events.len()];

    for i in 0..events.len() {
        if processed[i] {
            continue;
        }

        let initial_event = &events[i];
        debug_assert!(
            initial_event.is_left_event,
            "contours must start at a left event"
        );

        // A contour below an upper boundary of a hull is a hole; one below
        // an upper boundary of a hole (or below nothing) is a hull.
        let is_hull = initial_event
            .prev_index
            .map(|prev| {
                let prev_event = &events[prev];
                if prev_event.is_upper_boundary {
                    !prev_event.is_hole
                } else {
                    prev_event.is_hole
                }
            })
            .unwrap_or(true);
        let is_hole = !is_hull;

        let polygon_id = if is_hull {
            polygons.len()
        } else {
            initial_event
                .prev_index
                .map(|prev| events[prev].contour_id)
                .unwrap_or(polygons.len())
        };

        let initial_point = initial_event.p;
        let mut contour = Vec::new();
        let mut pointer = i;

        loop {
            // Propagate the contour attribution to both events of the pair.
            let other_pointer = {
                let event = &mut events[pointer];
                event.contour_id = polygon_id;
                event.is_hole = is_hole;
                event.other_index
            };
            {
                let other = &mut events[other_pointer];
                other.contour_id = polygon_id;
                other.is_hole = is_hole;
            }

            if flp_lt(events[other_pointer].p.x, events[pointer].p.x) {
                // Traversed right to left: an upper boundary of the contour.
                events[pointer].is_upper_boundary = true;
                events[other_pointer].is_upper_boundary = true;
            }

            relevant[pointer].segment().register_ring_out(polygon_id);

            contour.push(events[pointer].p);
            processed[pointer] = true;
            processed[other_pointer] = true;

            debug_assert!(
                events[pointer].is_left_event ^ events[other_pointer].is_left_event,
                "need exactly one left and one right event"
            );

            if are_points_equal(events[other_pointer].p, initial_point) {
                break;
            }

            match next_index(&events, other_pointer, &processed) {
                Some(next) => pointer = next,
                None => break,
            }
        }

        if polygon_id < polygons.len() {
            // Attribute the hole to its polygon.
            let hole = SimplePolygon::new(contour).normalized_orientation::<F>();
            polygons[polygon_id].interiors.push(hole);
        } else {
            polygons.push(Polygon::new(contour));
        }
    }

    polygons
}
