// Copyright (c) 2018-2021 Thomas Kramer.
// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The sweep loop: find all intersections and subdivide the segments such
//! that no two of them cross anywhere but at endpoints.

use crate::classify::Coincidence;
use crate::compare_segments::compare_segments;
use crate::possible_intersection::possible_intersection;
use crate::scanline::ScanLine;
use crate::segment::SegmentStore;
use crate::sweep_event::{compare_events, SweepEvent};
use iron_shapes::CoordinateType;
use itertools::Itertools;
use num_traits::Float;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

/// Outcome of the sweep.
pub struct SweepResult<F: CoordinateType> {
    /// All events in queue order; one left and one right event per final
    /// segment.
    pub sorted_events: Vec<Rc<SweepEvent<F>>>,
    /// The coincidence classes discovered along the way.
    pub coincidence: Coincidence,
}

/// Process all events left to right, maintaining the status structure and
/// subdividing segments at their intersections.
pub fn subdivide_segments<F>(
    queue: &mut BinaryHeap<Rc<SweepEvent<F>>>,
    store: &mut SegmentStore<F>,
) -> SweepResult<F>
where
    F: CoordinateType + Float,
{
    let mut sorted_events: Vec<Rc<SweepEvent<F>>> = Vec::with_capacity(queue.len());
    let mut scan_line = ScanLine::new();
    let mut coincidence = Coincidence::with_capacity(store.len());

    while let Some(event) = queue.pop() {
        let segment = event.segment();

        // Record the event in queue order. A reparented right event can pop
        // slightly out of order because its id tie-break changed while it
        // sat in the heap, so insert by search instead of pushing.
        {
            let len = sorted_events.len();
            let pos_back = sorted_events
                .iter()
                .rev()
                .find_position(|e: &&Rc<SweepEvent<F>>| {
                    compare_events(e, &event) != Ordering::Greater
                })
                .map(|(index, _)| index)
                .unwrap_or(len);
            sorted_events.insert(len - pos_back, event.clone());
        }

        if event.is_left() {
            debug_assert!(!scan_line.contains(&segment), "segment is already active");
            scan_line.insert(segment.clone());

            let maybe_prev = scan_line.prev(&segment).cloned();
            let maybe_next = scan_line.next(&segment).cloned();

            if let Some(prev) = &maybe_prev {
                debug_assert_ne!(
                    compare_segments(&segment, prev),
                    Ordering::Less,
                    "status structure ordering is broken"
                );
                segment.register_prev(prev);
            }

            if let Some(next) = &maybe_next {
                debug_assert_ne!(
                    compare_segments(&segment, next),
                    Ordering::Greater,
                    "status structure ordering is broken"
                );
                possible_intersection(&segment, next, store, queue, &mut coincidence);
            }
            if let Some(prev) = &maybe_prev {
                possible_intersection(prev, &segment, store, queue, &mut coincidence);
            }
        } else {
            debug_assert!(scan_line.contains(&segment), "segment is not active");
            if scan_line.contains(&segment) {
                let maybe_prev = scan_line.prev(&segment).cloned();
                let maybe_next = scan_line.next(&segment).cloned();
                scan_line.remove(&segment);

                // The former neighbours may now touch each other.
                if let (Some(prev), Some(next)) = (maybe_prev, maybe_next) {
                    possible_intersection(&prev, &next, store, queue, &mut coincidence);
                }
            }
        }
    }

    debug_assert!(scan_line.is_empty(), "scan line still contains segments");
    debug_assert!(
        sorted_events
            .windows(2)
            .all(|w| compare_events(&w[0], &w[1]) != Ordering::Greater),
        "events are not sorted"
    );
    debug_assert_eq!(
        sorted_events.iter().filter(|e| e.is_left()).count(),
        store.len(),
        "expected exactly one left event per segment"
    );

    SweepResult {
        sorted_events,
        coincidence,
    }
}
