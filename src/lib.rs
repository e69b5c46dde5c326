// Copyright (c) 2018-2021 Thomas Kramer.
// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Boolean operations on planar multipolygons in floating-point coordinates.
//!
//! The algorithm sweeps a line over all input segments (Bentley–Ottmann),
//! subdividing them at their intersections, classifies every resulting
//! segment against the boundaries of all operands, and stitches the
//! surviving segments into output polygons. All coordinate comparisons are
//! tolerant with a relative epsilon, so near-coincident vertices and rounded
//! intersection points do not derail the sweep.
//!
//! # Example
//! ```
//! use polygon_booleanop::{boolean_op, Operation};
//! use iron_shapes::prelude::*;
//!
//! let p1 = Polygon::from(vec![(0., 0.), (2., 0.), (2., 2.), (0., 2.)]);
//! let p2 = p1.translate((1., 1.).into());
//!
//! let a = MultiPolygon::from_polygons(vec![p1]);
//! let b = MultiPolygon::from_polygons(vec![p2]);
//!
//! let union = boolean_op(Operation::Union, &a, &b);
//! assert_eq!(union.len(), 1);
//!
//! let intersection = boolean_op(Operation::Intersection, &a, &b);
//! assert_eq!(intersection.len(), 1);
//! ```

mod bbox;
mod classify;
mod compare_segments;
mod connect_edges;
mod flp;
mod init_events;
mod operand;
mod possible_intersection;
mod scanline;
mod segment;
mod sweep;
mod sweep_event;

use iron_shapes::multi_polygon::MultiPolygon;
use iron_shapes::CoordinateType;
use num_traits::Float;

pub use crate::classify::Classification;
pub use crate::flp::EPSILON;
pub use crate::operand::{MultiPoly, MultiPolyId, Poly, PolyId, Ring, RingId, RingIdSet};
pub use crate::segment::Segment;
pub use crate::sweep_event::SweepEvent;

/// Type of boolean operation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operation {
    Intersection,
    Difference,
    Union,
    Xor,
}

/// Perform a boolean operation on two multipolygons.
///
/// For [`Operation::Difference`] the first operand is the subject from which
/// the second is subtracted.
pub fn boolean_op<F>(
    operation: Operation,
    subject: &MultiPolygon<F>,
    clipping: &MultiPolygon<F>,
) -> MultiPolygon<F>
where
    F: CoordinateType + Float,
{
    boolean_multi_op(operation, &[subject, clipping])
}

/// Perform a boolean operation on any number of multipolygons.
///
/// Union, intersection and xor treat all operands alike. For
/// [`Operation::Difference`] the first operand is the subject and all
/// remaining operands are subtracted from it.
pub fn boolean_multi_op<F>(operation: Operation, operands: &[&MultiPolygon<F>]) -> MultiPolygon<F>
where
    F: CoordinateType + Float,
{
    let subject_index = match operation {
        Operation::Difference => Some(0),
        _ => None,
    };

    // Decompose the inputs into segments and endpoint events.
    let (registry, mut store, mut queue) = init_events::fill_queue(operands, subject_index);

    // Subdivide all segments such that none cross anywhere but at endpoints.
    let sweep::SweepResult {
        sorted_events,
        mut coincidence,
    } = sweep::subdivide_segments(&mut queue, &mut store);

    // Decide which segments bound the result.
    let ctx = classify::OperationCtx {
        operation,
        total_multi_polys: registry.multi_polys.len(),
        subject: registry.subject(),
    };
    classify::classify_segments(&sorted_events, &store, &registry, &mut coincidence, &ctx);

    // Stitch them into polygons.
    let polygons = connect_edges::connect_edges(&sorted_events);
    MultiPolygon::from_polygons(polygons)
}

/// Union of all operands.
pub fn union<F>(operands: &[&MultiPolygon<F>]) -> MultiPolygon<F>
where
    F: CoordinateType + Float,
{
    boolean_multi_op(Operation::Union, operands)
}

/// Intersection of all operands.
pub fn intersection<F>(operands: &[&MultiPolygon<F>]) -> MultiPolygon<F>
where
    F: CoordinateType + Float,
{
    boolean_multi_op(Operation::Intersection, operands)
}

/// Symmetric difference of all operands.
pub fn xor<F>(operands: &[&MultiPolygon<F>]) -> MultiPolygon<F>
where
    F: CoordinateType + Float,
{
    boolean_multi_op(Operation::Xor, operands)
}

/// Subtract all `clipping` operands from `subject`.
pub fn difference<F>(subject: &MultiPolygon<F>, clipping: &[&MultiPolygon<F>]) -> MultiPolygon<F>
where
    F: CoordinateType + Float,
{
    let operands: Vec<&MultiPolygon<F>> =
        std::iter::once(subject).chain(clipping.iter().copied()).collect();
    boolean_multi_op(Operation::Difference, &operands)
}
